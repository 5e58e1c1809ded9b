#![forbid(unsafe_code)]

//! Memoized month grids.
//!
//! A built grid is immutable and shared through `Arc`, so repeated lookups of
//! the same month return the same allocation. The "today" mark is computed
//! once, when the grid is first built; entries are never evicted.

use std::sync::{Arc, Mutex, MutexGuard};

use ahash::AHashMap;

use crate::date_key::{DateKey, MonthKey};
use crate::grid::{GridBuilder, MonthGrid};

/// Anything that can hand out month grids.
pub trait GridSource {
    fn grid(&mut self, month: MonthKey) -> Arc<MonthGrid>;
}

/// Lookup counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl GridCacheStats {
    /// Fraction of lookups served from the cache, 0.0 when there were none.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

type Clock = Box<dyn Fn() -> DateKey + Send + Sync>;

/// Month-keyed grid cache.
pub struct GridCache {
    entries: AHashMap<MonthKey, Arc<MonthGrid>>,
    builder: GridBuilder,
    clock: Clock,
    hits: u64,
    misses: u64,
}

impl std::fmt::Debug for GridCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridCache")
            .field("builder", &self.builder)
            .field("stats", &self.stats())
            .finish()
    }
}

impl Default for GridCache {
    fn default() -> Self {
        Self::new(GridBuilder::default())
    }
}

impl GridCache {
    /// A cache building with `builder` and marking the local date as today.
    #[must_use]
    pub fn new(builder: GridBuilder) -> Self {
        Self::with_clock(builder, DateKey::today)
    }

    /// A cache whose notion of "today" comes from `clock`.
    #[must_use]
    pub fn with_clock<F>(builder: GridBuilder, clock: F) -> Self
    where
        F: Fn() -> DateKey + Send + Sync + 'static,
    {
        Self {
            entries: AHashMap::new(),
            builder,
            clock: Box::new(clock),
            hits: 0,
            misses: 0,
        }
    }

    /// The grid for `month`, building it on first use.
    pub fn get(&mut self, month: MonthKey) -> Arc<MonthGrid> {
        if let Some(grid) = self.entries.get(&month) {
            self.hits += 1;
            return Arc::clone(grid);
        }
        self.misses += 1;
        let today = (self.clock)();
        let grid = Arc::new(self.builder.build(month, today));
        kalends_core::debug!(
            month = %month,
            cells = grid.len(),
            entries = self.entries.len() + 1,
            "month grid built"
        );
        self.entries.insert(month, Arc::clone(&grid));
        grid
    }

    /// The cached grid for `month`, without building or counting.
    #[must_use]
    pub fn peek(&self, month: MonthKey) -> Option<Arc<MonthGrid>> {
        self.entries.get(&month).cloned()
    }

    #[must_use]
    pub fn contains(&self, month: MonthKey) -> bool {
        self.entries.contains_key(&month)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> GridCacheStats {
        GridCacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

impl GridSource for GridCache {
    fn grid(&mut self, month: MonthKey) -> Arc<MonthGrid> {
        self.get(month)
    }
}

/// A [`GridCache`] shared between several controllers.
#[derive(Debug, Clone, Default)]
pub struct SharedGridCache {
    inner: Arc<Mutex<GridCache>>,
}

impl SharedGridCache {
    #[must_use]
    pub fn new(cache: GridCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Lock the cache. A poisoned lock is recovered; entries are immutable
    /// once inserted, so a panic elsewhere cannot leave them half-written.
    pub fn lock(&self) -> MutexGuard<'_, GridCache> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[must_use]
    pub fn stats(&self) -> GridCacheStats {
        self.lock().stats()
    }
}

impl GridSource for SharedGridCache {
    fn grid(&mut self, month: MonthKey) -> Arc<MonthGrid> {
        self.lock().get(month)
    }
}
