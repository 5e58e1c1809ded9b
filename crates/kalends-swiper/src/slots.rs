#![forbid(unsafe_code)]

//! The three-slot rotating buffer behind the page swiper.
//!
//! The swiper loops over three pages. Contents never move between slots;
//! instead [`SIBLINGS`] fixes, for every slot, which slot is reached by
//! swiping forward and which by swiping backward. Keeping the current page at
//! the active slot and its neighbours at the active slot's siblings makes the
//! swiper rotate forever in either direction.
//!
//! # Invariants
//! 1. `SIBLINGS[i].prev`, `SIBLINGS[i].next` and `i` are pairwise distinct.
//! 2. `SIBLINGS[SIBLINGS[i].next].prev == i` (and vice versa).

use std::fmt;
use std::sync::Arc;

use kalends_grid::{CalendarDay, DateKey, MonthGrid, grid::WEEK_LEN};

use crate::error::NavigationError;

/// Number of slots in the buffer.
pub const SLOT_COUNT: usize = 3;

/// Row height of a 35-cell grid, in px.
pub const ROW_HEIGHT_35: i32 = 120;
/// Row height of a 42-cell grid, in px.
pub const ROW_HEIGHT_42: i32 = 95;

/// Index of one slot, always in `0..3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
pub struct SlotIndex(u8);

impl SlotIndex {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);
    pub const TWO: Self = Self(2);
    pub const ALL: [Self; SLOT_COUNT] = [Self::ZERO, Self::ONE, Self::TWO];

    pub fn new(index: usize) -> Result<Self, NavigationError> {
        match index {
            0..SLOT_COUNT => Ok(Self(index as u8)),
            _ => Err(NavigationError::SlotOutOfRange { index }),
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// The sibling entry of this slot.
    #[inline]
    #[must_use]
    pub const fn siblings(self) -> Sibling {
        SIBLINGS[self.0 as usize]
    }

    /// The slot reached by one step in `step`'s direction.
    #[inline]
    #[must_use]
    pub const fn step(self, step: Step) -> Self {
        let sibling = self.siblings();
        match step {
            Step::Prev => sibling.prev,
            Step::Next => sibling.next,
        }
    }

    /// Direction of the move from `self` to `to`, `None` if they are equal.
    #[must_use]
    pub fn step_to(self, to: Self) -> Option<Step> {
        if to == self {
            None
        } else if self.siblings().next == to {
            Some(Step::Next)
        } else {
            Some(Step::Prev)
        }
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SlotIndex> for u8 {
    fn from(index: SlotIndex) -> Self {
        index.0
    }
}

impl TryFrom<u8> for SlotIndex {
    type Error = NavigationError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index as usize)
    }
}

/// One step through the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Step {
    Prev,
    Next,
}

impl Step {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}

/// The two other slots of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sibling {
    pub prev: SlotIndex,
    pub next: SlotIndex,
}

/// Fixed 3-cycle: 0 → 1 → 2 → 0 forward.
pub const SIBLINGS: [Sibling; SLOT_COUNT] = [
    Sibling {
        prev: SlotIndex::TWO,
        next: SlotIndex::ONE,
    },
    Sibling {
        prev: SlotIndex::ZERO,
        next: SlotIndex::TWO,
    },
    Sibling {
        prev: SlotIndex::ONE,
        next: SlotIndex::ZERO,
    },
];

/// Vertical offset (px, ≤ 0) that scrolls row `row` of a grid of `grid_len`
/// cells to the top of a single-row viewport.
///
/// The boundary rows at 475 px (42-cell) and 480 px get one extra pixel so
/// that no seam of the row above shows through.
#[must_use]
pub const fn week_top(grid_len: usize, row: usize) -> i32 {
    let grid42 = grid_len == 42;
    let height = if grid42 { ROW_HEIGHT_42 } else { ROW_HEIGHT_35 };
    let value = row as i32 * height;
    if (grid42 && value == 475) || value == 480 {
        -(value + 1)
    } else {
        -value
    }
}

/// One week of a month grid.
///
/// The slot keeps the whole grid; the renderer shows the row at `row`,
/// scrolled into view by `top`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeekSlice {
    pub grid: Arc<MonthGrid>,
    pub row: usize,
    pub top: i32,
    /// The date the week was looked up by.
    pub anchor: DateKey,
}

impl WeekSlice {
    /// The week of `anchor` within `grid`. Falls back to the first row when
    /// the grid does not show `anchor`.
    #[must_use]
    pub fn new(grid: Arc<MonthGrid>, anchor: DateKey) -> Self {
        let row = grid.row_of(anchor).unwrap_or(0);
        let top = week_top(grid.len(), row);
        Self {
            grid,
            row,
            top,
            anchor,
        }
    }

    /// The 7 days of the week.
    #[must_use]
    pub fn days(&self) -> &[CalendarDay] {
        let start = self.row * WEEK_LEN;
        self.grid.days().get(start..start + WEEK_LEN).unwrap_or(&[])
    }

    /// Whether `date` is one of the 7 days.
    #[must_use]
    pub fn contains(&self, date: DateKey) -> bool {
        self.days().iter().any(|d| d.date_key == date)
    }
}

/// Contents of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum SlotContent {
    #[default]
    Empty,
    Month(Arc<MonthGrid>),
    Week(WeekSlice),
}

impl SlotContent {
    /// The grid backing this slot.
    #[must_use]
    pub fn grid(&self) -> Option<&Arc<MonthGrid>> {
        match self {
            Self::Empty => None,
            Self::Month(grid) => Some(grid),
            Self::Week(week) => Some(&week.grid),
        }
    }

    /// Vertical offset of the slot; 0 for month pages.
    #[must_use]
    pub fn top(&self) -> i32 {
        match self {
            Self::Week(week) => week.top,
            _ => 0,
        }
    }

    #[must_use]
    pub fn as_week(&self) -> Option<&WeekSlice> {
        match self {
            Self::Week(week) => Some(week),
            _ => None,
        }
    }

    /// Whether both show the same page: same month, and same row for weeks.
    #[must_use]
    pub fn same_page(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Month(a), Self::Month(b)) => a.month_key() == b.month_key(),
            (Self::Week(a), Self::Week(b)) => {
                a.grid.month_key() == b.grid.month_key() && a.row == b.row
            }
            _ => false,
        }
    }
}

/// The three slots and their vertical offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotBuffer {
    slots: [SlotContent; SLOT_COUNT],
    offsets: [i32; SLOT_COUNT],
}

impl SlotBuffer {
    #[must_use]
    pub fn get(&self, index: SlotIndex) -> &SlotContent {
        &self.slots[index.get()]
    }

    #[must_use]
    pub fn offset(&self, index: SlotIndex) -> i32 {
        self.offsets[index.get()]
    }

    #[must_use]
    pub fn offsets(&self) -> [i32; SLOT_COUNT] {
        self.offsets
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &SlotContent)> {
        SlotIndex::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn set(&mut self, index: SlotIndex, content: SlotContent) {
        self.slots[index.get()] = content;
    }

    pub fn set_offset(&mut self, index: SlotIndex, top: i32) {
        self.offsets[index.get()] = top;
    }

    pub fn reset_offsets(&mut self) {
        self.offsets = [0; SLOT_COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kalends_grid::{GridBuilder, MonthKey};

    fn grid(y: i32, m: u32) -> Arc<MonthGrid> {
        let today = DateKey::new(2000, 1, 1).unwrap();
        Arc::new(GridBuilder::default().build(MonthKey::new(y, m).unwrap(), today))
    }

    #[test]
    fn siblings_are_distinct() {
        for slot in SlotIndex::ALL {
            let s = slot.siblings();
            assert_ne!(s.prev, slot);
            assert_ne!(s.next, slot);
            assert_ne!(s.prev, s.next);
        }
    }

    #[test]
    fn siblings_are_inverse() {
        for slot in SlotIndex::ALL {
            assert_eq!(slot.step(Step::Next).step(Step::Prev), slot);
            assert_eq!(slot.step(Step::Prev).step(Step::Next), slot);
        }
    }

    #[test]
    fn three_steps_come_back() {
        let mut slot = SlotIndex::ZERO;
        for _ in 0..3 {
            slot = slot.step(Step::Next);
        }
        assert_eq!(slot, SlotIndex::ZERO);
    }

    #[test]
    fn step_to_resolves_direction() {
        assert_eq!(SlotIndex::ZERO.step_to(SlotIndex::ONE), Some(Step::Next));
        assert_eq!(SlotIndex::ZERO.step_to(SlotIndex::TWO), Some(Step::Prev));
        assert_eq!(SlotIndex::TWO.step_to(SlotIndex::ZERO), Some(Step::Next));
        assert_eq!(SlotIndex::ONE.step_to(SlotIndex::ONE), None);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(SlotIndex::new(2).map(SlotIndex::get), Ok(2));
        assert_eq!(
            SlotIndex::new(3),
            Err(NavigationError::SlotOutOfRange { index: 3 })
        );
        assert!(SlotIndex::try_from(7u8).is_err());
    }

    #[test]
    fn week_tops_35() {
        let tops: Vec<i32> = (0..5).map(|row| week_top(35, row)).collect();
        assert_eq!(tops, vec![0, -120, -240, -360, -481]);
    }

    #[test]
    fn week_tops_42() {
        let tops: Vec<i32> = (0..6).map(|row| week_top(42, row)).collect();
        assert_eq!(tops, vec![0, -95, -190, -285, -380, -476]);
    }

    #[test]
    fn correction_only_at_boundary_rows() {
        for (len, height) in [(35, ROW_HEIGHT_35), (42, ROW_HEIGHT_42)] {
            for row in 0..len / 7 {
                let raw = row as i32 * height;
                let corrected = -week_top(len, row) - raw;
                assert_eq!(corrected, i32::from(raw == 475 || raw == 480), "{len}/{row}");
            }
        }
    }

    #[test]
    fn week_slice_finds_row() {
        let sept = grid(2023, 9);
        let week = WeekSlice::new(sept, DateKey::new(2023, 9, 30).unwrap());
        assert_eq!(week.row, 4);
        assert_eq!(week.top, -481);
        assert_eq!(week.days().len(), 7);
        assert!(week.contains(DateKey::new(2023, 9, 24).unwrap()));
        assert!(!week.contains(DateKey::new(2023, 9, 23).unwrap()));
    }

    #[test]
    fn week_slice_outside_grid_uses_first_row() {
        let week = WeekSlice::new(grid(2023, 9), DateKey::new(2024, 1, 1).unwrap());
        assert_eq!(week.row, 0);
        assert_eq!(week.top, 0);
    }

    #[test]
    fn buffer_set_and_reset() {
        let mut buffer = SlotBuffer::default();
        buffer.set(SlotIndex::ONE, SlotContent::Month(grid(2023, 9)));
        buffer.set_offset(SlotIndex::TWO, -95);
        assert!(buffer.get(SlotIndex::ONE).grid().is_some());
        assert_eq!(buffer.get(SlotIndex::ZERO), &SlotContent::Empty);
        assert_eq!(buffer.offsets(), [0, 0, -95]);
        buffer.reset_offsets();
        assert_eq!(buffer.offset(SlotIndex::TWO), 0);
    }
}
