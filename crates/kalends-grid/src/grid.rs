#![forbid(unsafe_code)]

//! Month grid construction.
//!
//! A [`MonthGrid`] is the row-major, 7-wide day matrix shown for one month:
//! the trailing days of the previous month, every day of the month, and the
//! leading days of the next month.
//!
//! # Invariants
//! 1. `len()` is 42 iff `first_weekday + total_days > 35`, else 35.
//! 2. Cell `i` has `grid_index == i` and `weekday == i % 7` (0 = Sunday).
//! 3. Roles are contiguous: `Prev* Current+ Next*`; every day of the month
//!    appears exactly once with role `Current`.
//! 4. Consecutive cells are consecutive calendar dates.

use std::fmt;

use crate::date_key::{DateKey, MonthKey, days_in_month};
use crate::lunar::{FestivalTables, LunarConverter, LunarDate, NoLunar};

/// Which month a grid cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DayRole {
    Prev,
    Current,
    Next,
}

impl DayRole {
    /// Lowercase name (`"prev"`, `"current"`, `"next"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Current => "current",
            Self::Next => "next",
        }
    }
}

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDay {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub role: DayRole,
    /// 0 = Sunday.
    pub weekday: u8,
    pub grid_index: usize,
    pub date_key: DateKey,
    pub is_today: bool,
    /// Festival, solar term or lunar numeral.
    pub label: Option<String>,
    pub lunar: LunarDate,
}

/// Cells per grid row.
pub const WEEK_LEN: usize = 7;

/// Number of cells for a month starting on `first_weekday` with `total_days` days.
#[must_use]
pub const fn grid_size(first_weekday: u32, total_days: u32) -> usize {
    if first_weekday + total_days > 35 { 42 } else { 35 }
}

/// The day matrix of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthGrid {
    month_key: MonthKey,
    days: Vec<CalendarDay>,
    total_days: u32,
    prev_month_key: MonthKey,
    next_month_key: MonthKey,
}

impl MonthGrid {
    #[inline]
    #[must_use]
    pub fn month_key(&self) -> MonthKey {
        self.month_key
    }

    #[inline]
    #[must_use]
    pub fn prev_month_key(&self) -> MonthKey {
        self.prev_month_key
    }

    #[inline]
    #[must_use]
    pub fn next_month_key(&self) -> MonthKey {
        self.next_month_key
    }

    /// Days in the month itself.
    #[inline]
    #[must_use]
    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// All cells, row-major.
    #[inline]
    #[must_use]
    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// Cell count: 35 or 42.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Row count: 5 or 6.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.days.len() / WEEK_LEN
    }

    /// The 7 cells of row `row`.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[CalendarDay]> {
        let start = row.checked_mul(WEEK_LEN)?;
        self.days.get(start..start + WEEK_LEN)
    }

    /// Grid index of `date`, if it is shown in this grid.
    #[must_use]
    pub fn position_of(&self, date: DateKey) -> Option<usize> {
        self.days.iter().position(|d| d.date_key == date)
    }

    /// Row holding `date`, if it is shown in this grid.
    #[must_use]
    pub fn row_of(&self, date: DateKey) -> Option<usize> {
        self.position_of(date).map(|i| i / WEEK_LEN)
    }

    /// Cells belonging to the month itself.
    pub fn current_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|d| d.role == DayRole::Current)
    }
}

impl fmt::Display for MonthGrid {
    /// Plain-text rendering, one row per line, adjacent-month days in brackets.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.month_key)?;
        for row in self.days.chunks(WEEK_LEN) {
            let cells: Vec<String> = row
                .iter()
                .map(|d| match d.role {
                    DayRole::Current => format!("{:>4}", d.day),
                    _ => format!("{:>4}", format!("({})", d.day)),
                })
                .collect();
            writeln!(f, "{}", cells.concat())?;
        }
        Ok(())
    }
}

/// Post-processing hook run on every built cell.
pub type DayDecorator = Box<dyn Fn(&mut CalendarDay) + Send + Sync>;

/// Builds month grids and decorates their cells.
pub struct GridBuilder {
    lunar: Box<dyn LunarConverter>,
    festivals: FestivalTables,
    decorator: Option<DayDecorator>,
}

impl fmt::Debug for GridBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridBuilder")
            .field("festivals", &self.festivals)
            .field("decorator", &self.decorator.is_some())
            .finish()
    }
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new(NoLunar)
    }
}

impl GridBuilder {
    /// A builder using `lunar` and the standard festival tables.
    #[must_use]
    pub fn new(lunar: impl LunarConverter + 'static) -> Self {
        Self {
            lunar: Box::new(lunar),
            festivals: FestivalTables::standard(),
            decorator: None,
        }
    }

    /// Replace the festival tables.
    #[must_use]
    pub fn with_festivals(mut self, festivals: FestivalTables) -> Self {
        self.festivals = festivals;
        self
    }

    /// Run `decorator` on every cell after it is built.
    #[must_use]
    pub fn with_decorator<F>(mut self, decorator: F) -> Self
    where
        F: Fn(&mut CalendarDay) + Send + Sync + 'static,
    {
        self.decorator = Some(Box::new(decorator));
        self
    }

    /// Build the grid for `month`, marking `today`.
    #[must_use]
    pub fn build(&self, month: MonthKey, today: DateKey) -> MonthGrid {
        let weekday = month.first_weekday();
        let total_days = month.total_days();
        let prev = month.prev();
        let next = month.next();
        let prev_total = days_in_month(prev.year(), prev.month());

        let max_day = total_days + weekday;
        let size = grid_size(weekday, total_days);

        let mut days = Vec::with_capacity(size);
        for index in 1..=size as u32 {
            let (key, day, role) = if index > max_day {
                (next, index - max_day, DayRole::Next)
            } else if index > weekday {
                (month, index - weekday, DayRole::Current)
            } else {
                (prev, prev_total - weekday + index, DayRole::Prev)
            };
            days.push(self.cell(key, day, role, index as usize - 1, today));
        }

        MonthGrid {
            month_key: month,
            days,
            total_days,
            prev_month_key: prev,
            next_month_key: next,
        }
    }

    fn cell(
        &self,
        key: MonthKey,
        day: u32,
        role: DayRole,
        grid_index: usize,
        today: DateKey,
    ) -> CalendarDay {
        let date_key = key.clamp_day(day);
        let lunar = self.lunar.to_lunar(key.year(), key.month(), day);
        let label = self.festivals.label_for(key.month(), day, &lunar);
        let mut cell = CalendarDay {
            year: key.year(),
            month: key.month(),
            day,
            role,
            weekday: (grid_index % WEEK_LEN) as u8,
            grid_index,
            date_key,
            is_today: date_key == today,
            label,
            lunar,
        };
        if let Some(decorate) = &self.decorator {
            decorate(&mut cell);
        }
        cell
    }
}
