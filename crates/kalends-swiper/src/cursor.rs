#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use kalends_grid::{DateKey, MonthKey};

use crate::slots::{SlotIndex, Step};

/// Display granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ViewType {
    #[default]
    Month,
    Week,
}

impl ViewType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Week => "week",
        }
    }

    #[must_use]
    pub const fn is_week(self) -> bool {
        matches!(self, Self::Week)
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown view type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseViewTypeError {
    pub input: String,
}

impl fmt::Display for ParseViewTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view type {:?} (expected month or week)", self.input)
    }
}

impl std::error::Error for ParseViewTypeError {}

impl FromStr for ViewType {
    type Err = ParseViewTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("month") {
            Ok(Self::Month)
        } else if s.eq_ignore_ascii_case("week") {
            Ok(Self::Week)
        } else {
            Err(ParseViewTypeError {
                input: s.to_string(),
            })
        }
    }
}

/// Where the user currently is.
///
/// Month keys always point at adjacent months; week keys are 7 days apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursor {
    pub view_type: ViewType,
    pub current_month: MonthKey,
    pub prev_month: MonthKey,
    pub next_month: MonthKey,
    pub current_week: DateKey,
    pub prev_week: DateKey,
    pub next_week: DateKey,
    /// Selected day of month, carried across month changes.
    pub current_day: u32,
    /// Slot showing the current page.
    pub active: SlotIndex,
}

impl Cursor {
    /// A cursor at `date`, day 1 selected, slot 0 active.
    #[must_use]
    pub fn at(date: DateKey, view_type: ViewType) -> Self {
        let month = date.month_key();
        Self {
            view_type,
            current_month: month,
            prev_month: month.prev(),
            next_month: month.next(),
            current_week: date,
            prev_week: date.offset_days(-7),
            next_week: date.offset_days(7),
            current_day: 1,
            active: SlotIndex::ZERO,
        }
    }

    #[must_use]
    pub fn month(&self, step: Step) -> MonthKey {
        match step {
            Step::Prev => self.prev_month,
            Step::Next => self.next_month,
        }
    }

    #[must_use]
    pub fn week(&self, step: Step) -> DateKey {
        match step {
            Step::Prev => self.prev_week,
            Step::Next => self.next_week,
        }
    }

    /// Point the week keys at `date`.
    pub fn set_week_keys(&mut self, date: DateKey) {
        self.current_week = date;
        self.prev_week = date.offset_days(-7);
        self.next_week = date.offset_days(7);
    }
}
