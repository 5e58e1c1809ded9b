#![forbid(unsafe_code)]

//! Typed month/date keys.
//!
//! Keys render as unpadded `"Y-M"` / `"Y-M-D"` strings (`2023-9`,
//! `2023-9-1`), the format the rendering side uses for lookups and badges.
//! Parsing accepts zero-padded parts (`2023-09-01`) and normalizes them.
//!
//! Day arithmetic goes through `chrono` so that offsets roll over month and
//! year boundaries (`2023-12-28 + 7 = 2024-1-4`).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate, TimeDelta};

/// Days per month in a common year.
pub const MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian leap-year rule.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => MONTH_DAYS[(month - 1) as usize],
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to parse or construct a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Input was empty or whitespace.
    Empty,
    /// Input is not `Y-M` or `Y-M-D` with numeric parts.
    Malformed { input: String },
    /// Parts parsed but do not name a calendar date.
    OutOfRange { year: i32, month: u32, day: u32 },
}

impl fmt::Display for DateKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty date key"),
            Self::Malformed { input } => write!(f, "malformed date key {input:?}"),
            Self::OutOfRange { year, month, day } => {
                write!(f, "date {year}-{month}-{day} does not exist")
            }
        }
    }
}

impl std::error::Error for DateKeyError {}

// ---------------------------------------------------------------------------
// MonthKey
// ---------------------------------------------------------------------------

/// A calendar month, `"Y-M"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a key, validating the month and the representable year range.
    pub fn new(year: i32, month: u32) -> Result<Self, DateKeyError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(DateKeyError::OutOfRange {
                year,
                month,
                day: 1,
            });
        }
        Ok(Self { year, month })
    }

    #[inline]
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[inline]
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Days in this month.
    #[must_use]
    pub const fn total_days(self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// The previous month (December of the previous year after January).
    #[must_use]
    pub fn prev(self) -> Self {
        let (year, month) = if self.month > 1 {
            (self.year, self.month - 1)
        } else {
            (self.year - 1, 12)
        };
        Self::new(year, month).unwrap_or(self)
    }

    /// The next month (January of the next year after December).
    #[must_use]
    pub fn next(self) -> Self {
        let (year, month) = if self.month < 12 {
            (self.year, self.month + 1)
        } else {
            (self.year + 1, 1)
        };
        Self::new(year, month).unwrap_or(self)
    }

    /// Day 1 of this month.
    #[must_use]
    pub fn first_day(self) -> DateKey {
        self.clamp_day(1)
    }

    /// Weekday of day 1, 0 = Sunday.
    #[must_use]
    pub fn first_weekday(self) -> u32 {
        self.first_day().weekday()
    }

    /// The given day of this month, failing if the month is shorter.
    pub fn with_day(self, day: u32) -> Result<DateKey, DateKeyError> {
        DateKey::new(self.year, self.month, day)
    }

    /// The given day of this month, clamped to `1..=total_days`.
    #[must_use]
    pub fn clamp_day(self, day: u32) -> DateKey {
        let day = day.clamp(1, self.total_days().max(1));
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .map(DateKey)
            .unwrap_or_else(|| DateKey(NaiveDate::MIN))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = DateKeyError;

    /// Accepts `Y-M` and `Y-M-D`; the day part is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_parts(s)?;
        match parts.as_slice() {
            [year, month] | [year, month, _] => Self::new(*year as i32, *month),
            _ => Err(malformed(s)),
        }
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for MonthKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// DateKey
// ---------------------------------------------------------------------------

/// A calendar date, `"Y-M-D"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Create a key, validating the date.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateKeyError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateKeyError::OutOfRange { year, month, day })
    }

    /// Today's local wall-clock date.
    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse `input`, falling back to `fallback` when it is malformed.
    #[must_use]
    pub fn parse_or(input: &str, fallback: Self) -> Self {
        match input.parse() {
            Ok(key) => key,
            Err(err) => {
                kalends_core::warn!(%err, input, fallback = %fallback, "date key normalized");
                fallback
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[inline]
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    #[inline]
    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Weekday, 0 = Sunday.
    #[must_use]
    pub fn weekday(self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// The month containing this date.
    #[must_use]
    pub fn month_key(self) -> MonthKey {
        MonthKey {
            year: self.year(),
            month: self.month(),
        }
    }

    /// This date shifted by `days`, rolling over month and year boundaries.
    ///
    /// Saturates at the ends of the representable range.
    #[must_use]
    pub fn offset_days(self, days: i64) -> Self {
        TimeDelta::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map_or(self, Self)
    }

    /// The underlying `chrono` date.
    #[inline]
    #[must_use]
    pub const fn naive(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year(), self.month(), self.day())
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_parts(s)?.as_slice() {
            [year, month, day] => Self::new(*year as i32, *month, *day),
            _ => Err(malformed(s)),
        }
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// CalendarValue
// ---------------------------------------------------------------------------

/// A configured widget value: either a full date or just a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarValue {
    Day(DateKey),
    Month(MonthKey),
}

impl CalendarValue {
    /// The month this value points at.
    #[must_use]
    pub fn month_key(self) -> MonthKey {
        match self {
            Self::Day(date) => date.month_key(),
            Self::Month(month) => month,
        }
    }

    /// Parse `input`, falling back to `today` when it is absent or malformed.
    #[must_use]
    pub fn parse_or_today(input: Option<&str>, today: DateKey) -> Self {
        let Some(input) = input.filter(|s| !s.trim().is_empty()) else {
            return Self::Day(today);
        };
        match input.parse() {
            Ok(value) => value,
            Err(err) => {
                kalends_core::warn!(%err, input, "calendar value normalized to today");
                Self::Day(today)
            }
        }
    }
}

impl FromStr for CalendarValue {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_parts(s)?.as_slice() {
            [year, month] => MonthKey::new(*year as i32, *month).map(Self::Month),
            [year, month, day] => DateKey::new(*year as i32, *month, *day).map(Self::Day),
            _ => Err(malformed(s)),
        }
    }
}

fn malformed(s: &str) -> DateKeyError {
    DateKeyError::Malformed {
        input: s.to_string(),
    }
}

fn split_parts(s: &str) -> Result<Vec<u32>, DateKeyError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DateKeyError::Empty);
    }
    s.split('-')
        .map(|part| part.trim().parse::<u32>().map_err(|_| malformed(s)))
        .collect::<Result<Vec<_>, _>>()
        .and_then(|parts| {
            // Years beyond i32 cannot name a date.
            match parts.first() {
                Some(&year) if year > i32::MAX as u32 => Err(malformed(s)),
                _ => Ok(parts),
            }
        })
}
