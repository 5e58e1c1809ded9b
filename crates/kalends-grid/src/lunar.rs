#![forbid(unsafe_code)]

//! Boundary to the lunar calendar and festival tables.
//!
//! Solar→lunar conversion is supplied by the host through [`LunarConverter`].
//! Festival labels live in two "MMDD"-keyed tables, one in lunar month/day
//! space and one in solar month/day space.
//!
//! Label precedence for a day: lunar festival, solar festival, solar term,
//! lunar day numeral. The first non-empty one wins.

use ahash::AHashMap;

/// Lunar descriptor of one solar day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LunarDate {
    /// Lunar month, 1-12. 0 when unknown.
    pub lunar_month: u32,
    /// Lunar day, 1-30. 0 when unknown.
    pub lunar_day: u32,
    /// Display numeral of the lunar day (e.g. "初一").
    pub lunar_day_label: String,
    /// Solar term falling on this day, if any (e.g. "立春").
    pub solar_term_label: Option<String>,
}

/// Solar→lunar conversion. Must be total for valid Gregorian dates.
pub trait LunarConverter: Send + Sync {
    fn to_lunar(&self, year: i32, month: u32, day: u32) -> LunarDate;
}

impl<F> LunarConverter for F
where
    F: Fn(i32, u32, u32) -> LunarDate + Send + Sync,
{
    fn to_lunar(&self, year: i32, month: u32, day: u32) -> LunarDate {
        self(year, month, day)
    }
}

/// Converter for hosts without lunar data: every day is "unknown".
///
/// Lunar festivals never match and labels fall back to solar festivals.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLunar;

impl LunarConverter for NoLunar {
    fn to_lunar(&self, _year: i32, _month: u32, _day: u32) -> LunarDate {
        LunarDate::default()
    }
}

/// Zero-padded `"MMDD"` table key.
#[must_use]
pub fn festival_key(month: u32, day: u32) -> String {
    format!("{month:02}{day:02}")
}

/// Lunar and solar festival labels keyed by `"MMDD"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FestivalTables {
    lunar: AHashMap<String, String>,
    solar: AHashMap<String, String>,
}

impl FestivalTables {
    /// Empty tables.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A small set of widely observed festivals.
    #[must_use]
    pub fn standard() -> Self {
        let mut tables = Self::empty();
        for (key, label) in [
            ("0101", "春节"),
            ("0115", "元宵节"),
            ("0202", "龙抬头"),
            ("0505", "端午节"),
            ("0707", "七夕"),
            ("0715", "中元节"),
            ("0815", "中秋节"),
            ("0909", "重阳节"),
            ("1208", "腊八节"),
        ] {
            tables.lunar.insert(key.to_string(), label.to_string());
        }
        for (key, label) in [
            ("0101", "元旦"),
            ("0214", "情人节"),
            ("0308", "妇女节"),
            ("0312", "植树节"),
            ("0501", "劳动节"),
            ("0504", "青年节"),
            ("0601", "儿童节"),
            ("0701", "建党节"),
            ("0801", "建军节"),
            ("0910", "教师节"),
            ("1001", "国庆节"),
            ("1225", "圣诞节"),
        ] {
            tables.solar.insert(key.to_string(), label.to_string());
        }
        tables
    }

    /// Add or replace a lunar festival.
    #[must_use]
    pub fn with_lunar(mut self, month: u32, day: u32, label: impl Into<String>) -> Self {
        self.lunar.insert(festival_key(month, day), label.into());
        self
    }

    /// Add or replace a solar festival.
    #[must_use]
    pub fn with_solar(mut self, month: u32, day: u32, label: impl Into<String>) -> Self {
        self.solar.insert(festival_key(month, day), label.into());
        self
    }

    #[must_use]
    pub fn lunar_label(&self, month: u32, day: u32) -> Option<&str> {
        self.lunar.get(&festival_key(month, day)).map(String::as_str)
    }

    #[must_use]
    pub fn solar_label(&self, month: u32, day: u32) -> Option<&str> {
        self.solar.get(&festival_key(month, day)).map(String::as_str)
    }

    /// Display label for a solar day and its lunar descriptor.
    #[must_use]
    pub fn label_for(&self, month: u32, day: u32, lunar: &LunarDate) -> Option<String> {
        [
            self.lunar_label(lunar.lunar_month, lunar.lunar_day),
            self.solar_label(month, day),
            lunar.solar_term_label.as_deref(),
            Some(lunar.lunar_day_label.as_str()),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(str::to_string)
    }
}
