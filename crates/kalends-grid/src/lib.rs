#![forbid(unsafe_code)]

//! Month grids for the Kalends calendar widget.
//!
//! - [`date_key`]: typed `"Y-M"` / `"Y-M-D"` keys and day arithmetic.
//! - [`lunar`]: the lunar conversion boundary and festival tables.
//! - [`grid`]: building the 35/42-cell day matrix of a month.
//! - [`cache`]: memoizing built grids by month.

pub mod cache;
pub mod date_key;
pub mod grid;
pub mod lunar;

pub use cache::{GridCache, GridCacheStats, GridSource, SharedGridCache};
pub use date_key::{CalendarValue, DateKey, DateKeyError, MonthKey, days_in_month, is_leap_year};
pub use grid::{CalendarDay, DayRole, GridBuilder, MonthGrid, grid_size};
pub use lunar::{FestivalTables, LunarConverter, LunarDate, NoLunar};
