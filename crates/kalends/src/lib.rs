#![forbid(unsafe_code)]

//! Kalends public facade crate.
//!
//! Re-exports the widget surface from the internal crates and offers a
//! prelude for hosts embedding the calendar.
//!
//! ```
//! use kalends::prelude::*;
//!
//! let mut widget = CalendarWidget::new(CalendarConfig::default().with_value("2023-9-14"));
//! let update = widget.attach();
//! assert_eq!(update.patch.selected.map(|d| d.to_string()).as_deref(), Some("2023-9-14"));
//!
//! let update = widget.navigate(NavigationCommand::touch(1))?;
//! assert_eq!(update.events, vec![CalendarEvent::Change {
//!     date: "2023-10-14".parse()?,
//! }]);
//! # Ok::<(), kalends::Error>(())
//! ```

use std::fmt;

// --- Input re-exports ------------------------------------------------------

pub use kalends_core::gesture_event::{Pinch, PressMove, Rotate, Swipe};
pub use kalends_core::{
    GestureClassifier, GestureConfig, GestureEvent, GestureHandlers, GestureKinds, SwipeDirection,
    TouchEvent, TouchPhase, TouchPoint,
};

// --- Grid re-exports -------------------------------------------------------

pub use kalends_grid::{
    CalendarDay, CalendarValue, DateKey, DateKeyError, DayRole, FestivalTables, GridBuilder,
    GridCache, GridCacheStats, GridSource, LunarConverter, LunarDate, MonthGrid, MonthKey, NoLunar,
    SharedGridCache,
};

// --- Swiper re-exports -----------------------------------------------------

pub use kalends_swiper::{
    CalendarConfig, CalendarEvent, CalendarWidget, Cursor, NavigationCommand, NavigationError,
    SlotContent, SlotIndex, SwiperController, TransitionSource, Update, ViewPatch, ViewType,
    WeekSlice,
};

// --- Errors ---------------------------------------------------------------

/// Any error surfaced by the Kalends API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A date or month key failed to parse.
    DateKey(DateKeyError),
    /// A navigation request named an invalid slot.
    Navigation(NavigationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateKey(err) => write!(f, "{err}"),
            Self::Navigation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DateKey(err) => Some(err),
            Self::Navigation(err) => Some(err),
        }
    }
}

impl From<DateKeyError> for Error {
    fn from(err: DateKeyError) -> Self {
        Self::DateKey(err)
    }
}

impl From<NavigationError> for Error {
    fn from(err: NavigationError) -> Self {
        Self::Navigation(err)
    }
}

/// Standard result type for Kalends APIs.
pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{
        CalendarConfig, CalendarEvent, CalendarWidget, DateKey, DayRole, Error, MonthKey,
        NavigationCommand, Result, SwipeDirection, SwiperController, TouchEvent, TouchPoint,
        TransitionSource, Update, ViewPatch, ViewType,
    };

    pub use crate::{core, grid, swiper};
}

pub use kalends_core as core;
pub use kalends_grid as grid;
pub use kalends_swiper as swiper;
