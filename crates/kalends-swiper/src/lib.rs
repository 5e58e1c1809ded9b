#![forbid(unsafe_code)]

//! Calendar navigation over a circular three-slot swiper.
//!
//! # Role in Kalends
//! `kalends-swiper` holds the state of one calendar widget: where the user
//! is (the [`Cursor`]), what each swiper slot shows (the [`SlotBuffer`]) and
//! which day is selected. It consumes month grids from a
//! [`GridSource`](kalends_grid::GridSource) and gestures from
//! `kalends-core`, and produces [`ViewPatch`]es plus [`CalendarEvent`]s.
//!
//! # Primary responsibilities
//! - **slots**: sibling table, slot buffer, week slices and offsets.
//! - **SwiperController**: month/week paging, day selection, granularity.
//! - **CalendarWidget**: gesture wiring on top of the controller.
//! - **CalendarConfig**: initial value, view type, badges, gesture tuning.

pub mod config;
pub mod controller;
pub mod cursor;
pub mod error;
pub mod patch;
pub mod slots;
pub mod widget;

pub use config::CalendarConfig;
pub use controller::{NavigationCommand, SwiperController, TransitionSource};
pub use cursor::{Cursor, ViewType};
pub use error::NavigationError;
pub use patch::{CalendarEvent, OffsetUpdate, SlotUpdate, Update, ViewPatch};
pub use slots::{SIBLINGS, Sibling, SlotBuffer, SlotContent, SlotIndex, Step, WeekSlice, week_top};
pub use widget::{CalendarWidget, WidgetState};
