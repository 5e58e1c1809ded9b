#![forbid(unsafe_code)]

//! Core: touch model and multi-touch gesture classification.
//!
//! # Role in Kalends
//! `kalends-core` is the input layer of the calendar widget. It knows nothing
//! about dates: it turns raw touch streams into semantic gestures and routes
//! them through a typed handler table.
//!
//! # Primary responsibilities
//! - **TouchEvent**: raw `start/move/end/cancel` events with touch points.
//! - **GestureClassifier**: swipe, press-move, pinch, rotate, tap, double-tap.
//! - **GestureHandlers**: capability table of plain handler functions.
//! - **logging**: `tracing` re-exports or no-op macros, shared by all crates.
//!
//! # How it fits in the system
//! `kalends-swiper` registers handlers against the classifier and turns the
//! resulting gestures into calendar navigation. `kalends-grid` is independent
//! of input.

pub mod gesture;
pub mod gesture_event;
pub mod handlers;
pub mod logging;
pub mod touch;

pub use gesture::{GestureClassifier, GestureConfig};
pub use gesture_event::{GestureEvent, GestureKinds, SwipeDirection};
pub use handlers::GestureHandlers;
pub use touch::{TouchEvent, TouchPhase, TouchPoint};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
