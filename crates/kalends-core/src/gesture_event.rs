#![forbid(unsafe_code)]

//! Semantic gestures produced by the [`GestureClassifier`](crate::gesture::GestureClassifier).
//!
//! # Invariants
//! 1. A `Swipe` is emitted at most once per lifted finger, and only when the
//!    dominant axis displacement reached the configured threshold.
//! 2. `PressMove` deltas are relative to the session baseline centroid, which
//!    is re-baselined whenever a finger lifts while others remain.
//! 3. `Pinch` scale is always finite and non-negative.
//! 4. A `DoubleTap` consumes the pending tap, so three quick taps yield one
//!    `DoubleTap`, not two.

use bitflags::bitflags;

bitflags! {
    /// Set of gesture kinds a consumer asked for.
    ///
    /// The classifier skips bookkeeping for kinds that are not requested
    /// (no centroid tracking without `PRESS_MOVE`, no tap counting without
    /// `DOUBLE_TAP`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GestureKinds: u8 {
        const SWIPE = 1 << 0;
        const PRESS_MOVE = 1 << 1;
        const PINCH = 1 << 2;
        const ROTATE = 1 << 3;
        const TAP = 1 << 4;
        const DOUBLE_TAP = 1 << 5;
    }
}

impl Default for GestureKinds {
    fn default() -> Self {
        Self::all()
    }
}

/// Cardinal direction of a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Classify a displacement. Ties between the axes go to the vertical axis.
    #[must_use]
    pub fn from_delta(dx: f32, dy: f32) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Self::Right } else { Self::Left }
        } else if dy > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns true for vertical directions.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Lowercase name (`"up"`, `"down"`, `"left"`, `"right"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Completed swipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub direction: SwipeDirection,
    /// Horizontal displacement from the first touch of the session.
    pub delta_x: f32,
    /// Vertical displacement from the first touch of the session.
    pub delta_y: f32,
}

/// Drag of the touch centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressMove {
    pub delta_x: f32,
    pub delta_y: f32,
}

/// Two-finger rotation relative to the session start, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotate {
    pub angle: f32,
}

/// Two-finger scale relative to the session start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pinch {
    pub scale: f32,
}

/// A classified gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Swipe(Swipe),
    PressMove(PressMove),
    Pinch(Pinch),
    Rotate(Rotate),
    Tap,
    DoubleTap,
}

impl GestureEvent {
    /// The kind flag matching this event.
    #[must_use]
    pub const fn kind(&self) -> GestureKinds {
        match self {
            Self::Swipe(_) => GestureKinds::SWIPE,
            Self::PressMove(_) => GestureKinds::PRESS_MOVE,
            Self::Pinch(_) => GestureKinds::PINCH,
            Self::Rotate(_) => GestureKinds::ROTATE,
            Self::Tap => GestureKinds::TAP,
            Self::DoubleTap => GestureKinds::DOUBLE_TAP,
        }
    }

    /// Swipe payload, if this is a swipe.
    #[must_use]
    pub const fn as_swipe(&self) -> Option<&Swipe> {
        match self {
            Self::Swipe(s) => Some(s),
            _ => None,
        }
    }
}
