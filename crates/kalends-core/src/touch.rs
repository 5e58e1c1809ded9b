#![forbid(unsafe_code)]

//! Raw touch input as delivered by the host.
//!
//! A continuous touch sequence is `Start → Move* → End | Cancel`. Every event
//! carries the touches still on the surface (`touches`) and the touches that
//! changed in this event (`changed`). For `End` and `Cancel`, `changed` holds
//! the lifted fingers and `touches` the ones that remain.

/// A point in surface coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle of the line `self → other` measured from the vertical axis, in degrees.
    #[must_use]
    pub fn angle_to(self, other: Self) -> f32 {
        (other.x - self.x).atan2(other.y - self.y).to_degrees()
    }
}

/// One finger on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub const fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    /// Position of this touch.
    #[inline]
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Centroid of a set of touches, or `None` when the set is empty.
#[must_use]
pub fn centroid(touches: &[TouchPoint]) -> Option<Point> {
    if touches.is_empty() {
        return None;
    }
    let (sx, sy) = touches
        .iter()
        .fold((0.0f32, 0.0f32), |(sx, sy), t| (sx + t.x, sy + t.y));
    let n = touches.len() as f32;
    Some(Point::new(sx / n, sy / n))
}

/// Phase of a raw touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A raw touch event.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Touches currently on the surface.
    pub touches: Vec<TouchPoint>,
    /// Touches that changed in this event.
    pub changed: Vec<TouchPoint>,
}

impl TouchEvent {
    /// A start event where `touches` are down and all of them are new.
    #[must_use]
    pub fn start(touches: Vec<TouchPoint>) -> Self {
        Self {
            phase: TouchPhase::Start,
            changed: touches.clone(),
            touches,
        }
    }

    /// A move event.
    #[must_use]
    pub fn moved(touches: Vec<TouchPoint>) -> Self {
        Self {
            phase: TouchPhase::Move,
            changed: touches.clone(),
            touches,
        }
    }

    /// An end event: `lifted` left the surface, `remaining` are still down.
    #[must_use]
    pub fn end(lifted: Vec<TouchPoint>, remaining: Vec<TouchPoint>) -> Self {
        Self {
            phase: TouchPhase::End,
            touches: remaining,
            changed: lifted,
        }
    }

    /// A cancel event. Handled exactly like [`TouchEvent::end`].
    #[must_use]
    pub fn cancel(lifted: Vec<TouchPoint>, remaining: Vec<TouchPoint>) -> Self {
        Self {
            phase: TouchPhase::Cancel,
            touches: remaining,
            changed: lifted,
        }
    }
}
