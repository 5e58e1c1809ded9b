#![forbid(unsafe_code)]

//! Multi-touch gesture classification.
//!
//! [`GestureClassifier`] turns raw [`TouchEvent`] streams into
//! [`GestureEvent`]s: swipe, press-move, pinch, rotate, tap and double-tap.
//!
//! # State Machine
//!
//! The classifier holds one [`GestureSession`]. It moves `Idle → Touching` on
//! the first `Start` and back to `Idle` once an `End`/`Cancel` leaves no touch
//! on the surface.
//!
//! - **Swipe**: decided on each lifted finger. The displacement between the
//!   lifted touch and the first touch of the session must reach
//!   `swipe_threshold` on either axis, within `swipe_velocity` of the session
//!   start (if a window is configured).
//! - **Press-move**: centroid of all touches minus the baseline centroid.
//! - **Pinch / rotate**: two-finger distance ratio and angle difference
//!   against the values recorded when the second finger went down.
//! - **Tap / double-tap**: purely time based; the host decides what a tap is.
//!
//! # Failure Modes
//!
//! - An `End` without changed touches classifies nothing (the session still
//!   ends if no touches remain).
//! - `Move` or `End` outside of a session is ignored.
//! - A second finger that first shows up in a `Move` has no pinch/rotate
//!   baseline, so no pinch or rotate is emitted for it.

use std::time::Duration;

use web_time::Instant;

use crate::gesture_event::{
    GestureEvent, GestureKinds, Pinch, PressMove, Rotate, Swipe, SwipeDirection,
};
use crate::touch::{Point, TouchEvent, TouchPhase, TouchPoint, centroid};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Environment variable overriding the swipe time window (`off` disables it).
pub const ENV_SWIPE_VELOCITY: &str = "KALENDS_SWIPE_VELOCITY_MS";
/// Environment variable overriding the swipe distance threshold.
pub const ENV_SWIPE_THRESHOLD: &str = "KALENDS_SWIPE_THRESHOLD_PX";
/// Environment variable overriding the double-tap window.
pub const ENV_DOUBLETAP_VELOCITY: &str = "KALENDS_DOUBLETAP_VELOCITY_MS";

const DEFAULT_SWIPE_VELOCITY: Duration = Duration::from_millis(500);
const DEFAULT_SWIPE_THRESHOLD: f32 = 10.0;
const DEFAULT_DOUBLETAP_VELOCITY: Duration = Duration::from_millis(500);

/// Thresholds and windows for gesture classification.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Maximum duration of a swipe (default: 500ms). `None` accepts swipes of
    /// any duration.
    pub swipe_velocity: Option<Duration>,
    /// Minimum displacement in pixels on the dominant axis (default: 10).
    pub swipe_threshold: f32,
    /// Maximum gap between two taps of a double-tap (default: 500ms).
    pub doubletap_velocity: Duration,
    /// Gesture kinds to classify (default: all).
    pub kinds: GestureKinds,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_velocity: Some(DEFAULT_SWIPE_VELOCITY),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            doubletap_velocity: DEFAULT_DOUBLETAP_VELOCITY,
            kinds: GestureKinds::all(),
        }
    }
}

impl GestureConfig {
    /// Replace the requested gesture kinds.
    #[must_use]
    pub fn with_kinds(mut self, kinds: GestureKinds) -> Self {
        self.kinds = kinds;
        self
    }

    /// Accept swipes of any duration.
    #[must_use]
    pub fn without_swipe_window(mut self) -> Self {
        self.swipe_velocity = None;
        self
    }

    /// Replace non-positive values with their defaults.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.swipe_velocity.is_some_and(|w| w.is_zero()) {
            self.swipe_velocity = Some(DEFAULT_SWIPE_VELOCITY);
        }
        if self.swipe_threshold.is_nan() || self.swipe_threshold <= 0.0 {
            self.swipe_threshold = DEFAULT_SWIPE_THRESHOLD;
        }
        if self.doubletap_velocity.is_zero() {
            self.doubletap_velocity = DEFAULT_DOUBLETAP_VELOCITY;
        }
        self
    }

    /// Defaults overridden from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = get_env(ENV_SWIPE_VELOCITY) {
            config.swipe_velocity = parse_window(&value);
        }
        if let Some(px) = get_env(ENV_SWIPE_THRESHOLD).and_then(|v| v.trim().parse::<f32>().ok())
        {
            config.swipe_threshold = px;
        }
        if let Some(ms) = get_env(ENV_DOUBLETAP_VELOCITY).and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.doubletap_velocity = Duration::from_millis(ms);
        }
        config.normalized()
    }
}

fn parse_window(value: &str) -> Option<Duration> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("off") || value.eq_ignore_ascii_case("false") {
        return None;
    }
    match value.parse::<u64>() {
        Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
        _ => Some(DEFAULT_SWIPE_VELOCITY),
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Bookkeeping for one continuous touch interaction.
///
/// Tap counters outlive the touch session: two taps are two sessions.
#[derive(Debug, Clone, Default)]
pub struct GestureSession {
    pub active: bool,
    pub start_time: Option<Instant>,
    pub start_touch: Option<TouchPoint>,
    pub start_center: Option<Point>,
    pub start_angle: Option<f32>,
    pub start_scale: Option<f32>,
    pub tap_count: u8,
    pub last_tap: Option<Instant>,
}

impl GestureSession {
    fn end_touching(&mut self) {
        self.active = false;
        self.start_time = None;
        self.start_touch = None;
        self.start_center = None;
        self.start_angle = None;
        self.start_scale = None;
    }
}

// ---------------------------------------------------------------------------
// GestureClassifier
// ---------------------------------------------------------------------------

/// Stateful classifier for one widget instance.
///
/// Feed raw events through [`process`](GestureClassifier::process) (or the
/// per-phase methods) and host taps through [`tap`](GestureClassifier::tap).
pub struct GestureClassifier {
    config: GestureConfig,
    session: GestureSession,
}

impl std::fmt::Debug for GestureClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureClassifier")
            .field("active", &self.session.active)
            .field("kinds", &self.config.kinds)
            .field("tap_count", &self.session.tap_count)
            .finish()
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureClassifier {
    /// Create a classifier with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config: config.normalized(),
            session: GestureSession::default(),
        }
    }

    /// Classify a raw touch event.
    pub fn process(&mut self, event: &TouchEvent, now: Instant) -> Vec<GestureEvent> {
        match event.phase {
            TouchPhase::Start => {
                self.start(&event.touches, now);
                Vec::new()
            }
            TouchPhase::Move => self.moved(&event.touches),
            TouchPhase::End => self.end(&event.changed, &event.touches, now),
            TouchPhase::Cancel => self.cancel(&event.changed, &event.touches, now),
        }
    }

    /// Fingers went down. `touches` are all touches now on the surface.
    pub fn start(&mut self, touches: &[TouchPoint], now: Instant) {
        let Some(first) = touches.first() else {
            return;
        };
        let kinds = self.config.kinds;
        let session = &mut self.session;
        session.active = true;

        if session.start_touch.is_none() {
            session.start_time = Some(now);
            session.start_touch = Some(*first);
            crate::trace!(id = first.id, x = first.x, y = first.y, "gesture session started");
        }

        if kinds.contains(GestureKinds::PRESS_MOVE) {
            session.start_center = centroid(touches);
        }

        if let [a, b, ..] = touches {
            if kinds.contains(GestureKinds::ROTATE) {
                session.start_angle = Some(a.point().angle_to(b.point()));
            }
            if kinds.contains(GestureKinds::PINCH) {
                session.start_scale = Some(a.point().distance(b.point()));
            }
        }
    }

    /// Fingers moved. `touches` are all touches now on the surface.
    pub fn moved(&mut self, touches: &[TouchPoint]) -> Vec<GestureEvent> {
        let mut out = Vec::with_capacity(3);
        if !self.session.active {
            return out;
        }
        let kinds = self.config.kinds;

        if kinds.contains(GestureKinds::PRESS_MOVE)
            && let (Some(base), Some(now_center)) = (self.session.start_center, centroid(touches))
        {
            out.push(GestureEvent::PressMove(PressMove {
                delta_x: now_center.x - base.x,
                delta_y: now_center.y - base.y,
            }));
        }

        if let [a, b, ..] = touches {
            if kinds.contains(GestureKinds::ROTATE)
                && let Some(start_angle) = self.session.start_angle
            {
                out.push(GestureEvent::Rotate(Rotate {
                    angle: start_angle - a.point().angle_to(b.point()),
                }));
            }
            if kinds.contains(GestureKinds::PINCH)
                && let Some(start_scale) = self.session.start_scale
                && start_scale > 0.0
            {
                out.push(GestureEvent::Pinch(Pinch {
                    scale: a.point().distance(b.point()) / start_scale,
                }));
            }
        }

        out
    }

    /// Fingers lifted. `changed` are the lifted touches, `remaining` the ones
    /// still down.
    pub fn end(
        &mut self,
        changed: &[TouchPoint],
        remaining: &[TouchPoint],
        now: Instant,
    ) -> Vec<GestureEvent> {
        let mut out = Vec::with_capacity(1);
        if !self.session.active {
            return out;
        }

        if self.config.kinds.contains(GestureKinds::SWIPE)
            && self.within_swipe_window(now)
            && let (Some(end_touch), Some(start_touch)) = (changed.first(), self.session.start_touch)
        {
            let delta_x = end_touch.x - start_touch.x;
            let delta_y = end_touch.y - start_touch.y;
            let threshold = self.config.swipe_threshold;
            if delta_x.abs() >= threshold || delta_y.abs() >= threshold {
                let direction = SwipeDirection::from_delta(delta_x, delta_y);
                crate::debug!(
                    direction = direction.as_str(),
                    delta_x,
                    delta_y,
                    "swipe classified"
                );
                out.push(GestureEvent::Swipe(Swipe {
                    direction,
                    delta_x,
                    delta_y,
                }));
            }
        }

        if remaining.is_empty() {
            self.session.end_touching();
            crate::trace!("gesture session ended");
        } else if self.config.kinds.contains(GestureKinds::PRESS_MOVE) {
            self.session.start_center = centroid(remaining);
        }

        out
    }

    /// Touch sequence interrupted by the host. Cleans up exactly like [`end`](Self::end).
    pub fn cancel(
        &mut self,
        changed: &[TouchPoint],
        remaining: &[TouchPoint],
        now: Instant,
    ) -> Vec<GestureEvent> {
        self.end(changed, remaining, now)
    }

    /// The host recognized a tap.
    ///
    /// Emits `DoubleTap` (if requested and the previous tap is recent enough)
    /// followed by `Tap` (if requested).
    pub fn tap(&mut self, now: Instant) -> Vec<GestureEvent> {
        let mut out = Vec::with_capacity(2);
        let kinds = self.config.kinds;

        if kinds.contains(GestureKinds::DOUBLE_TAP) {
            let window = self.config.doubletap_velocity;
            let session = &mut self.session;
            let recent = session
                .last_tap
                .is_some_and(|last| now.saturating_duration_since(last) <= window);
            if session.tap_count > 0 && recent {
                session.tap_count = 0;
                out.push(GestureEvent::DoubleTap);
            } else {
                session.tap_count = 1;
            }
            session.last_tap = Some(now);
        }

        if kinds.contains(GestureKinds::TAP) {
            out.push(GestureEvent::Tap);
        }

        out
    }

    /// Whether a touch session is in progress.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.active
    }

    /// Current session bookkeeping.
    #[inline]
    #[must_use]
    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    /// Drop all session and tap state.
    pub fn reset(&mut self) {
        self.session = GestureSession::default();
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config.normalized();
    }

    fn within_swipe_window(&self, now: Instant) -> bool {
        match (self.config.swipe_velocity, self.session.start_time) {
            (None, _) => true,
            (Some(window), Some(start)) => now.saturating_duration_since(start) <= window,
            (Some(_), None) => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
