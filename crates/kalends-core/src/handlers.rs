#![forbid(unsafe_code)]

//! Typed gesture callback table.
//!
//! A consumer registers plain functions per gesture kind. Each handler gets
//! the gesture payload by reference and the consumer's context by `&mut`;
//! nothing is bound implicitly. The set of registered handlers also decides
//! which gesture kinds the classifier bothers to track.
//!
//! ```
//! use kalends_core::gesture_event::{GestureEvent, GestureKinds, Swipe};
//! use kalends_core::handlers::GestureHandlers;
//!
//! #[derive(Default)]
//! struct Counter {
//!     swipes: usize,
//! }
//!
//! fn on_swipe(_: &Swipe, ctx: &mut Counter) {
//!     ctx.swipes += 1;
//! }
//!
//! let handlers = GestureHandlers::new().on_swipe(on_swipe);
//! assert_eq!(handlers.requested(), GestureKinds::SWIPE);
//!
//! let mut ctx = Counter::default();
//! handlers.dispatch(&GestureEvent::Tap, &mut ctx);
//! assert_eq!(ctx.swipes, 0);
//! ```

use crate::gesture::{GestureClassifier, GestureConfig};
use crate::gesture_event::{GestureEvent, GestureKinds, Pinch, PressMove, Rotate, Swipe};

/// Handler receiving a gesture payload and the context.
pub type Handler<E, C> = fn(&E, &mut C);

/// Handler for payload-less gestures.
pub type BareHandler<C> = fn(&mut C);

/// One optional handler per gesture kind.
pub struct GestureHandlers<C> {
    pub swipe: Option<Handler<Swipe, C>>,
    pub pressmove: Option<Handler<PressMove, C>>,
    pub pinch: Option<Handler<Pinch, C>>,
    pub rotate: Option<Handler<Rotate, C>>,
    pub tap: Option<BareHandler<C>>,
    pub doubletap: Option<BareHandler<C>>,
}

impl<C> Default for GestureHandlers<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for GestureHandlers<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for GestureHandlers<C> {}

impl<C> std::fmt::Debug for GestureHandlers<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureHandlers")
            .field("requested", &self.requested())
            .finish()
    }
}

impl<C> GestureHandlers<C> {
    /// An empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            swipe: None,
            pressmove: None,
            pinch: None,
            rotate: None,
            tap: None,
            doubletap: None,
        }
    }

    #[must_use]
    pub fn on_swipe(mut self, f: Handler<Swipe, C>) -> Self {
        self.swipe = Some(f);
        self
    }

    #[must_use]
    pub fn on_pressmove(mut self, f: Handler<PressMove, C>) -> Self {
        self.pressmove = Some(f);
        self
    }

    #[must_use]
    pub fn on_pinch(mut self, f: Handler<Pinch, C>) -> Self {
        self.pinch = Some(f);
        self
    }

    #[must_use]
    pub fn on_rotate(mut self, f: Handler<Rotate, C>) -> Self {
        self.rotate = Some(f);
        self
    }

    #[must_use]
    pub fn on_tap(mut self, f: BareHandler<C>) -> Self {
        self.tap = Some(f);
        self
    }

    #[must_use]
    pub fn on_doubletap(mut self, f: BareHandler<C>) -> Self {
        self.doubletap = Some(f);
        self
    }

    /// Gesture kinds that have a registered handler.
    #[must_use]
    pub fn requested(&self) -> GestureKinds {
        let mut kinds = GestureKinds::empty();
        kinds.set(GestureKinds::SWIPE, self.swipe.is_some());
        kinds.set(GestureKinds::PRESS_MOVE, self.pressmove.is_some());
        kinds.set(GestureKinds::PINCH, self.pinch.is_some());
        kinds.set(GestureKinds::ROTATE, self.rotate.is_some());
        kinds.set(GestureKinds::TAP, self.tap.is_some());
        kinds.set(GestureKinds::DOUBLE_TAP, self.doubletap.is_some());
        kinds
    }

    /// A classifier that tracks exactly the registered gesture kinds.
    #[must_use]
    pub fn classifier(&self, config: GestureConfig) -> GestureClassifier {
        GestureClassifier::new(config.with_kinds(self.requested()))
    }

    /// Route one gesture to its handler. Returns whether a handler ran.
    pub fn dispatch(&self, event: &GestureEvent, ctx: &mut C) -> bool {
        match event {
            GestureEvent::Swipe(e) => call(self.swipe, e, ctx),
            GestureEvent::PressMove(e) => call(self.pressmove, e, ctx),
            GestureEvent::Pinch(e) => call(self.pinch, e, ctx),
            GestureEvent::Rotate(e) => call(self.rotate, e, ctx),
            GestureEvent::Tap => call_bare(self.tap, ctx),
            GestureEvent::DoubleTap => call_bare(self.doubletap, ctx),
        }
    }

    /// Route a batch of gestures in order.
    pub fn dispatch_all(&self, events: &[GestureEvent], ctx: &mut C) {
        for event in events {
            self.dispatch(event, ctx);
        }
    }
}

fn call<E, C>(handler: Option<Handler<E, C>>, event: &E, ctx: &mut C) -> bool {
    handler.map(|f| f(event, ctx)).is_some()
}

fn call_bare<C>(handler: Option<BareHandler<C>>, ctx: &mut C) -> bool {
    handler.map(|f| f(ctx)).is_some()
}
