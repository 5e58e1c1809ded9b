#![forbid(unsafe_code)]

//! A calendar widget: gesture classifier plus swiper controller.
//!
//! Horizontal paging is handled by the host's swiper and reported through
//! [`CalendarWidget::navigate`]. Touches on the calendar body go through
//! [`CalendarWidget::handle_touch`]: a vertical swipe that followed a
//! press-move in the same gesture toggles between month and week view.

use kalends_core::gesture_event::{PressMove, Swipe};
use kalends_core::{GestureClassifier, GestureHandlers, TouchEvent};
use kalends_grid::{DateKey, DayRole, GridCache, GridSource};
use web_time::Instant;

use crate::config::CalendarConfig;
use crate::controller::{NavigationCommand, SwiperController};
use crate::error::NavigationError;
use crate::patch::{Update, ViewPatch};

/// Context handed to the gesture handlers.
#[derive(Debug)]
pub struct WidgetState<S: GridSource = GridCache> {
    pub controller: SwiperController<S>,
    pressmoved: bool,
    pending: Vec<Update>,
}

fn on_pressmove<S: GridSource>(_: &PressMove, state: &mut WidgetState<S>) {
    state.pressmoved = true;
}

fn on_swipe<S: GridSource>(swipe: &Swipe, state: &mut WidgetState<S>) {
    if !state.pressmoved {
        return;
    }
    let update = state.controller.toggle_granularity(swipe.direction);
    if !update.is_empty() {
        state.pending.push(update);
    }
    state.pressmoved = false;
}

/// One calendar instance driven by touch input and swiper reports.
#[derive(Debug)]
pub struct CalendarWidget<S: GridSource = GridCache> {
    classifier: GestureClassifier,
    handlers: GestureHandlers<WidgetState<S>>,
    state: WidgetState<S>,
}

impl CalendarWidget {
    /// A widget with its own grid cache.
    #[must_use]
    pub fn new(config: CalendarConfig) -> Self {
        Self::with_controller(SwiperController::new(config))
    }
}

impl<S: GridSource> CalendarWidget<S> {
    #[must_use]
    pub fn with_controller(controller: SwiperController<S>) -> Self {
        let handlers = GestureHandlers::new()
            .on_pressmove(on_pressmove::<S>)
            .on_swipe(on_swipe::<S>);
        let classifier = handlers.classifier(controller.config().gesture.clone());
        Self {
            classifier,
            handlers,
            state: WidgetState {
                controller,
                pressmoved: false,
                pending: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn controller(&self) -> &SwiperController<S> {
        &self.state.controller
    }

    pub fn controller_mut(&mut self) -> &mut SwiperController<S> {
        &mut self.state.controller
    }

    #[must_use]
    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Whether the ongoing gesture has press-moved without a swipe yet.
    #[must_use]
    pub fn is_pressmoved(&self) -> bool {
        self.state.pressmoved
    }

    /// Feed one raw touch event. Returns the updates it caused, in order.
    pub fn handle_touch(&mut self, event: &TouchEvent, now: Instant) -> Vec<Update> {
        let gestures = self.classifier.process(event, now);
        self.handlers.dispatch_all(&gestures, &mut self.state);
        if !self.classifier.is_active() {
            self.state.pressmoved = false;
        }
        std::mem::take(&mut self.state.pending)
    }

    pub fn attach(&mut self) -> Update {
        self.state.controller.attach()
    }

    pub fn set_value(&mut self, value: &str) -> Update {
        self.state.controller.set_value(value)
    }

    pub fn navigate(&mut self, command: NavigationCommand) -> Result<Update, NavigationError> {
        self.state.controller.navigate(command)
    }

    pub fn select_day(&mut self, date: DateKey, role: DayRole) -> Update {
        self.state.controller.select_day(date, role)
    }

    #[must_use]
    pub fn transition_end(&self) -> ViewPatch {
        self.state.controller.transition_end()
    }
}
