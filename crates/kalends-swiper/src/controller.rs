#![forbid(unsafe_code)]

//! Month/week navigation over the three-slot buffer.
//!
//! [`SwiperController`] owns the [`Cursor`], the [`SlotBuffer`] and a grid
//! source. Every operation mutates that state and returns an [`Update`]:
//! the [`ViewPatch`] the renderer applies plus the domain events to forward.
//!
//! # Slot Placement
//!
//! The current page sits at `cursor.active`, the previous page at its `prev`
//! sibling and the next page at its `next` sibling. When the swiper lands on
//! a sibling, that sibling becomes active and only the slot behind it (one
//! step further in the same direction) is rebuilt.
//!
//! # Swiper Protocol
//!
//! The host reports a page change with [`SwiperController::swiper_changed`]
//! as soon as the swiper switches pages, and [`SwiperController::swiper_settled`]
//! when the animation ends. The selection only follows a page change that
//! came from a touch drag: programmatic moves (including the pivot started by
//! [`SwiperController::select_day`]) resolve their selection themselves.
//!
//! # Invariants
//! 1. The three slots hold the previous, current and next page relative to
//!    the cursor, at `active.prev`, `active` and `active.next`.
//! 2. In month mode every vertical offset is 0.
//! 3. `Change` events are only emitted once attached.

use std::sync::Arc;

use kalends_core::SwipeDirection;
use kalends_grid::{CalendarValue, DateKey, DayRole, GridCache, GridSource, MonthGrid, MonthKey};

use crate::config::CalendarConfig;
use crate::cursor::{Cursor, ViewType};
use crate::error::NavigationError;
use crate::patch::{CalendarEvent, Update, ViewPatch};
use crate::slots::{SlotBuffer, SlotContent, SlotIndex, Step, WeekSlice};

/// What moved the swiper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransitionSource {
    /// A user drag.
    Touch,
    /// Anything else: autoplay or a slot change requested by the controller.
    #[default]
    Programmatic,
}

/// A page change reported by the swiper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationCommand {
    /// Raw slot index as reported by the swiper.
    pub slot: usize,
    pub source: TransitionSource,
}

impl NavigationCommand {
    #[must_use]
    pub const fn touch(slot: usize) -> Self {
        Self {
            slot,
            source: TransitionSource::Touch,
        }
    }

    #[must_use]
    pub const fn programmatic(slot: usize) -> Self {
        Self {
            slot,
            source: TransitionSource::Programmatic,
        }
    }
}

/// Calendar state of one widget instance.
#[derive(Debug)]
pub struct SwiperController<S: GridSource = GridCache> {
    source: S,
    clock: fn() -> DateKey,
    config: CalendarConfig,
    cursor: Cursor,
    current_grid: Arc<MonthGrid>,
    buffer: SlotBuffer,
    selected: DateKey,
    watching: bool,
    changed: bool,
}

impl SwiperController {
    /// A controller with its own grid cache.
    #[must_use]
    pub fn new(config: CalendarConfig) -> Self {
        Self::with_source(config, GridCache::default())
    }
}

impl<S: GridSource> SwiperController<S> {
    /// A controller reading grids from `source`.
    #[must_use]
    pub fn with_source(config: CalendarConfig, source: S) -> Self {
        Self::with_source_and_clock(config, source, DateKey::today)
    }

    /// A controller reading grids from `source`, with "today" from `clock`.
    #[must_use]
    pub fn with_source_and_clock(
        config: CalendarConfig,
        mut source: S,
        clock: fn() -> DateKey,
    ) -> Self {
        let today = clock();
        let current_grid = source.grid(today.month_key());
        Self {
            source,
            clock,
            cursor: Cursor::at(today, config.view_type),
            config,
            current_grid,
            buffer: SlotBuffer::default(),
            selected: today,
            watching: false,
            changed: false,
        }
    }

    // -- accessors -------------------------------------------------------

    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[must_use]
    pub fn buffer(&self) -> &SlotBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    #[must_use]
    pub fn view_type(&self) -> ViewType {
        self.cursor.view_type
    }

    /// The selected date.
    #[must_use]
    pub fn selected(&self) -> DateKey {
        self.selected
    }

    /// The grid of the current month.
    #[must_use]
    pub fn current_grid(&self) -> &Arc<MonthGrid> {
        &self.current_grid
    }

    /// Whether [`attach`](Self::attach) ran.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.watching
    }

    /// Badge count configured for `date`.
    #[must_use]
    pub fn indicator(&self, date: DateKey) -> Option<u32> {
        self.config.indicators.get(&date.to_string()).copied()
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    // -- lifecycle -------------------------------------------------------

    /// Build the initial slots from the configured value and start watching
    /// for value changes. Emits no `Change` event.
    pub fn attach(&mut self) -> Update {
        self.watching = false;
        let value = self.config.value.clone();
        let mut update = self.watch_value(value.as_deref());
        self.watching = true;

        let view = self.cursor.view_type;
        update.patch.view_type = Some(view);
        update.patch.active_slot = Some(self.cursor.active);
        update.patch.hide_edge = Some(view.is_week());
        kalends_core::debug!(
            view = view.as_str(),
            selected = %self.selected,
            "calendar attached"
        );
        update
    }

    /// Apply an externally set value. Ignored until attached, and when the
    /// value already names the selected date.
    pub fn set_value(&mut self, value: &str) -> Update {
        self.config.value = Some(value.to_string());
        if !self.watching {
            return Update::default();
        }
        if let Ok(CalendarValue::Day(date)) = value.parse::<CalendarValue>()
            && date == self.selected
        {
            return Update::default();
        }
        self.watch_value(Some(value))
    }

    fn watch_value(&mut self, input: Option<&str>) -> Update {
        let today = (self.clock)();
        let date = match CalendarValue::parse_or_today(input, today) {
            CalendarValue::Day(date) => {
                self.cursor.current_day = date.day();
                date
            }
            CalendarValue::Month(month) => month.clamp_day(self.cursor.current_day),
        };
        let patch = match self.cursor.view_type {
            ViewType::Month => self.refresh_month_slots(date.month_key()),
            ViewType::Week => self.refresh_week_slots(date),
        };
        let mut update = Update::from(patch);
        let selected = self.auto_clamp_day();
        self.set_date(selected, &mut update);
        update
    }

    // -- month pages -----------------------------------------------------

    /// Make `month` current and point the month keys at its neighbours.
    pub fn set_month(&mut self, month: MonthKey) -> Arc<MonthGrid> {
        let grid = self.source.grid(month);
        self.cursor.current_month = grid.month_key();
        self.cursor.prev_month = grid.prev_month_key();
        self.cursor.next_month = grid.next_month_key();
        self.current_grid = Arc::clone(&grid);
        grid
    }

    /// Rebuild all three month slots around `month`.
    pub fn refresh_month_slots(&mut self, month: MonthKey) -> ViewPatch {
        let active = self.cursor.active;
        let current = self.set_month(month);
        let prev = self.source.grid(self.cursor.prev_month);
        let next = self.source.grid(self.cursor.next_month);

        let mut patch = ViewPatch::default();
        self.place(&mut patch, active, SlotContent::Month(current));
        self.place(&mut patch, active.step(Step::Prev), SlotContent::Month(prev));
        self.place(&mut patch, active.step(Step::Next), SlotContent::Month(next));
        patch
    }

    /// Rotate to the month page at slot `new`.
    pub fn change_month(&mut self, new: SlotIndex) -> ViewPatch {
        let Some(step) = self.cursor.active.step_to(new) else {
            return ViewPatch::default();
        };
        let mut patch = ViewPatch::default();

        let current = self.set_month(self.cursor.month(step));
        self.ensure(&mut patch, new, SlotContent::Month(current));
        let beyond = self.source.grid(self.cursor.month(step));
        self.place(&mut patch, new.step(step), SlotContent::Month(beyond));

        self.activate(&mut patch, new);
        patch
    }

    // -- week pages ------------------------------------------------------

    /// Make the week of `date` current: its month becomes the current
    /// month, the week keys move to `date ± 7` and the day of `date` is
    /// selected.
    pub fn set_week(&mut self, date: DateKey) -> WeekSlice {
        let grid = self.set_month(date.month_key());
        self.cursor.set_week_keys(date);
        self.cursor.current_day = date.day();
        WeekSlice::new(grid, date)
    }

    fn week_slice(&mut self, date: DateKey) -> WeekSlice {
        WeekSlice::new(self.source.grid(date.month_key()), date)
    }

    /// Rebuild all three week slots around the week of `date`.
    pub fn refresh_week_slots(&mut self, date: DateKey) -> ViewPatch {
        let active = self.cursor.active;
        let current = self.set_week(date);
        let prev = self.week_slice(self.cursor.prev_week);
        let next = self.week_slice(self.cursor.next_week);

        let mut patch = ViewPatch::default();
        self.place(&mut patch, active, SlotContent::Week(current));
        self.place(&mut patch, active.step(Step::Prev), SlotContent::Week(prev));
        self.place(&mut patch, active.step(Step::Next), SlotContent::Week(next));
        patch
    }

    /// Rotate to the week page at slot `new`.
    pub fn change_week(&mut self, new: SlotIndex) -> ViewPatch {
        let Some(step) = self.cursor.active.step_to(new) else {
            return ViewPatch::default();
        };
        let mut patch = ViewPatch::default();

        let current = self.set_week(self.cursor.week(step));
        self.ensure(&mut patch, new, SlotContent::Week(current));
        let beyond = self.week_slice(self.cursor.week(step));
        self.place(&mut patch, new.step(step), SlotContent::Week(beyond));

        self.activate(&mut patch, new);
        patch
    }

    // -- slot bookkeeping ------------------------------------------------

    fn place(&mut self, patch: &mut ViewPatch, index: SlotIndex, content: SlotContent) {
        if let SlotContent::Week(week) = &content {
            self.buffer.set_offset(index, week.top);
            patch.set_offset(index, week.top);
        }
        self.buffer.set(index, content.clone());
        patch.set_slot(index, content);
    }

    /// Place `content` unless the slot already shows that page.
    fn ensure(&mut self, patch: &mut ViewPatch, index: SlotIndex, content: SlotContent) {
        if !self.buffer.get(index).same_page(&content) {
            self.place(patch, index, content);
        }
    }

    fn activate(&mut self, patch: &mut ViewPatch, new: SlotIndex) {
        kalends_core::debug!(
            from = %self.cursor.active,
            to = %new,
            view = self.cursor.view_type.as_str(),
            month = %self.cursor.current_month,
            "slots rotated"
        );
        self.cursor.active = new;
        patch.active_slot = Some(new);
    }

    // -- swiper protocol -------------------------------------------------

    /// The swiper switched to slot `index`.
    pub fn swiper_changed(&mut self, index: usize) -> Result<Update, NavigationError> {
        let new = SlotIndex::new(index)?;
        let patch = match self.cursor.view_type {
            ViewType::Month => self.change_month(new),
            ViewType::Week => self.change_week(new),
        };
        if patch.active_slot.is_some() {
            self.changed = true;
        }
        Ok(patch.into())
    }

    /// The swiper animation ended. A touch-driven page change selects the
    /// current week (week mode) or the carried-over day of the new month.
    pub fn swiper_settled(&mut self, source: TransitionSource) -> Update {
        let mut update = Update::default();
        if self.changed {
            if source == TransitionSource::Touch {
                let date = match self.cursor.view_type {
                    ViewType::Week => self.cursor.current_week,
                    ViewType::Month => self.auto_clamp_day(),
                };
                self.set_date(date, &mut update);
            }
            self.changed = false;
        }
        update
    }

    /// Both swiper phases at once.
    pub fn navigate(&mut self, command: NavigationCommand) -> Result<Update, NavigationError> {
        let mut update = self.swiper_changed(command.slot)?;
        update.merge(self.swiper_settled(command.source));
        Ok(update)
    }

    /// A slide or granularity transition finished.
    pub fn transition_end(&self) -> ViewPatch {
        ViewPatch {
            hide_edge: Some(self.cursor.view_type.is_week()),
            ..ViewPatch::default()
        }
    }

    // -- selection -------------------------------------------------------

    /// Select `date`, a day shown with `role` on the current page.
    ///
    /// In month mode an adjacent-month day pivots the buffer to the sibling
    /// holding that month; the patch asks the swiper to follow with
    /// `swiper_target`. In week mode a day of the shown week only moves the
    /// week keys; a day from another month rebuilds the slots around `date`
    /// without animation.
    pub fn select_day(&mut self, date: DateKey, role: DayRole) -> Update {
        let mut update = Update::default();
        match self.cursor.view_type {
            ViewType::Week => {
                if role == DayRole::Current {
                    self.cursor.set_week_keys(date);
                } else {
                    let mut patch = self.refresh_week_slots(date);
                    patch.animate = Some(false);
                    update.patch = patch;
                }
            }
            ViewType::Month => {
                let step = match role {
                    DayRole::Current => None,
                    DayRole::Prev => Some(Step::Prev),
                    DayRole::Next => Some(Step::Next),
                };
                if let Some(step) = step {
                    let target = self.cursor.active.step(step);
                    let mut patch = self.change_month(target);
                    patch.swiper_target = Some(target);
                    patch.animate = Some(true);
                    update.patch = patch;
                }
                if self.cursor.current_month != date.month_key() {
                    update.patch.merge(self.refresh_month_slots(date.month_key()));
                }
            }
        }
        self.cursor.current_day = date.day();
        kalends_core::trace!(date = %date, role = role.as_str(), "day selected");
        self.set_date(date, &mut update);
        update
    }

    /// Clamp the carried-over day to the current month and return the
    /// resulting date.
    pub fn auto_clamp_day(&mut self) -> DateKey {
        let total = self.current_grid.total_days();
        if self.cursor.current_day > total {
            self.cursor.current_day = total;
        }
        self.cursor.current_month.clamp_day(self.cursor.current_day)
    }

    fn set_date(&mut self, date: DateKey, update: &mut Update) {
        self.selected = date;
        update.patch.selected = Some(date);
        if self.watching {
            update.events.push(CalendarEvent::Change { date });
        }
    }

    // -- granularity -----------------------------------------------------

    /// Switch granularity for a vertical swipe: up goes month → week at the
    /// selected date, down goes week → month at the current month. Anything
    /// else is a no-op.
    pub fn toggle_granularity(&mut self, direction: SwipeDirection) -> Update {
        let mut update = Update::default();
        let view = match (direction, self.cursor.view_type) {
            (SwipeDirection::Up, ViewType::Month) => {
                update.patch = self.refresh_week_slots(self.selected);
                ViewType::Week
            }
            (SwipeDirection::Down, ViewType::Week) => {
                let month = self.cursor.current_month;
                self.buffer.reset_offsets();
                update.patch = self.refresh_month_slots(month);
                for index in SlotIndex::ALL {
                    update.patch.set_offset(index, 0);
                }
                ViewType::Month
            }
            _ => return update,
        };
        self.cursor.view_type = view;
        update.patch.view_type = Some(view);
        update.patch.animate = Some(true);
        update
            .events
            .push(CalendarEvent::ViewGranularityChanged { view });
        kalends_core::debug!(view = view.as_str(), selected = %self.selected, "granularity switched");
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kalends_grid::GridBuilder;

    fn fixed_today() -> DateKey {
        DateKey::new(2023, 9, 14).unwrap()
    }

    fn date(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn controller(value: &str, view: ViewType) -> SwiperController {
        let config = CalendarConfig::default()
            .with_value(value)
            .with_view_type(view);
        let cache = GridCache::with_clock(GridBuilder::default(), fixed_today);
        let mut c = SwiperController::with_source_and_clock(config, cache, fixed_today);
        c.attach();
        c
    }

    fn month_at(c: &SwiperController, slot: SlotIndex) -> String {
        c.buffer()
            .get(slot)
            .grid()
            .map(|g| g.month_key().to_string())
            .unwrap_or_default()
    }

    fn assert_adjacent(c: &SwiperController) {
        let active = c.cursor().active;
        let cur = c.cursor();
        match cur.view_type {
            ViewType::Month => {
                assert_eq!(month_at(c, active), cur.current_month.to_string());
                assert_eq!(month_at(c, active.step(Step::Prev)), cur.prev_month.to_string());
                assert_eq!(month_at(c, active.step(Step::Next)), cur.next_month.to_string());
                assert_eq!(c.buffer().offsets(), [0, 0, 0]);
            }
            ViewType::Week => {
                for (slot, anchor) in [
                    (active, cur.current_week),
                    (active.step(Step::Prev), cur.prev_week),
                    (active.step(Step::Next), cur.next_week),
                ] {
                    let week = c.buffer().get(slot).as_week().unwrap();
                    assert!(week.contains(anchor), "slot {slot} misses {anchor}");
                    assert_eq!(c.buffer().offset(slot), week.top);
                }
            }
        }
    }

    #[test]
    fn attach_fills_month_slots_without_events() {
        let mut c = SwiperController::with_source_and_clock(
            CalendarConfig::default().with_value("2023-9-14"),
            GridCache::default(),
            fixed_today,
        );
        let update = c.attach();
        assert!(update.events.is_empty());
        assert_eq!(update.patch.slots.len(), 3);
        assert_eq!(update.patch.selected, Some(date("2023-9-14")));
        assert_eq!(update.patch.hide_edge, Some(false));
        assert_eq!(month_at(&c, SlotIndex::ZERO), "2023-9");
        assert_eq!(month_at(&c, SlotIndex::TWO), "2023-8");
        assert_eq!(month_at(&c, SlotIndex::ONE), "2023-10");
        assert_adjacent(&c);
    }

    #[test]
    fn missing_value_selects_today() {
        let c = controller("", ViewType::Month);
        assert_eq!(c.selected(), fixed_today());
    }

    #[test]
    fn month_value_selects_day_one() {
        let c = controller("2023-7", ViewType::Month);
        assert_eq!(c.selected(), date("2023-7-1"));
    }

    #[test]
    fn forward_then_back_restores_cursor() {
        let mut c = controller("2023-9-14", ViewType::Month);
        let before = *c.cursor();

        let forward = c.change_month(SlotIndex::ONE);
        assert_eq!(forward.active_slot, Some(SlotIndex::ONE));
        // Only the slot behind the new page is rebuilt.
        assert_eq!(forward.slots.len(), 1);
        assert_eq!(forward.slots[0].index, SlotIndex::TWO);
        assert_eq!(c.cursor().current_month.to_string(), "2023-10");
        assert_adjacent(&c);

        c.change_month(SlotIndex::ZERO);
        assert_eq!(c.cursor().current_month, before.current_month);
        assert_eq!(c.cursor().active, before.active);
        assert_adjacent(&c);
    }

    #[test]
    fn change_to_active_slot_is_noop() {
        let mut c = controller("2023-9-14", ViewType::Month);
        assert!(c.change_month(SlotIndex::ZERO).is_empty());
        assert!(c.change_week(SlotIndex::ZERO).is_empty());
    }

    #[test]
    fn touch_swipe_carries_day_and_clamps() {
        let mut c = controller("2023-1-31", ViewType::Month);
        let update = c.navigate(NavigationCommand::touch(1)).unwrap();
        assert_eq!(update.events, vec![CalendarEvent::Change {
            date: date("2023-2-28")
        }]);
        assert_eq!(c.cursor().current_day, 28);
    }

    #[test]
    fn clamp_in_leap_february() {
        let mut c = controller("2024-1-31", ViewType::Month);
        c.navigate(NavigationCommand::touch(1)).unwrap();
        assert_eq!(c.selected(), date("2024-2-29"));
    }

    #[test]
    fn programmatic_move_keeps_selection() {
        let mut c = controller("2023-9-14", ViewType::Month);
        let update = c.navigate(NavigationCommand::programmatic(2)).unwrap();
        assert!(update.events.is_empty());
        assert_eq!(c.selected(), date("2023-9-14"));
        assert_eq!(c.cursor().current_month.to_string(), "2023-8");
    }

    #[test]
    fn out_of_range_slot_is_an_error() {
        let mut c = controller("2023-9-14", ViewType::Month);
        assert_eq!(
            c.swiper_changed(3).unwrap_err(),
            NavigationError::SlotOutOfRange { index: 3 }
        );
        assert_adjacent(&c);
    }

    #[test]
    fn settle_without_change_does_nothing() {
        let mut c = controller("2023-9-14", ViewType::Month);
        assert!(c.swiper_settled(TransitionSource::Touch).is_empty());
    }

    #[test]
    fn week_mode_attach_sets_offsets() {
        let c = controller("2023-9-30", ViewType::Week);
        let active = c.cursor().active;
        assert_eq!(c.buffer().offset(active), -481);
        assert_eq!(c.cursor().prev_week, date("2023-9-23"));
        assert_eq!(c.cursor().next_week, date("2023-10-7"));
        assert_adjacent(&c);
    }

    #[test]
    fn week_swipe_crosses_month() {
        let mut c = controller("2023-9-30", ViewType::Week);
        let update = c.navigate(NavigationCommand::touch(1)).unwrap();
        assert_eq!(c.cursor().current_week, date("2023-10-7"));
        assert_eq!(c.cursor().current_month.to_string(), "2023-10");
        assert_eq!(update.patch.offset(SlotIndex::TWO), Some(-120));
        assert_eq!(c.selected(), date("2023-10-7"));
        assert_adjacent(&c);
    }

    #[test]
    fn week_mode_set_value_carries_day() {
        let mut c = controller("2023-9-30", ViewType::Week);
        let update = c.set_value("2023-11");
        assert_eq!(c.selected(), date("2023-11-30"));
        assert_eq!(update.events.len(), 1);
        assert_adjacent(&c);
    }

    #[test]
    fn select_adjacent_month_pivots() {
        let mut c = controller("2023-9-14", ViewType::Month);
        let update = c.select_day(date("2023-8-31"), DayRole::Prev);
        assert_eq!(update.patch.swiper_target, Some(SlotIndex::TWO));
        assert_eq!(update.patch.active_slot, Some(SlotIndex::TWO));
        assert_eq!(c.cursor().current_month.to_string(), "2023-8");
        assert_eq!(update.events, vec![CalendarEvent::Change {
            date: date("2023-8-31")
        }]);
        assert_adjacent(&c);

        // The swiper follows; nothing else happens.
        let follow = c.navigate(NavigationCommand::programmatic(2)).unwrap();
        assert!(follow.is_empty());
    }

    #[test]
    fn select_current_day_in_month_mode() {
        let mut c = controller("2023-9-14", ViewType::Month);
        let update = c.select_day(date("2023-9-3"), DayRole::Current);
        assert!(update.patch.slots.is_empty());
        assert_eq!(update.patch.selected, Some(date("2023-9-3")));
        assert_eq!(c.cursor().current_day, 3);
    }

    #[test]
    fn select_in_week_mode_is_instant() {
        let mut c = controller("2023-9-30", ViewType::Week);
        let update = c.select_day(date("2023-10-1"), DayRole::Next);
        assert_eq!(update.patch.animate, Some(false));
        assert_eq!(c.cursor().prev_week, date("2023-9-24"));
        assert_eq!(c.cursor().next_week, date("2023-10-8"));
        assert_adjacent(&c);
    }

    #[test]
    fn select_current_day_in_week_mode_keeps_slots() {
        let mut c = controller("2023-9-14", ViewType::Week);
        let update = c.select_day(date("2023-9-16"), DayRole::Current);
        assert!(update.patch.slots.is_empty());
        assert!(update.patch.offsets.is_empty());
        assert_eq!(update.patch.selected, Some(date("2023-9-16")));
        assert_eq!(c.cursor().current_week, date("2023-9-16"));
        assert_eq!(c.cursor().prev_week, date("2023-9-9"));
        assert_eq!(c.cursor().next_week, date("2023-9-23"));
        assert_adjacent(&c);
    }

    #[test]
    fn toggle_up_and_down() {
        let mut c = controller("2023-9-30", ViewType::Month);
        let up = c.toggle_granularity(SwipeDirection::Up);
        assert_eq!(up.patch.view_type, Some(ViewType::Week));
        assert_eq!(up.patch.animate, Some(true));
        assert_eq!(up.events, vec![CalendarEvent::ViewGranularityChanged {
            view: ViewType::Week
        }]);
        assert_adjacent(&c);

        assert!(c.toggle_granularity(SwipeDirection::Up).is_empty());

        let down = c.toggle_granularity(SwipeDirection::Down);
        assert_eq!(down.patch.view_type, Some(ViewType::Month));
        assert_eq!(down.patch.offsets.len(), 3);
        assert!(down.patch.offsets.iter().all(|o| o.top == 0));
        assert_adjacent(&c);
    }

    #[test]
    fn horizontal_swipe_never_toggles() {
        let mut c = controller("2023-9-30", ViewType::Month);
        assert!(c.toggle_granularity(SwipeDirection::Left).is_empty());
        assert_eq!(c.view_type(), ViewType::Month);
    }

    #[test]
    fn transition_end_hides_edges_in_week_mode() {
        let mut c = controller("2023-9-30", ViewType::Month);
        assert_eq!(c.transition_end().hide_edge, Some(false));
        c.toggle_granularity(SwipeDirection::Up);
        assert_eq!(c.transition_end().hide_edge, Some(true));
    }

    #[test]
    fn set_value_before_attach_is_deferred() {
        let mut c = SwiperController::with_source_and_clock(
            CalendarConfig::default(),
            GridCache::default(),
            fixed_today,
        );
        assert!(c.set_value("2023-7-4").is_empty());
        c.attach();
        assert_eq!(c.selected(), date("2023-7-4"));
    }

    #[test]
    fn set_value_same_date_is_ignored() {
        let mut c = controller("2023-9-14", ViewType::Month);
        assert!(c.set_value("2023-09-14").is_empty());
        let update = c.set_value("2023-12-25");
        assert_eq!(update.events, vec![CalendarEvent::Change {
            date: date("2023-12-25")
        }]);
    }

    #[test]
    fn indicators_pass_through() {
        let config = CalendarConfig::default().with_indicators(
            [("2023-9-8".to_string(), 2)].into_iter().collect(),
        );
        let c = SwiperController::with_source_and_clock(config, GridCache::default(), fixed_today);
        assert_eq!(c.indicator(date("2023-9-8")), Some(2));
        assert_eq!(c.indicator(date("2023-9-9")), None);
    }
}
