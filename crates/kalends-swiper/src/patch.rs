#![forbid(unsafe_code)]

//! Structured output of the controller.
//!
//! A [`ViewPatch`] lists only what changed. Slot and offset updates are
//! ordered `(slot, value)` pairs; scalar fields are `None` when untouched.
//! Merging a later patch over an earlier one keeps the later value per slot
//! and per field.

use kalends_grid::DateKey;

use crate::cursor::ViewType;
use crate::slots::{SlotContent, SlotIndex};

/// New contents for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotUpdate {
    pub index: SlotIndex,
    pub content: SlotContent,
}

/// New vertical offset for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetUpdate {
    pub index: SlotIndex,
    pub top: i32,
}

/// Diff consumed by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewPatch {
    pub slots: Vec<SlotUpdate>,
    pub offsets: Vec<OffsetUpdate>,
    /// Slot now showing the current page.
    pub active_slot: Option<SlotIndex>,
    /// Slot the swiper should move to by itself.
    pub swiper_target: Option<SlotIndex>,
    pub selected: Option<DateKey>,
    pub view_type: Option<ViewType>,
    /// Whether the change should be animated.
    pub animate: Option<bool>,
    /// Whether slot edges should be clipped (week mode).
    pub hide_edge: Option<bool>,
}

impl ViewPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Set slot `index`, replacing an earlier update of the same slot.
    pub fn set_slot(&mut self, index: SlotIndex, content: SlotContent) {
        match self.slots.iter_mut().find(|u| u.index == index) {
            Some(update) => update.content = content,
            None => self.slots.push(SlotUpdate { index, content }),
        }
    }

    /// Set the offset of slot `index`, replacing an earlier update.
    pub fn set_offset(&mut self, index: SlotIndex, top: i32) {
        match self.offsets.iter_mut().find(|u| u.index == index) {
            Some(update) => update.top = top,
            None => self.offsets.push(OffsetUpdate { index, top }),
        }
    }

    /// The update for slot `index`, if any.
    #[must_use]
    pub fn slot(&self, index: SlotIndex) -> Option<&SlotContent> {
        self.slots
            .iter()
            .find(|u| u.index == index)
            .map(|u| &u.content)
    }

    #[must_use]
    pub fn offset(&self, index: SlotIndex) -> Option<i32> {
        self.offsets.iter().find(|u| u.index == index).map(|u| u.top)
    }

    /// Apply `later` on top of `self`.
    pub fn merge(&mut self, later: Self) {
        for update in later.slots {
            self.set_slot(update.index, update.content);
        }
        for update in later.offsets {
            self.set_offset(update.index, update.top);
        }
        self.active_slot = later.active_slot.or(self.active_slot);
        self.swiper_target = later.swiper_target.or(self.swiper_target);
        self.selected = later.selected.or(self.selected);
        self.view_type = later.view_type.or(self.view_type);
        self.animate = later.animate.or(self.animate);
        self.hide_edge = later.hide_edge.or(self.hide_edge);
    }
}

/// Domain events for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum CalendarEvent {
    /// A selection settled on `date`.
    Change { date: DateKey },
    /// The view switched between month and week.
    ViewGranularityChanged { view: ViewType },
}

/// Result of one controller operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Update {
    pub patch: ViewPatch,
    pub events: Vec<CalendarEvent>,
}

impl Update {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patch.is_empty() && self.events.is_empty()
    }

    /// Apply `later` on top of `self`; events are appended in order.
    pub fn merge(&mut self, later: Self) {
        self.patch.merge(later.patch);
        self.events.extend(later.events);
    }
}

impl From<ViewPatch> for Update {
    fn from(patch: ViewPatch) -> Self {
        Self {
            patch,
            events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch() {
        assert!(ViewPatch::default().is_empty());
        assert!(Update::default().is_empty());
    }

    #[test]
    fn later_slot_update_replaces_earlier() {
        let mut patch = ViewPatch::default();
        patch.set_slot(SlotIndex::ONE, SlotContent::Empty);
        patch.set_offset(SlotIndex::ONE, -95);
        patch.set_offset(SlotIndex::ONE, -190);
        assert_eq!(patch.slots.len(), 1);
        assert_eq!(patch.offsets.len(), 1);
        assert_eq!(patch.offset(SlotIndex::ONE), Some(-190));
        assert_eq!(patch.offset(SlotIndex::TWO), None);
    }

    #[test]
    fn merge_keeps_untouched_fields() {
        let mut first = ViewPatch {
            active_slot: Some(SlotIndex::ONE),
            animate: Some(true),
            ..ViewPatch::default()
        };
        first.merge(ViewPatch {
            animate: Some(false),
            view_type: Some(ViewType::Week),
            ..ViewPatch::default()
        });
        assert_eq!(first.active_slot, Some(SlotIndex::ONE));
        assert_eq!(first.animate, Some(false));
        assert_eq!(first.view_type, Some(ViewType::Week));
    }

    #[test]
    fn update_merge_appends_events() {
        let date = DateKey::new(2023, 9, 1).unwrap();
        let mut update = Update {
            events: vec![CalendarEvent::Change { date }],
            ..Update::default()
        };
        update.merge(Update {
            events: vec![CalendarEvent::ViewGranularityChanged {
                view: ViewType::Week,
            }],
            ..Update::default()
        });
        assert_eq!(update.events.len(), 2);
        assert_eq!(update.events[0], CalendarEvent::Change { date });
    }
}
