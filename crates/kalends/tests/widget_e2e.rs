//! Whole-widget flows through the facade: touches in, patches and events out.

use std::time::Duration;

use kalends::prelude::*;
use kalends::{GridBuilder, GridCache, SlotIndex};
use web_time::Instant;

fn today() -> DateKey {
    DateKey::new(2023, 9, 14).unwrap()
}

fn widget(value: &str) -> CalendarWidget {
    let cache = GridCache::with_clock(GridBuilder::default(), today);
    let controller = SwiperController::with_source_and_clock(
        CalendarConfig::default().with_value(value),
        cache,
        today,
    );
    CalendarWidget::with_controller(controller)
}

fn vertical_drag(w: &mut CalendarWidget, from: f32, to: f32) -> Vec<Update> {
    let t0 = Instant::now();
    let mut out = w.handle_touch(&TouchEvent::start(vec![TouchPoint::new(1, 50.0, from)]), t0);
    for (i, y) in [from + (to - from) / 3.0, from + 2.0 * (to - from) / 3.0]
        .into_iter()
        .enumerate()
    {
        out.extend(w.handle_touch(
            &TouchEvent::moved(vec![TouchPoint::new(1, 50.0, y)]),
            t0 + Duration::from_millis(16 * (i as u64 + 1)),
        ));
    }
    out.extend(w.handle_touch(
        &TouchEvent::end(vec![TouchPoint::new(1, 50.0, to)], vec![]),
        t0 + Duration::from_millis(64),
    ));
    out
}

#[test]
fn browse_months_switch_to_week_and_pick_a_day() -> Result<()> {
    let mut w = widget("2023-9-14");
    let attach = w.attach();
    assert!(attach.events.is_empty());
    assert_eq!(attach.patch.view_type, Some(ViewType::Month));

    // Page forward twice.
    let mut selected = Vec::new();
    for slot in [1, 2] {
        for event in w.navigate(NavigationCommand::touch(slot))?.events {
            if let CalendarEvent::Change { date } = event {
                selected.push(date.to_string());
            }
        }
    }
    assert_eq!(selected, vec!["2023-10-14", "2023-11-14"]);

    // Drag up: week view of 14 November.
    let updates = vertical_drag(&mut w, 500.0, 300.0);
    assert_eq!(updates.len(), 1);
    assert_eq!(
        updates[0].events,
        vec![CalendarEvent::ViewGranularityChanged {
            view: ViewType::Week
        }]
    );
    let end = w.transition_end();
    assert_eq!(end.hide_edge, Some(true));

    // Pick Sunday of that week.
    let sunday: DateKey = "2023-11-12".parse()?;
    let pick = w.select_day(sunday, DayRole::Current);
    assert_eq!(pick.patch.selected, Some(sunday));
    assert_eq!(w.controller().cursor().next_week.to_string(), "2023-11-19");

    // Drag down: back to November.
    let updates = vertical_drag(&mut w, 300.0, 500.0);
    assert_eq!(updates[0].patch.view_type, Some(ViewType::Month));
    assert_eq!(w.controller().cursor().current_month.to_string(), "2023-11");
    assert_eq!(w.controller().selected(), sunday);
    Ok(())
}

#[test]
fn bad_slot_surfaces_as_facade_error() {
    let mut w = widget("2023-9-14");
    w.attach();
    let err: Error = w.navigate(NavigationCommand::touch(9)).unwrap_err().into();
    assert!(err.to_string().contains("slot index 9"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn external_value_changes_emit_change() {
    let mut w = widget("2023-9-14");
    w.attach();
    let update = w.set_value("2024-2-29");
    assert_eq!(
        update.events,
        vec![CalendarEvent::Change {
            date: "2024-2-29".parse().unwrap()
        }]
    );
    let active = w.controller().cursor().active;
    assert_eq!(
        update
            .patch
            .slot(active)
            .and_then(|c| c.grid())
            .map(|g| g.total_days()),
        Some(29)
    );
    assert_eq!(active, SlotIndex::ZERO);
}
