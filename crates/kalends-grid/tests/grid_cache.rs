//! Cache behaviour across builders, clocks and shared handles.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use kalends_grid::{
    CalendarValue, DateKey, DayRole, FestivalTables, GridBuilder, GridCache, GridSource,
    LunarDate, MonthKey, SharedGridCache,
};

fn month(s: &str) -> MonthKey {
    s.parse().unwrap()
}

fn date(s: &str) -> DateKey {
    s.parse().unwrap()
}

#[test]
fn neighbours_of_a_month_are_cached_independently() {
    let mut cache = GridCache::with_clock(GridBuilder::default(), || date("2023-9-14"));
    let current = cache.get(month("2023-9"));
    let prev = cache.get(current.prev_month_key());
    let next = cache.get(current.next_month_key());

    assert_eq!(prev.month_key(), month("2023-8"));
    assert_eq!(next.month_key(), month("2023-10"));
    assert_eq!(cache.len(), 3);

    // Swiping forward reuses two of the three.
    let again = cache.get(next.prev_month_key());
    assert!(Arc::ptr_eq(&again, &current));
    assert_eq!(cache.stats().misses, 3);
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn builder_runs_once_per_month() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    let builder = GridBuilder::new(|_y: i32, _m: u32, _d: u32| {
        CALLS.fetch_add(1, Ordering::Relaxed);
        LunarDate::default()
    });
    let mut cache = GridCache::with_clock(builder, || date("2023-1-1"));
    let first = cache.get(month("2023-9"));
    let calls = CALLS.load(Ordering::Relaxed);
    assert_eq!(calls, first.len());
    cache.get(month("2023-9"));
    assert_eq!(CALLS.load(Ordering::Relaxed), calls);
}

#[test]
fn today_mark_is_frozen_at_build_time() {
    let day = Arc::new(AtomicUsize::new(14));
    let clock_day = Arc::clone(&day);
    let mut cache = GridCache::with_clock(GridBuilder::default(), move || {
        MonthKey::new(2023, 9)
            .unwrap()
            .clamp_day(clock_day.load(Ordering::Relaxed) as u32)
    });
    let grid = cache.get(month("2023-9"));
    day.store(15, Ordering::Relaxed);
    let again = cache.get(month("2023-9"));
    let marked: Vec<u32> = again.days().iter().filter(|d| d.is_today).map(|d| d.day).collect();
    assert_eq!(marked, vec![14]);
    assert!(Arc::ptr_eq(&grid, &again));
}

#[test]
fn shared_cache_serves_trait_objects() {
    let shared = SharedGridCache::new(GridCache::with_clock(
        GridBuilder::default().with_festivals(FestivalTables::empty()),
        || date("2024-2-29"),
    ));
    let mut sources: Vec<Box<dyn GridSource>> = vec![Box::new(shared.clone()), Box::new(shared.clone())];
    let a = sources[0].grid(month("2024-2"));
    let b = sources[1].grid(month("2024-2"));
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.total_days(), 29);
    assert!(a.days().iter().any(|d| d.is_today && d.role == DayRole::Current));
    assert!(a.days().iter().all(|d| d.label.is_none()));
}

#[test]
fn calendar_value_selects_the_grid() {
    let today = date("2023-9-14");
    let mut cache = GridCache::with_clock(GridBuilder::default(), move || today);
    for (input, expected) in [
        (Some("2023-7-4"), "2023-7"),
        (Some("2023-07"), "2023-7"),
        (Some("garbage"), "2023-9"),
        (None, "2023-9"),
    ] {
        let value = CalendarValue::parse_or_today(input, today);
        assert_eq!(cache.get(value.month_key()).month_key(), month(expected), "{input:?}");
    }
}

#[cfg(feature = "serde")]
#[test]
fn grids_serialize_with_string_keys() {
    let mut cache = GridCache::with_clock(GridBuilder::default(), || date("2023-10-1"));
    let grid = cache.get(month("2023-10"));
    let json = serde_json::to_value(&grid).unwrap();
    assert_eq!(json["month_key"], "2023-10");
    assert_eq!(json["prev_month_key"], "2023-9");
    assert_eq!(json["days"][0]["date_key"], "2023-10-1");
    assert_eq!(json["days"][0]["role"], "current");
    assert_eq!(json["days"][0]["is_today"], true);
    assert_eq!(json["days"][0]["label"], "国庆节");

    let back: kalends_grid::MonthGrid = serde_json::from_value(json).unwrap();
    assert_eq!(&back, grid.as_ref());
}
