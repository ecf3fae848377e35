mod common;

use access_chart::infrastructure::TimeBoundedCache;
use common::{fixed_clock, rid, series};

const MINUTE_MS: u64 = 60_000;

#[test]
fn entry_visible_before_six_hours() {
    let clock = fixed_clock();
    let mut cache = TimeBoundedCache::new(clock.clone());
    cache.put(rid("p1"), series(&[(common::jun(1), 100.0)]));

    clock.advance_millis(5 * 60 * MINUTE_MS + 59 * MINUTE_MS);
    assert!(cache.has(&rid("p1")));
    assert!(cache.get(&rid("p1")).is_some());
}

#[test]
fn entry_expired_at_exactly_six_hours() {
    let clock = fixed_clock();
    let mut cache = TimeBoundedCache::new(clock.clone());
    cache.put(rid("p1"), series(&[(common::jun(1), 100.0)]));

    // The predicate is strictly `< 6h`, so the boundary itself is stale
    clock.advance_millis(6 * 60 * MINUTE_MS);
    assert!(!cache.has(&rid("p1")));
    assert!(cache.get(&rid("p1")).is_none());
}

#[test]
fn entry_expired_after_six_hours() {
    let clock = fixed_clock();
    let mut cache = TimeBoundedCache::new(clock.clone());
    cache.put(rid("p1"), series(&[(common::jun(1), 100.0)]));

    clock.advance_millis(6 * 60 * MINUTE_MS + MINUTE_MS);
    assert!(!cache.has(&rid("p1")));
}

#[test]
fn stale_entry_stays_stored_until_overwritten() {
    let clock = fixed_clock();
    let mut cache = TimeBoundedCache::new(clock.clone());
    cache.put(rid("p1"), series(&[(common::jun(1), 100.0)]));

    clock.advance_millis(7 * 60 * MINUTE_MS);
    // Invisible to readers but still physically present
    assert!(cache.get(&rid("p1")).is_none());
    assert_eq!(cache.len(), 1);

    // A later put overwrites and re-stamps
    cache.put(rid("p1"), series(&[(common::jun(2), 200.0)]));
    assert_eq!(cache.len(), 1);
    let fresh = cache.get(&rid("p1")).expect("fresh entry");
    assert_eq!(fresh.points.len(), 1);
}

#[test]
fn absent_id_is_a_plain_miss() {
    let clock = fixed_clock();
    let cache = TimeBoundedCache::new(clock);
    assert!(!cache.has(&rid("nope")));
    assert!(cache.get(&rid("nope")).is_none());
}
