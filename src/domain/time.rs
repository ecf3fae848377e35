use super::chart::value_objects::DateRange;
use super::resources::{Day, ResourceSeries, Timestamp};
use chrono::Utc;
use std::cell::Cell;
use std::collections::BTreeSet;

pub const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;
pub const MILLIS_PER_HOUR: u64 = 60 * 60 * 1000;

/// Domain abstraction for "now". Passed explicitly wherever current time
/// matters (cache expiry, empty date ranges) so tests can freeze it.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(Utc::now().timestamp_millis().max(0) as u64)
    }
}

/// Settable clock for tests
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<u64>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self { now: Cell::new(now.value()) }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now.value());
    }

    pub fn advance_millis(&self, millis: u64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.now.get())
    }
}

/// Truncate an instant to the UTC midnight of its calendar day
pub fn start_of_day(t: Timestamp) -> Day {
    Day::from(t.value() - t.value() % MILLIS_PER_DAY)
}

/// True iff both instants, interpreted in UTC, fall on the same
/// year/month/day
pub fn same_calendar_day(a: Timestamp, b: Timestamp) -> bool {
    start_of_day(a) == start_of_day(b)
}

/// Union of `start_of_day` over all metric keys of all series,
/// deduplicated, ascending. Pure function of its input.
pub fn unique_days(series: &[&ResourceSeries]) -> Vec<Day> {
    let days: BTreeSet<Day> =
        series.iter().flat_map(|s| s.points.keys().map(|t| start_of_day(*t))).collect();
    days.into_iter().collect()
}

/// Min/max over an iterator of days. Degenerates to `{now, now}` for empty
/// input - documented behavior, not an error.
pub fn date_range(days: impl IntoIterator<Item = Day>, clock: &dyn Clock) -> DateRange {
    let mut iter = days.into_iter();
    match iter.next() {
        None => {
            let now = clock.now();
            DateRange { start: now, end: now }
        }
        Some(first) => {
            let (mut min, mut max) = (first, first);
            for day in iter {
                if day < min {
                    min = day;
                }
                if day > max {
                    max = day;
                }
            }
            DateRange { start: min.as_timestamp(), end: max.as_timestamp() }
        }
    }
}

/// Non-negative absolute difference in hours, fractional allowed
pub fn hours_between(a: Timestamp, b: Timestamp) -> f64 {
    a.value().abs_diff(b.value()) as f64 / MILLIS_PER_HOUR as f64
}

/// Shift a UTC-midnight day by the host's local offset (minutes, as the
/// host reports it: positive west of UTC) so that a renderer which
/// re-applies local-time semantics still displays the same calendar day.
/// The engine itself keeps UTC end-to-end; this is a compensating
/// transform for hosts that do not.
pub fn add_timezone_offset(day: Day, offset_minutes: i32) -> Timestamp {
    let shifted = day.value() as i64 + i64::from(offset_minutes) * 60_000;
    Timestamp::from_millis(shifted.max(0) as u64)
}
