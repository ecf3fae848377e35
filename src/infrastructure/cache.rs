use crate::domain::resources::{ResourceId, ResourceSeries, Timestamp};
use crate::domain::time::{Clock, hours_between};
use std::collections::HashMap;
use std::rc::Rc;

/// Entries are invisible to readers after 6 hours
pub const CACHE_TTL_HOURS: f64 = 6.0;

struct CacheEntry {
    value: ResourceSeries,
    inserted_at: Timestamp,
}

/// Keyed series store with read-time expiry. One instance per resource
/// kind. No sweeper: a stale entry stays physically stored until the next
/// `put` overwrites it.
pub struct TimeBoundedCache {
    entries: HashMap<ResourceId, CacheEntry>,
    clock: Rc<dyn Clock>,
}

impl TimeBoundedCache {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self { entries: HashMap::new(), clock }
    }

    /// Entry exists and was inserted less than 6 hours ago
    pub fn has(&self, id: &ResourceId) -> bool {
        self.entries
            .get(id)
            .is_some_and(|e| hours_between(e.inserted_at, self.clock.now()) < CACHE_TTL_HOURS)
    }

    /// The cached series iff still fresh; never panics
    pub fn get(&self, id: &ResourceId) -> Option<&ResourceSeries> {
        if !self.has(id) {
            return None;
        }
        self.entries.get(id).map(|e| &e.value)
    }

    /// Unconditional upsert stamped with the current time
    pub fn put(&mut self, id: ResourceId, value: ResourceSeries) {
        let inserted_at = self.clock.now();
        self.entries.insert(id, CacheEntry { value, inserted_at });
    }

    /// Physically stored entries, fresh or stale
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
