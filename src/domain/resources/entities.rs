pub use super::value_objects::{Color, ResourceId, ResourceKind, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Domain entity - a charted resource (project or organization).
/// Immutable once fetched; the engine keys everything off `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub name: String,
    pub color: Color,
}

impl Resource {
    pub fn new(id: ResourceId, kind: ResourceKind, name: String, color: Color) -> Self {
        Self { id, kind, name, color }
    }
}

/// A single role change inside an accepted recommendation.
/// `new_role = None` means the role was removed outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAction {
    pub affected_account: String,
    pub previous_role: String,
    pub new_role: Option<String>,
}

/// Domain entity - an accepted recommendation. Keyed in the series by its
/// exact accept instant; millisecond collisions are disambiguated upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEvent {
    pub actor: String,
    pub actions: Vec<RoleAction>,
    pub impact: f64,
}

/// Domain entity - a resource's fetched time series: day-keyed binding
/// counts plus timestamped recommendation events. Read-only inside the
/// engine; overwritten wholesale on re-fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceSeries {
    /// Day-start timestamp (UTC midnight, ms) -> metric value
    pub points: BTreeMap<Timestamp, f64>,
    /// Exact accept instant (ms) -> event
    pub events: BTreeMap<Timestamp, RecommendationEvent>,
}

impl ResourceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_point(mut self, at: Timestamp, value: f64) -> Self {
        self.points.insert(at, value);
        self
    }

    pub fn with_event(mut self, at: Timestamp, event: RecommendationEvent) -> Self {
        self.events.insert(at, event);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.events.is_empty()
    }
}
