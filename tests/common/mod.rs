#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use access_chart::application::ChartService;
use access_chart::domain::errors::{ChartError, ChartResult};
use access_chart::domain::resources::{
    Color, ErrorSink, RecommendationEvent, Resource, ResourceId, ResourceKind, ResourceSeries,
    RoleAction, SeriesGateway, Timestamp,
};
use access_chart::domain::time::{Clock, FixedClock};
use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

pub const DAY_MS: u64 = 86_400_000;
pub const JUN_1: u64 = 1_717_200_000_000; // 2024-06-01T00:00:00Z

/// UTC midnight of June `day`, 2024, in milliseconds
pub fn jun(day: u64) -> u64 {
    JUN_1 + (day - 1) * DAY_MS
}

pub fn rid(id: &str) -> ResourceId {
    ResourceId::from(id)
}

pub fn project(id: &str) -> Resource {
    Resource::new(rid(id), ResourceKind::Project, id.to_uppercase(), Color::from("#4285f4"))
}

pub fn series(points: &[(u64, f64)]) -> ResourceSeries {
    let mut s = ResourceSeries::new();
    for (at, value) in points {
        s = s.with_point(Timestamp::from_millis(*at), *value);
    }
    s
}

pub fn replace_event(actor: &str, impact: f64) -> RecommendationEvent {
    RecommendationEvent {
        actor: actor.to_string(),
        actions: vec![RoleAction {
            affected_account: "bob@example.com".to_string(),
            previous_role: "roles/editor".to_string(),
            new_role: Some("roles/viewer".to_string()),
        }],
        impact,
    }
}

pub fn removal_event(actor: &str, impact: f64) -> RecommendationEvent {
    RecommendationEvent {
        actor: actor.to_string(),
        actions: vec![RoleAction {
            affected_account: "bob@example.com".to_string(),
            previous_role: "roles/owner".to_string(),
            new_role: None,
        }],
        impact,
    }
}

/// Error sink that records everything it receives
#[derive(Default)]
pub struct CollectingSink {
    pub reported: RefCell<Vec<ChartError>>,
}

impl ErrorSink for CollectingSink {
    fn report(&self, error: &ChartError) {
        self.reported.borrow_mut().push(error.clone());
    }
}

/// Gateway whose resolutions are driven explicitly through oneshot
/// channels, for suspension-order scenarios
pub struct ControlledGateway {
    pending: RefCell<HashMap<ResourceId, Vec<oneshot::Receiver<ChartResult<ResourceSeries>>>>>,
}

impl ControlledGateway {
    pub fn new() -> Self {
        Self { pending: RefCell::new(HashMap::new()) }
    }

    /// Arm one fetch for `id`; the returned sender resolves it
    pub fn expect(&self, id: &ResourceId) -> oneshot::Sender<ChartResult<ResourceSeries>> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().entry(id.clone()).or_default().push(rx);
        tx
    }
}

impl SeriesGateway for ControlledGateway {
    fn fetch_series(
        &self,
        id: &ResourceId,
        _kind: ResourceKind,
    ) -> LocalBoxFuture<'static, ChartResult<ResourceSeries>> {
        let rx = {
            let mut pending = self.pending.borrow_mut();
            match pending.get_mut(id) {
                Some(queue) if !queue.is_empty() => Some(queue.remove(0)),
                _ => None,
            }
        };
        match rx {
            Some(rx) => async move {
                rx.await.unwrap_or_else(|_| {
                    Err(ChartError::FetchFailure("gateway dropped".to_string()))
                })
            }
            .boxed_local(),
            None => futures::future::ready(Err(ChartError::FetchFailure(format!(
                "unexpected fetch for {}",
                id.value()
            ))))
            .boxed_local(),
        }
    }
}

pub fn fixed_clock() -> Rc<FixedClock> {
    Rc::new(FixedClock::new(Timestamp::from_millis(jun(10))))
}

pub fn service(
    gateway: Rc<dyn SeriesGateway>,
    clock: Rc<dyn Clock>,
) -> (ChartService, Rc<CollectingSink>) {
    let sink = Rc::new(CollectingSink::default());
    let service = ChartService::new(gateway, sink.clone(), clock);
    (service, sink)
}
