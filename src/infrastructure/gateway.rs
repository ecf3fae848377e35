use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::resources::{ResourceId, ResourceKind, ResourceSeries, SeriesGateway};
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Deterministic gateway backed by preloaded responses. Resolution is
/// immediate; suspension-order scenarios are driven by channel-backed
/// gateways in the tests.
#[derive(Default)]
pub struct InMemoryGateway {
    responses: RefCell<HashMap<ResourceId, ChartResult<ResourceSeries>>>,
    calls: Cell<usize>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: ResourceId, response: ChartResult<ResourceSeries>) {
        self.responses.borrow_mut().insert(id, response);
    }

    /// Gateway round-trips so far (cache hits never reach the gateway)
    pub fn call_count(&self) -> usize {
        self.calls.get()
    }
}

impl SeriesGateway for InMemoryGateway {
    fn fetch_series(
        &self,
        id: &ResourceId,
        _kind: ResourceKind,
    ) -> LocalBoxFuture<'static, ChartResult<ResourceSeries>> {
        self.calls.set(self.calls.get() + 1);
        let response = self.responses.borrow().get(id).cloned().unwrap_or_else(|| {
            Err(ChartError::FetchFailure(format!("no series for {}", id.value())))
        });
        futures::future::ready(response).boxed_local()
    }
}
