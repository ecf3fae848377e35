use super::entities::ResourceSeries;
use super::value_objects::{ResourceId, ResourceKind};
use crate::domain::errors::{ChartError, ChartResult};
use futures::future::LocalBoxFuture;

/// Interface for fetching a resource's raw time series. The gateway call is
/// the engine's only true suspension point; any error resolution is treated
/// as a `FetchFailure`.
pub trait SeriesGateway {
    fn fetch_series(
        &self,
        id: &ResourceId,
        kind: ResourceKind,
    ) -> LocalBoxFuture<'static, ChartResult<ResourceSeries>>;
}

/// External error-reporting collaborator. The engine forwards fetch
/// failures here instead of navigating or crashing.
pub trait ErrorSink {
    fn report(&self, error: &ChartError);
}
