pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::{RecommendationEvent, Resource, ResourceSeries, RoleAction};
pub use repositories::{ErrorSink, SeriesGateway};
pub use value_objects::{Color, Day, ResourceId, ResourceKind, Timestamp};
