pub mod cache;
pub mod gateway;
pub mod services;

pub use cache::TimeBoundedCache;
pub use gateway::InMemoryGateway;
