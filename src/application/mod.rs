pub mod chart_service;

pub use chart_service::ChartService;
