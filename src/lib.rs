pub mod application;
pub mod domain;
pub mod infrastructure;

use domain::logging::{LogComponent, get_logger};

/// Initialize the crate-wide logging facade. Idempotent; hosts that want
/// their own `Logger` should call `domain::logging::init_logger` instead.
pub fn initialize() {
    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new_development());
    domain::logging::init_logger(console_logger);

    get_logger().info(LogComponent::Application("Initialize"), "🚀 access-chart initialized");
}
