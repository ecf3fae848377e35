use crate::domain::errors::ChartError;
use crate::domain::logging::{LogComponent, LogEntry, LogLevel, Logger};
use crate::domain::resources::ErrorSink;
use crate::log_error;
use chrono::Utc;

/// Stderr logger with a minimum level filter
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new_development() -> Self {
        Self { min_level: LogLevel::Debug }
    }

    pub fn new_production() -> Self {
        Self { min_level: LogLevel::Info }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        eprintln!(
            "{} [{}] [{}] {}",
            Utc::now().format("%H:%M:%S%.3f"),
            entry.level,
            entry.component,
            entry.message
        );
    }
}

/// Error sink that forwards gateway failures to the logging facade.
/// Hosts that navigate on error supply their own sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingErrorSink;

impl ErrorSink for LoggingErrorSink {
    fn report(&self, error: &ChartError) {
        log_error!(LogComponent::Infrastructure("ErrorSink"), "{}", error);
    }
}
