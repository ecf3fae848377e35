/// Simplified error system - no over-engineering!
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The gateway resolved to an explicit error instead of a series.
    /// Recovered locally: pending state is cleared and the error is
    /// forwarded to the external sink.
    FetchFailure(String),
    /// Upstream delta is inconsistent with matrix state (e.g. removing a
    /// resource with no matching columns). Programmer error, never
    /// papered over.
    InvariantViolation(String),
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartError::FetchFailure(msg) => write!(f, "Fetch Failure: {}", msg),
            ChartError::InvariantViolation(msg) => write!(f, "Invariant Violation: {}", msg),
        }
    }
}

impl std::error::Error for ChartError {}

// Simple convenience type alias
pub type ChartResult<T> = Result<T, ChartError>;
