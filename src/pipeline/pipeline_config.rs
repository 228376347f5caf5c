use serde::{Deserialize, Serialize};

/// Strategy for handling errors during a normalization or reconciliation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorHandlingStrategy {
    /// Stop the run on the first error and return it
    StopOnFirstError,
    /// Skip the failed unit, collect its error and keep going
    ContinueOnError,
}

impl Default for ErrorHandlingStrategy {
    fn default() -> Self {
        ErrorHandlingStrategy::ContinueOnError
    }
}

impl ErrorHandlingStrategy {
    pub fn stops_on_error(&self) -> bool {
        matches!(self, ErrorHandlingStrategy::StopOnFirstError)
    }
}
