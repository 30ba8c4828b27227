//! Result of the asynchronous fetch-and-store step.

use crate::ports::errors::FetchError;

/// Outcome of saving one image, consumed exactly once by the placeholder protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The image is stored; `reference` is what the embed markup should point at.
    Saved { reference: String },
    /// The image could not be stored.
    Failed { reason: String },
}

impl From<Result<String, FetchError>> for FetchOutcome {
    fn from(result: Result<String, FetchError>) -> Self {
        match result {
            Ok(reference) => FetchOutcome::Saved { reference },
            Err(err) => FetchOutcome::Failed {
                reason: err.to_string(),
            },
        }
    }
}
