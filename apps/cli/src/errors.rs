use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
///
/// Pipeline stages degrade-and-continue on flaky LLM calls; this type covers
/// the failures that *are* surfaced to the caller: bad input, an impossible
/// tournament topology, or an unwritable report directory.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Report error: {0}")]
    Report(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
