use thiserror::Error;

use crate::ai::AiError;

/// Failure of the recipe generation call.
///
/// Fatal to the current submission: no recipe is shown and nothing is
/// recorded in history. Never retried automatically.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Recipe generation request failed: {0}")]
    Request(#[from] AiError),

    #[error("Recipe response did not match the expected shape: {0}")]
    InvalidShape(String),
}

/// Failure of the recipe summarization call.
///
/// Non-fatal: an already-obtained recipe stays valid without a summary.
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Recipe summarization request failed: {0}")]
    Request(#[from] AiError),

    #[error("Summary response did not match the expected shape: {0}")]
    InvalidShape(String),
}

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("History file is corrupt: {0}")]
    Corrupt(String),
}
