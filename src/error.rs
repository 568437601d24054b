// src/error.rs
use thiserror::Error;

/// Everything that can abort a single investigation run.
///
/// None of these are fatal to the process: the caller reports the error and
/// the next run starts from scratch.
#[derive(Debug, Error)]
pub enum Error {
    /// The form input was rejected before any request was made.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network failure or a non-success HTTP status from the ledger API.
    #[error("failed to fetch transaction history: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The ledger API answered with a payload that does not match the
    /// wallet snapshot shape.
    #[error("malformed ledger payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// An aggregate was requested over zero transaction records.
    #[error("address has no transactions to aggregate")]
    EmptyDataset,

    /// The blocking analysis task panicked or was cancelled.
    #[error("analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
