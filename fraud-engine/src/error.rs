//! Error types for the fraud engine

use std::time::Duration;
use thiserror::Error;

/// Fraud engine error
#[derive(Debug, Error)]
pub enum Error {
    /// Transaction/login history lookup failed
    #[error("history lookup failed: {0}")]
    History(String),

    /// Account profile lookup failed
    #[error("account profile lookup failed: {0}")]
    Profile(String),

    /// Blacklist lookup failed
    #[error("blacklist lookup failed: {0}")]
    Blacklist(String),

    /// Audit store append failed
    #[error("audit store append failed: {0}")]
    Audit(String),

    /// A collaborator call did not complete within the configured deadline
    #[error("collaborator call timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
