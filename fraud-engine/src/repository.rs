//! Collaborator interfaces consumed by the engine
//!
//! The engine never owns storage. History, profile and blacklist data are
//! read through these traits, and finished assessments are appended through
//! [`AssessmentStore`]. Implementations live with the surrounding services;
//! [`crate::memory`] provides in-memory versions for tests and demos.

use crate::error::Result;
use crate::types::{
    AccountProfile, LoginRecord, RiskAssessment, TransactionContext, TransactionRecord,
};
use async_trait::async_trait;

/// Read access to a user's transaction and login history
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Transactions for `user_id` over the trailing `window_days`,
    /// oldest first
    async fn fetch_recent(
        &self,
        user_id: &str,
        window_days: i64,
    ) -> Result<Vec<TransactionRecord>>;

    /// Most recent logins for `user_id`, newest first, at most `limit`
    /// rows over the trailing `window_days`
    async fn fetch_recent_logins(
        &self,
        user_id: &str,
        limit: usize,
        window_days: i64,
    ) -> Result<Vec<LoginRecord>>;
}

/// Read access to account profiles
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Profile for `user_id`; `Ok(None)` when no account exists
    async fn fetch_account_profile(&self, user_id: &str) -> Result<Option<AccountProfile>>;
}

/// Read access to account and IP blacklists
#[async_trait]
pub trait BlacklistRepository: Send + Sync {
    /// Whether the destination account is blacklisted
    async fn is_account_blacklisted(&self, account: &str) -> Result<bool>;

    /// Whether the IP address is blacklisted
    async fn is_ip_blacklisted(&self, ip: &str) -> Result<bool>;
}

/// Append-only audit sink for finished assessments. Best-effort: failures
/// are logged by the caller and never affect the returned decision.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Persist one assessment together with the context it was made for
    async fn append(
        &self,
        assessment: &RiskAssessment,
        ctx: &TransactionContext,
    ) -> Result<()>;
}
