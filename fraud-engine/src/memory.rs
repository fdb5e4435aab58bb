//! In-memory collaborator implementations
//!
//! Backing stores for tests, demos and embedding before real storage is
//! wired in. All of them are cheap to clone-share behind `Arc` and safe
//! under concurrent assessments.

use crate::error::Result;
use crate::repository::{
    AssessmentStore, BlacklistRepository, HistoryRepository, ProfileRepository,
};
use crate::types::{
    AccountProfile, LoginRecord, RiskAssessment, TransactionContext, TransactionRecord,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::{DashMap, DashSet};
use parking_lot::RwLock;
use uuid::Uuid;

/// In-memory transaction and login history
#[derive(Debug, Default)]
pub struct InMemoryHistoryRepository {
    transactions: DashMap<String, Vec<TransactionRecord>>,
    logins: DashMap<String, Vec<LoginRecord>>,
}

impl InMemoryHistoryRepository {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one transaction for `user_id`
    pub fn record_transaction(&self, user_id: &str, record: TransactionRecord) {
        self.transactions
            .entry(user_id.to_string())
            .or_default()
            .push(record);
    }

    /// Record one login for `user_id`
    pub fn record_login(&self, user_id: &str, record: LoginRecord) {
        self.logins
            .entry(user_id.to_string())
            .or_default()
            .push(record);
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn fetch_recent(
        &self,
        user_id: &str,
        window_days: i64,
    ) -> Result<Vec<TransactionRecord>> {
        let cutoff = Utc::now() - Duration::days(window_days);
        let mut rows: Vec<TransactionRecord> = self
            .transactions
            .get(user_id)
            .map(|rows| {
                rows.iter()
                    .filter(|t| t.timestamp >= cutoff)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        rows.sort_by_key(|t| t.timestamp);
        Ok(rows)
    }

    async fn fetch_recent_logins(
        &self,
        user_id: &str,
        limit: usize,
        window_days: i64,
    ) -> Result<Vec<LoginRecord>> {
        let cutoff = Utc::now() - Duration::days(window_days);
        let mut rows: Vec<LoginRecord> = self
            .logins
            .get(user_id)
            .map(|rows| {
                rows.iter()
                    .filter(|l| l.timestamp >= cutoff)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        rows.sort_by_key(|l| std::cmp::Reverse(l.timestamp));
        rows.truncate(limit);
        Ok(rows)
    }
}

/// In-memory account profiles
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: DashMap<String, AccountProfile>,
}

impl InMemoryProfileRepository {
    /// Create an empty profile store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the profile for `user_id`
    pub fn insert(&self, user_id: &str, profile: AccountProfile) {
        self.profiles.insert(user_id.to_string(), profile);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn fetch_account_profile(&self, user_id: &str) -> Result<Option<AccountProfile>> {
        Ok(self.profiles.get(user_id).map(|p| p.value().clone()))
    }
}

/// In-memory account and IP blacklists
#[derive(Debug, Default)]
pub struct InMemoryBlacklistRepository {
    accounts: DashSet<String>,
    ips: DashSet<String>,
}

impl InMemoryBlacklistRepository {
    /// Create empty blacklists
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account number to the blacklist
    pub fn ban_account(&self, account: &str) {
        self.accounts.insert(account.to_string());
    }

    /// Add an IP address to the blacklist
    pub fn ban_ip(&self, ip: &str) {
        self.ips.insert(ip.to_string());
    }
}

#[async_trait]
impl BlacklistRepository for InMemoryBlacklistRepository {
    async fn is_account_blacklisted(&self, account: &str) -> Result<bool> {
        Ok(self.accounts.contains(account))
    }

    async fn is_ip_blacklisted(&self, ip: &str) -> Result<bool> {
        Ok(self.ips.contains(ip))
    }
}

/// One persisted audit row
#[derive(Debug, Clone)]
pub struct AuditRecord {
    /// Store-assigned record identity
    pub record_id: Uuid,
    /// The decision as returned to the caller
    pub assessment: RiskAssessment,
    /// The transaction the decision was made for
    pub context: TransactionContext,
    /// When the row was appended
    pub recorded_at: DateTime<Utc>,
}

/// In-memory append-only audit store
#[derive(Debug, Default)]
pub struct InMemoryAssessmentStore {
    records: RwLock<Vec<AuditRecord>>,
}

impl InMemoryAssessmentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of appended records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Snapshot of all appended records
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.read().clone()
    }
}

#[async_trait]
impl AssessmentStore for InMemoryAssessmentStore {
    async fn append(
        &self,
        assessment: &RiskAssessment,
        ctx: &TransactionContext,
    ) -> Result<()> {
        self.records.write().push(AuditRecord {
            record_id: Uuid::new_v4(),
            assessment: assessment.clone(),
            context: ctx.clone(),
            recorded_at: Utc::now(),
        });
        Ok(())
    }
}
