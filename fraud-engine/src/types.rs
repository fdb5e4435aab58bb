//! Core types for the fraud engine

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Risk score (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RiskScore(u8);

impl RiskScore {
    /// Create new risk score (0-100)
    pub fn new(score: u8) -> Self {
        Self(score.min(100))
    }

    /// Create from a raw accumulated sum, clamping at 100
    pub fn from_raw(raw: u32) -> Self {
        Self(raw.min(100) as u8)
    }

    /// Get raw score
    pub fn score(&self) -> u8 {
        self.0
    }

    /// Check if critical risk (>= 80)
    pub fn is_critical_risk(&self) -> bool {
        self.0 >= 80
    }

    /// Check if high risk (60-79)
    pub fn is_high_risk(&self) -> bool {
        (60..80).contains(&self.0)
    }

    /// Check if medium risk (30-59)
    pub fn is_medium_risk(&self) -> bool {
        (30..60).contains(&self.0)
    }

    /// Check if low risk (< 30)
    pub fn is_low_risk(&self) -> bool {
        self.0 < 30
    }
}

/// Risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Low risk
    Low,
    /// Medium risk
    Medium,
    /// High risk
    High,
    /// Critical risk
    Critical,
}

impl From<RiskScore> for RiskLevel {
    fn from(score: RiskScore) -> Self {
        if score.is_critical_risk() {
            RiskLevel::Critical
        } else if score.is_high_risk() {
            RiskLevel::High
        } else if score.is_medium_risk() {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Action recommended for a transaction assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedAction {
    /// Let the transaction proceed
    Approve,
    /// Challenge with a one-time password before proceeding
    RequireOtp,
    /// Hold for manual review
    Review,
    /// Reject the transaction
    Decline,
}

/// Additional verification step attached to a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStep {
    /// One-time password over SMS
    SmsOtp,
    /// Government-issued document check
    DocumentVerification,
    /// Confirm the new device out of band
    DeviceVerification,
    /// Confirm the unusual location out of band
    LocationConfirmation,
}

/// Transaction channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    /// Mobile app
    Mobile,
    /// Web app
    Web,
    /// USSD session
    Ussd,
    /// Point-of-sale terminal
    Pos,
    /// ATM
    Atm,
    /// Partner API
    Api,
}

/// Transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Account-to-account transfer
    Transfer,
    /// Inbound deposit
    Deposit,
    /// Cash or wallet withdrawal
    Withdrawal,
    /// Bill payment
    BillPayment,
    /// Airtime purchase
    AirtimePurchase,
    /// Card payment
    CardPayment,
}

/// KYC verification status of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    /// No documents submitted
    Unverified,
    /// Documents submitted, awaiting review
    Pending,
    /// Fully verified
    Verified,
    /// Verification rejected
    Rejected,
}

/// Lifecycle status of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Account in good standing
    Active,
    /// Temporarily suspended
    Suspended,
    /// Frozen pending investigation
    Frozen,
    /// Closed
    Closed,
}

/// Geographic point with optional country code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// ISO country code, when known
    pub country: Option<String>,
}

impl GeoPoint {
    /// Create a point without a country code
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            country: None,
        }
    }

    /// Create a point with a country code
    pub fn with_country(lat: f64, lon: f64, country: &str) -> Self {
        Self {
            lat,
            lon,
            country: Some(country.to_string()),
        }
    }
}

/// Immutable input describing one transaction under assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionContext {
    /// User initiating the transaction
    pub user_id: String,
    /// Funding account
    pub account_id: String,
    /// Transaction amount (NGN, minor-unit safe)
    pub amount: Decimal,
    /// Transaction type
    pub transaction_type: TransactionType,
    /// Destination account number, for transfers
    pub recipient_account: Option<String>,
    /// Destination bank code, for transfers
    pub recipient_bank: Option<String>,
    /// Where the transaction originated, when known
    pub location: Option<GeoPoint>,
    /// Device fingerprint reported by the client
    pub device_fingerprint: String,
    /// Originating IP address
    pub ip_address: String,
    /// Client user agent
    pub user_agent: String,
    /// Channel the transaction came through
    pub channel: Channel,
    /// When the transaction was submitted; also the evaluation instant
    /// for every window and age computation during assessment
    pub timestamp: DateTime<Utc>,
}

/// One historical transaction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction amount
    pub amount: Decimal,
    /// Transaction type
    pub transaction_type: TransactionType,
    /// Channel used
    pub channel: Channel,
    /// Destination account, for transfers
    pub recipient_account: Option<String>,
    /// Origin location, when captured
    pub location: Option<GeoPoint>,
    /// Device fingerprint seen
    pub device_fingerprint: String,
    /// User agent seen
    pub user_agent: String,
    /// Originating IP address
    pub ip_address: String,
    /// When the transaction happened
    pub timestamp: DateTime<Utc>,
}

/// One historical login row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRecord {
    /// IP address the login came from
    pub ip_address: String,
    /// User agent presented
    pub user_agent: String,
    /// Login location, when captured
    pub location: Option<GeoPoint>,
    /// When the login happened
    pub timestamp: DateTime<Utc>,
}

/// Account profile as the engine needs it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// KYC verification status
    pub kyc_status: KycStatus,
    /// Account lifecycle status
    pub account_status: AccountStatus,
    /// When the account was opened
    pub account_created_at: DateTime<Utc>,
    /// Consecutive failed login attempts
    pub failed_login_attempts: u32,
}

/// Read-only snapshot of a user's recent activity, fetched once per
/// assessment
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    /// Transactions over the widest configured trailing window,
    /// oldest first
    pub transactions: Vec<TransactionRecord>,
    /// Account profile, `None` when the lookup found no account
    pub profile: Option<AccountProfile>,
}

impl HistorySnapshot {
    /// Transactions within `window` of the `reference` instant
    pub fn within(
        &self,
        reference: DateTime<Utc>,
        window: Duration,
    ) -> impl Iterator<Item = &TransactionRecord> {
        let cutoff = reference - window;
        self.transactions
            .iter()
            .filter(move |t| t.timestamp > cutoff && t.timestamp <= reference)
    }

    /// Transactions within the trailing `days` of the `reference` instant
    pub fn within_days(
        &self,
        reference: DateTime<Utc>,
        days: i64,
    ) -> impl Iterator<Item = &TransactionRecord> {
        self.within(reference, Duration::days(days))
    }
}

/// Risk assessment for one transaction. Immutable once produced; written
/// once to the audit store, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Clamped risk score
    pub risk_score: RiskScore,
    /// Risk level
    pub risk_level: RiskLevel,
    /// Reasons that fired, in assessor evaluation order
    pub flagged_reasons: Vec<String>,
    /// Recommended action
    pub recommended_action: RecommendedAction,
    /// Additional verification steps to require
    pub additional_verification: BTreeSet<VerificationStep>,
    /// Evaluation instant (the context timestamp)
    pub assessed_at: DateTime<Utc>,
}

/// Login event under takeover analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginContext {
    /// IP address the login came from
    pub ip_address: String,
    /// User agent presented
    pub user_agent: String,
    /// Device fingerprint, when the client reports one
    pub device_fingerprint: Option<String>,
    /// Login location, when captured
    pub location: Option<GeoPoint>,
}

/// Action recommended after login analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TakeoverAction {
    /// Let the login proceed
    Allow,
    /// Require email confirmation
    RequireEmailVerification,
    /// Require a second factor
    #[serde(rename = "REQUIRE_2FA")]
    RequireTwoFactor,
    /// Lock the account
    BlockAccount,
}

/// Result of account-takeover analysis for one login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoverAssessment {
    /// Accumulated risk score; deliberately not clamped
    pub risk_score: u32,
    /// Risk factors that fired, in evaluation order
    pub risk_factors: Vec<String>,
    /// Whether the login is suspicious (score >= 40)
    pub is_suspicious: bool,
    /// Recommended action
    pub recommended_action: TakeoverAction,
}

/// Alert level for pattern monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    /// Nothing anomalous
    Low,
    /// Anomaly worth watching
    Medium,
    /// Immediate attention needed
    High,
}

/// Transient result of real-time pattern monitoring; not persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAlert {
    /// Alert descriptions, in check order
    pub alerts: Vec<String>,
    /// Overall alert level
    pub risk_level: AlertLevel,
}
