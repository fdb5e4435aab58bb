//! Risk assessors
//!
//! Each assessor is a pure function of the transaction context and the
//! prefetched history snapshot, emitting zero or more [`crate::Signal`]s.
//! The orchestrator evaluates them in a fixed order: Amount → Velocity →
//! Location → Device → Behavioral → Account → Blacklist → Heuristic.

pub mod account;
pub mod amount;
pub mod behavioral;
pub mod blacklist;
pub mod device;
pub mod heuristic;
pub mod location;
pub mod velocity;

pub use account::{AccountAssessment, AccountRiskAssessor};
pub use amount::AmountRiskAssessor;
pub use behavioral::BehavioralRiskAssessor;
pub use blacklist::{BlacklistChecker, BlacklistHits};
pub use device::DeviceRiskAssessor;
pub use heuristic::{HeuristicModel, ThresholdHeuristic};
pub use location::LocationRiskAssessor;
pub use velocity::VelocityRiskAssessor;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::{
        Channel, HistorySnapshot, TransactionContext, TransactionRecord, TransactionType,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;

    pub(crate) fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    pub(crate) fn base_context() -> TransactionContext {
        TransactionContext {
            user_id: "user-1".to_string(),
            account_id: "acct-1".to_string(),
            amount: Decimal::from(52_500),
            transaction_type: TransactionType::Transfer,
            recipient_account: None,
            recipient_bank: None,
            location: None,
            device_fingerprint: "fp-1".to_string(),
            ip_address: "105.112.33.7".to_string(),
            user_agent: "VaultPay/3.1 Android".to_string(),
            channel: Channel::Mobile,
            timestamp: noon(),
        }
    }

    pub(crate) fn record_at(timestamp: DateTime<Utc>) -> TransactionRecord {
        TransactionRecord {
            amount: Decimal::from(48_500),
            transaction_type: TransactionType::Transfer,
            channel: Channel::Mobile,
            recipient_account: None,
            location: None,
            device_fingerprint: "fp-1".to_string(),
            user_agent: "VaultPay/3.1 Android".to_string(),
            ip_address: "105.112.33.7".to_string(),
            timestamp,
        }
    }

    pub(crate) fn snapshot(transactions: Vec<TransactionRecord>) -> HistorySnapshot {
        HistorySnapshot {
            transactions,
            profile: None,
        }
    }
}
