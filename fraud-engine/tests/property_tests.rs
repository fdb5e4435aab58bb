//! Property-based tests for engine invariants
//!
//! - Reported scores never leave 0..=100
//! - Level and action ladders are monotonic in the score
//! - Assessor contributions stay within their documented bounds

use chrono::{DateTime, Duration, TimeZone, Utc};
use fraud_engine::assessors::{AmountRiskAssessor, VelocityRiskAssessor};
use fraud_engine::orchestrator::recommended_action;
use fraud_engine::takeover::takeover_action;
use fraud_engine::{
    Channel, HistorySnapshot, RiskLevel, RiskScore, TransactionContext, TransactionRecord,
    TransactionType,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

fn context(amount: u32) -> TransactionContext {
    TransactionContext {
        user_id: "user-1".to_string(),
        account_id: "acct-1".to_string(),
        amount: Decimal::from(amount),
        transaction_type: TransactionType::Transfer,
        recipient_account: None,
        recipient_bank: None,
        location: None,
        device_fingerprint: "fp-1".to_string(),
        ip_address: "105.112.33.7".to_string(),
        user_agent: "VaultPay/3.1 Android".to_string(),
        channel: Channel::Mobile,
        timestamp: reference(),
    }
}

fn snapshot_of(amounts: &[u32], minutes_apart: i64) -> HistorySnapshot {
    let transactions = amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| TransactionRecord {
            amount: Decimal::from(*amount),
            transaction_type: TransactionType::Transfer,
            channel: Channel::Mobile,
            recipient_account: None,
            location: None,
            device_fingerprint: "fp-1".to_string(),
            user_agent: "VaultPay/3.1 Android".to_string(),
            ip_address: "105.112.33.7".to_string(),
            timestamp: reference() - Duration::minutes((i as i64 + 1) * minutes_apart),
        })
        .collect();
    HistorySnapshot {
        transactions,
        profile: None,
    }
}

proptest! {
    #[test]
    fn prop_reported_score_is_clamped(raw in 0u32..100_000) {
        prop_assert!(RiskScore::from_raw(raw).score() <= 100);
    }

    #[test]
    fn prop_risk_level_monotonic_in_score(a in 0u8..=100, b in 0u8..=100) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            RiskLevel::from(RiskScore::new(lo)) <= RiskLevel::from(RiskScore::new(hi))
        );
    }

    #[test]
    fn prop_recommended_action_monotonic_in_raw_score(a in 0u32..400, b in 0u32..400) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let action_lo = recommended_action(RiskLevel::from(RiskScore::from_raw(lo)), lo);
        let action_hi = recommended_action(RiskLevel::from(RiskScore::from_raw(hi)), hi);
        prop_assert!(action_lo <= action_hi);
    }

    #[test]
    fn prop_takeover_action_monotonic(a in 0u32..400, b in 0u32..400) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(takeover_action(lo) <= takeover_action(hi));
    }

    #[test]
    fn prop_amount_assessor_bounded(
        amount in 1u32..5_000_000,
        history in proptest::collection::vec(1u32..5_000_000, 0..40),
    ) {
        let signals = AmountRiskAssessor::new(30)
            .assess(&context(amount), &snapshot_of(&history, 60 * 24));
        let total: u32 = signals.iter().map(|s| s.weight).sum();
        // One exclusive magnitude band (<= 30) plus the round-number rule
        prop_assert!(total <= 35);
        prop_assert!(signals.len() <= 2);
    }

    #[test]
    fn prop_velocity_assessor_bounded(
        amount in 1u32..100_000,
        history in proptest::collection::vec(1u32..5_000_000, 0..80),
        minutes_apart in 1i64..120,
    ) {
        let signals = VelocityRiskAssessor::new()
            .assess(&context(amount), &snapshot_of(&history, minutes_apart));
        let total: u32 = signals.iter().map(|s| s.weight).sum();
        // Hourly band (<= 40) + daily count (30) + monetary velocity (35)
        prop_assert!(total <= 105);
    }

    #[test]
    fn prop_assessors_are_deterministic(
        amount in 1u32..5_000_000,
        history in proptest::collection::vec(1u32..5_000_000, 0..40),
    ) {
        let ctx = context(amount);
        let snapshot = snapshot_of(&history, 90);
        let amount_assessor = AmountRiskAssessor::new(30);
        let velocity_assessor = VelocityRiskAssessor::new();

        prop_assert_eq!(
            amount_assessor.assess(&ctx, &snapshot),
            amount_assessor.assess(&ctx, &snapshot)
        );
        prop_assert_eq!(
            velocity_assessor.assess(&ctx, &snapshot),
            velocity_assessor.assess(&ctx, &snapshot)
        );
    }
}
