//! Velocity risk assessment

use crate::rules::{accumulate, first_match, Rule, Signal};
use crate::types::{HistorySnapshot, TransactionContext};
use chrono::Duration;
use rust_decimal::Decimal;

/// Flags bursts of activity in the trailing hour and day. The hourly
/// frequency bands are mutually exclusive; the daily-count and monetary
/// rules accumulate on top.
#[derive(Debug, Clone, Default)]
pub struct VelocityRiskAssessor;

impl VelocityRiskAssessor {
    /// Create the assessor
    pub fn new() -> Self {
        Self
    }

    /// Score recent transaction frequency and volume
    pub fn assess(&self, ctx: &TransactionContext, snapshot: &HistorySnapshot) -> Vec<Signal> {
        let hour_count = snapshot.within(ctx.timestamp, Duration::hours(1)).count();
        let day_count = snapshot.within(ctx.timestamp, Duration::hours(24)).count();
        let hour_volume: Decimal = snapshot
            .within(ctx.timestamp, Duration::hours(1))
            .map(|t| t.amount)
            .sum();

        let frequency_bands = [
            Rule::new(hour_count > 10, 40, "Excessive transactions in last hour"),
            Rule::new(hour_count > 5, 20, "High transaction frequency"),
        ];
        let volume_rules = [
            Rule::new(day_count > 50, 30, "Excessive daily transaction volume"),
            Rule::new(
                hour_volume > Decimal::from(5_000_000),
                35,
                "High monetary velocity",
            ),
        ];

        let mut signals = Vec::new();
        signals.extend(first_match(&frequency_bands));
        signals.extend(accumulate(&volume_rules));
        signals
    }
}
