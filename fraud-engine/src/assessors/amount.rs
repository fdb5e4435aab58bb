//! Amount risk assessment

use crate::rules::{accumulate, first_match, Rule, Signal};
use crate::types::{HistorySnapshot, TransactionContext};
use rust_decimal::Decimal;

/// Flags transactions that are large in absolute terms or against the
/// user's own history. The three magnitude bands are mutually exclusive;
/// the round-number rule fires independently of them.
#[derive(Debug, Clone)]
pub struct AmountRiskAssessor {
    stats_window_days: i64,
}

impl AmountRiskAssessor {
    /// Create an assessor reading amount statistics over `stats_window_days`
    pub fn new(stats_window_days: i64) -> Self {
        Self { stats_window_days }
    }

    /// Score the transaction amount against the user's history
    pub fn assess(&self, ctx: &TransactionContext, snapshot: &HistorySnapshot) -> Vec<Signal> {
        let amounts: Vec<Decimal> = snapshot
            .within_days(ctx.timestamp, self.stats_window_days)
            .map(|t| t.amount)
            .collect();

        let average = if amounts.is_empty() {
            None
        } else {
            let total: Decimal = amounts.iter().sum();
            Some(total / Decimal::from(amounts.len() as u64))
        };
        let maximum = amounts.iter().max().copied();

        let magnitude_bands = [
            Rule::new(
                ctx.amount > Decimal::from(1_000_000),
                30,
                "Very large transaction amount",
            ),
            Rule::new(
                average.is_some_and(|avg| ctx.amount > avg * Decimal::from(5)),
                20,
                "Amount significantly higher than user average",
            ),
            Rule::new(
                maximum.is_some_and(|max| ctx.amount > max * Decimal::new(15, 1)),
                15,
                "Amount exceeds typical maximum",
            ),
        ];

        let mut signals = Vec::new();
        signals.extend(first_match(&magnitude_bands));
        signals.extend(accumulate(&[Rule::new(
            is_round_amount(ctx.amount),
            5,
            "Round number transaction",
        )]));
        signals
    }
}

/// Exact multiple of 1,000 at or above 10,000
fn is_round_amount(amount: Decimal) -> bool {
    amount >= Decimal::from(10_000) && amount % Decimal::from(1_000) == Decimal::ZERO
}
