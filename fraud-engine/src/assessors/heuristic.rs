//! Deterministic heuristic scoring
//!
//! A threshold heuristic stands in for a trained fraud model. It sits
//! behind [`HeuristicModel`] so a real model can replace it later without
//! touching the orchestrator's aggregation contract.

use crate::rules::{accumulate, Rule, Signal};
use crate::types::{HistorySnapshot, TransactionContext, TransactionRecord};
use chrono::Timelike;
use rust_decimal::Decimal;

/// Scoring seam for the model-shaped component. Implementations must be
/// deterministic for identical inputs.
pub trait HeuristicModel: Send + Sync {
    /// Score the transaction against the snapshot
    fn score(&self, ctx: &TransactionContext, snapshot: &HistorySnapshot) -> Vec<Signal>;
}

/// Feature-threshold heuristic over amount percentile, hour of day and
/// transaction-type frequency. Explicitly not a trained model.
#[derive(Debug, Clone)]
pub struct ThresholdHeuristic {
    stats_window_days: i64,
}

impl ThresholdHeuristic {
    /// Create a heuristic reading features over `stats_window_days`
    pub fn new(stats_window_days: i64) -> Self {
        Self { stats_window_days }
    }
}

impl HeuristicModel for ThresholdHeuristic {
    fn score(&self, ctx: &TransactionContext, snapshot: &HistorySnapshot) -> Vec<Signal> {
        let history: Vec<&TransactionRecord> = snapshot
            .within_days(ctx.timestamp, self.stats_window_days)
            .collect();

        let percentile = (!history.is_empty()).then(|| {
            let mut sorted: Vec<Decimal> = history.iter().map(|t| t.amount).collect();
            sorted.sort();
            // Rank of the first historical value at or above the current
            // amount; an amount above everything ranks at 100
            let rank = sorted
                .iter()
                .position(|v| *v >= ctx.amount)
                .unwrap_or(sorted.len());
            rank as f64 / sorted.len() as f64 * 100.0
        });

        let type_frequency = (!history.is_empty()).then(|| {
            let same = history
                .iter()
                .filter(|t| t.transaction_type == ctx.transaction_type)
                .count();
            same as f64 / history.len() as f64
        });

        accumulate(&[
            Rule::new(
                percentile.is_some_and(|p| p > 95.0),
                20,
                "Amount in top 5% of user transactions",
            ),
            Rule::new(
                ctx.timestamp.hour() < 6,
                10,
                "Transaction during unusual hours",
            ),
            Rule::new(
                type_frequency.is_some_and(|f| f < 0.1),
                15,
                "Unusual transaction type for user",
            ),
        ])
    }
}
