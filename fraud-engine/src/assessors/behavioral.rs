//! Behavioral risk assessment

use crate::rules::{accumulate, Rule, Signal};
use crate::types::{HistorySnapshot, TransactionContext, TransactionRecord};
use chrono::Timelike;
use std::collections::HashSet;

/// Flags departures from the user's own habits: hour of day, channel,
/// and transfer recipients.
#[derive(Debug, Clone)]
pub struct BehavioralRiskAssessor {
    stats_window_days: i64,
}

impl BehavioralRiskAssessor {
    /// Create an assessor reading habits over `stats_window_days`
    pub fn new(stats_window_days: i64) -> Self {
        Self { stats_window_days }
    }

    /// Score the transaction against the user's behavioral baseline
    pub fn assess(&self, ctx: &TransactionContext, snapshot: &HistorySnapshot) -> Vec<Signal> {
        let history: Vec<&TransactionRecord> = snapshot
            .within_days(ctx.timestamp, self.stats_window_days)
            .collect();

        let hour = ctx.timestamp.hour();
        let unusual_time = if history.is_empty() {
            false
        } else {
            let used_hours: HashSet<u32> =
                history.iter().map(|t| t.timestamp.hour()).collect();
            let mean_hour = history
                .iter()
                .map(|t| f64::from(t.timestamp.hour()))
                .sum::<f64>()
                / history.len() as f64;
            !used_hours.contains(&hour) && (f64::from(hour) - mean_hour).abs() > 6.0
        };

        let unusual_channel =
            !history.is_empty() && !history.iter().any(|t| t.channel == ctx.channel);

        let new_recipient = ctx.recipient_account.as_deref().is_some_and(|recipient| {
            !history
                .iter()
                .any(|t| t.recipient_account.as_deref() == Some(recipient))
        });

        accumulate(&[
            Rule::new(unusual_time, 15, "Transaction at unusual time"),
            Rule::new(unusual_channel, 10, "Transaction via unusual channel"),
            Rule::new(new_recipient, 15, "Transfer to new recipient"),
        ])
    }
}
