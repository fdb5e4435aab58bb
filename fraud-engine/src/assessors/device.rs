//! Device and user-agent risk assessment

use crate::rules::{accumulate, Rule, Signal};
use crate::types::{HistorySnapshot, TransactionContext};
use std::collections::HashSet;

/// Reason emitted for an unseen device fingerprint; the orchestrator keys
/// device verification off it
pub const NEW_DEVICE_REASON: &str = "Transaction from new device";

/// Substrings marking automation tools rather than real clients
const BOT_SIGNATURES: [&str; 6] = ["bot", "crawler", "spider", "curl", "wget", "python"];

/// Flags transactions from devices or user agents the account has not used
/// recently, and user agents that look like automation tools.
#[derive(Debug, Clone)]
pub struct DeviceRiskAssessor {
    window_days: i64,
}

impl DeviceRiskAssessor {
    /// Create an assessor building known-device sets over `window_days`
    pub fn new(window_days: i64) -> Self {
        Self { window_days }
    }

    /// Score the device fingerprint and user agent
    pub fn assess(&self, ctx: &TransactionContext, snapshot: &HistorySnapshot) -> Vec<Signal> {
        let mut known_fingerprints = HashSet::new();
        let mut known_agents = HashSet::new();
        for record in snapshot.within_days(ctx.timestamp, self.window_days) {
            known_fingerprints.insert(record.device_fingerprint.as_str());
            known_agents.insert(record.user_agent.as_str());
        }

        let agent_lower = ctx.user_agent.to_lowercase();
        let suspicious_agent = BOT_SIGNATURES.iter().any(|s| agent_lower.contains(s));

        accumulate(&[
            Rule::new(
                !known_fingerprints.contains(ctx.device_fingerprint.as_str()),
                20,
                NEW_DEVICE_REASON,
            ),
            Rule::new(
                !known_agents.contains(ctx.user_agent.as_str()),
                15,
                "Transaction from new browser/app",
            ),
            Rule::new(
                suspicious_agent,
                25,
                "Suspicious browser/device characteristics",
            ),
        ])
    }
}
