//! Blacklist checking

use crate::rules::{accumulate, Rule, Signal};

/// Blacklist lookup results, resolved by the orchestrator during the
/// concurrent fetch phase so the check itself stays pure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlacklistHits {
    /// The destination account is blacklisted
    pub recipient_account: bool,
    /// The originating IP is blacklisted
    pub ip_address: bool,
}

/// Converts blacklist hits into signals. Either hit alone usually pushes
/// a transaction past the critical threshold once combined with baseline
/// account risk.
#[derive(Debug, Clone, Default)]
pub struct BlacklistChecker;

impl BlacklistChecker {
    /// Create the checker
    pub fn new() -> Self {
        Self
    }

    /// Score prefetched blacklist hits
    pub fn assess(&self, hits: &BlacklistHits) -> Vec<Signal> {
        accumulate(&[
            Rule::new(
                hits.recipient_account,
                80,
                "Transfer to blacklisted account",
            ),
            Rule::new(hits.ip_address, 60, "Transaction from blacklisted IP"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_lookups() {
        assert!(BlacklistChecker::new()
            .assess(&BlacklistHits::default())
            .is_empty());
    }

    #[test]
    fn test_blacklisted_recipient() {
        let hits = BlacklistHits {
            recipient_account: true,
            ip_address: false,
        };
        let signals = BlacklistChecker::new().assess(&hits);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].weight, 80);
    }

    #[test]
    fn test_both_hits_accumulate() {
        let hits = BlacklistHits {
            recipient_account: true,
            ip_address: true,
        };
        let signals = BlacklistChecker::new().assess(&hits);
        let total: u32 = signals.iter().map(|s| s.weight).sum();
        assert_eq!(total, 140);
    }
}
