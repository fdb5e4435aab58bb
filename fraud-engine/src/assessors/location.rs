//! Location risk assessment

use crate::geo::is_similar_location;
use crate::rules::{accumulate, Rule, Signal};
use crate::types::{GeoPoint, HistorySnapshot, TransactionContext};

/// Reason emitted when the transaction location matches no known location;
/// the orchestrator keys location confirmation off it
pub const UNUSUAL_LOCATION_REASON: &str = "Transaction from unusual location";

/// How many recent known locations are consulted
const KNOWN_LOCATION_LIMIT: usize = 20;

/// Flags transactions from places the user has not been seen before,
/// escalating when the country is on the high-risk list. Skips entirely
/// when the transaction carries no location.
#[derive(Debug, Clone)]
pub struct LocationRiskAssessor {
    high_risk_countries: Vec<String>,
    window_days: i64,
}

impl LocationRiskAssessor {
    /// Create an assessor with the configured high-risk country list and
    /// lookback window
    pub fn new(high_risk_countries: Vec<String>, window_days: i64) -> Self {
        Self {
            high_risk_countries,
            window_days,
        }
    }

    /// Score the transaction origin against recent known locations
    pub fn assess(&self, ctx: &TransactionContext, snapshot: &HistorySnapshot) -> Vec<Signal> {
        let Some(location) = &ctx.location else {
            return Vec::new();
        };

        let known: Vec<&GeoPoint> = snapshot
            .within_days(ctx.timestamp, self.window_days)
            .filter_map(|t| t.location.as_ref())
            .collect();

        // Snapshot is oldest-first; consult the most recent entries
        let unusual = !known
            .iter()
            .rev()
            .take(KNOWN_LOCATION_LIMIT)
            .any(|k| is_similar_location(k, location));
        let high_risk_area = unusual
            && location
                .country
                .as_deref()
                .is_some_and(|c| self.is_high_risk(c));

        accumulate(&[
            Rule::new(unusual, 25, UNUSUAL_LOCATION_REASON),
            Rule::new(
                high_risk_area,
                30,
                "Transaction from high-risk geographic area",
            ),
        ])
    }

    fn is_high_risk(&self, country: &str) -> bool {
        self.high_risk_countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country))
    }
}
