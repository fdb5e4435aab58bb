//! Configuration for the fraud engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for transaction assessment, takeover detection and pattern
/// monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Trailing window for transaction statistics (days)
    pub history_window_days: i64,

    /// Trailing window for known device fingerprints/user agents (days)
    pub device_window_days: i64,

    /// Maximum login-history rows consulted by takeover detection
    pub login_history_limit: usize,

    /// Trailing window for login history (days)
    pub login_window_days: i64,

    /// Deadline for each collaborator call (milliseconds)
    pub collaborator_timeout_ms: u64,

    /// ISO country codes treated as high-risk origins
    pub high_risk_countries: Vec<String>,

    /// Travel speed above which two logins are considered impossible (km/h)
    pub max_travel_speed_kmh: f64,

    /// Burst detection window for pattern monitoring (minutes)
    pub burst_window_minutes: i64,

    /// Transaction count above which the burst window alerts
    pub burst_transaction_threshold: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            history_window_days: 30,
            device_window_days: 60,
            login_history_limit: 10,
            login_window_days: 30,
            collaborator_timeout_ms: 5_000,
            high_risk_countries: ["IR", "KP", "SY", "CU", "VE", "AF", "MM", "ZW", "SD", "BY"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            max_travel_speed_kmh: 1_000.0,
            burst_window_minutes: 5,
            burst_transaction_threshold: 5,
        }
    }
}

impl RiskConfig {
    /// Collaborator deadline as a [`Duration`]
    pub fn collaborator_timeout(&self) -> Duration {
        Duration::from_millis(self.collaborator_timeout_ms)
    }

    /// Widest history window any assessor needs (days)
    pub fn widest_window_days(&self) -> i64 {
        self.history_window_days.max(self.device_window_days)
    }

    /// Whether a country code is on the high-risk list
    pub fn is_high_risk_country(&self, country: &str) -> bool {
        self.high_risk_countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country))
    }
}
