//! Real-time pattern monitoring
//!
//! Lightweight per-account check for rapid-fire or anomalous activity,
//! invoked on a polling or trigger basis. Independent of any single
//! transaction and of the orchestrator's score.

use crate::config::RiskConfig;
use crate::error::{Error, Result};
use crate::repository::{HistoryRepository, ProfileRepository};
use crate::types::{AccountProfile, AlertLevel, PatternAlert, TransactionRecord};
use chrono::{Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, warn};

/// Alert carried by the fail-safe result
pub const FAIL_SAFE_ALERT: &str = "Monitoring system error";

/// Per-account activity monitor
pub struct RealTimePatternMonitor {
    history: Arc<dyn HistoryRepository>,
    profiles: Arc<dyn ProfileRepository>,
    config: RiskConfig,
}

impl RealTimePatternMonitor {
    /// Create a monitor over the history and profile collaborators
    pub fn new(
        history: Arc<dyn HistoryRepository>,
        profiles: Arc<dyn ProfileRepository>,
        config: RiskConfig,
    ) -> Self {
        Self {
            history,
            profiles,
            config,
        }
    }

    /// Check one account for anomalous activity. Never fails:
    /// collaborator errors yield a medium-level error alert.
    pub async fn monitor(&self, user_id: &str) -> PatternAlert {
        match self.evaluate(user_id).await {
            Ok(alert) => {
                if !alert.alerts.is_empty() {
                    info!(
                        user_id = %user_id,
                        level = ?alert.risk_level,
                        count = alert.alerts.len(),
                        "pattern alerts raised"
                    );
                }
                alert
            }
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "pattern monitoring failed, returning fail-safe alert"
                );
                PatternAlert {
                    alerts: vec![FAIL_SAFE_ALERT.to_string()],
                    risk_level: AlertLevel::Medium,
                }
            }
        }
    }

    async fn evaluate(&self, user_id: &str) -> Result<PatternAlert> {
        let (transactions, profile) = tokio::try_join!(
            self.fetch_history(user_id),
            self.fetch_profile(user_id),
        )?;

        let now = Utc::now();
        let mut alerts = Vec::new();
        let mut risk_level = AlertLevel::Low;

        let burst_cutoff = now - Duration::minutes(self.config.burst_window_minutes);
        let burst_count = transactions
            .iter()
            .filter(|t| t.timestamp > burst_cutoff)
            .count();
        if burst_count > self.config.burst_transaction_threshold {
            alerts.push(format!(
                "Rapid transaction burst: {} transactions in {} minutes",
                burst_count, self.config.burst_window_minutes
            ));
            risk_level = AlertLevel::High;
        }

        if let Some(threshold) = anomaly_threshold(&transactions) {
            let hour_cutoff = now - Duration::hours(1);
            let anomalous = transactions
                .iter()
                .filter(|t| t.timestamp > hour_cutoff)
                .filter_map(|t| t.amount.to_f64())
                .any(|amount| amount > threshold);
            if anomalous {
                alerts.push("Transaction amount anomaly detected".to_string());
                risk_level = risk_level.max(AlertLevel::Medium);
            }
        }

        if let Some(profile) = &profile {
            if profile.failed_login_attempts > 3 {
                alerts.push("Multiple failed login attempts".to_string());
                risk_level = AlertLevel::High;
            }
        }

        Ok(PatternAlert { alerts, risk_level })
    }

    async fn fetch_history(&self, user_id: &str) -> Result<Vec<TransactionRecord>> {
        timeout(
            self.config.collaborator_timeout(),
            self.history
                .fetch_recent(user_id, self.config.history_window_days),
        )
        .await
        .map_err(|_| Error::Timeout(self.config.collaborator_timeout()))?
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<AccountProfile>> {
        timeout(
            self.config.collaborator_timeout(),
            self.profiles.fetch_account_profile(user_id),
        )
        .await
        .map_err(|_| Error::Timeout(self.config.collaborator_timeout()))?
    }
}

/// Mean + 3 standard deviations over the window's amounts, `None` for an
/// empty window
fn anomaly_threshold(transactions: &[TransactionRecord]) -> Option<f64> {
    let amounts: Vec<f64> = transactions
        .iter()
        .filter_map(|t| t.amount.to_f64())
        .collect();
    if amounts.is_empty() {
        return None;
    }

    let mean = amounts.iter().sum::<f64>() / amounts.len() as f64;
    let variance = amounts
        .iter()
        .map(|a| (a - mean).powi(2))
        .sum::<f64>()
        / amounts.len() as f64;
    Some(mean + 3.0 * variance.sqrt())
}
