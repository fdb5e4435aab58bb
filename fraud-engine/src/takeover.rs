//! Account takeover detection
//!
//! Analyzes one login event against the account's recent login history.
//! Independent of transaction assessment; shares the geo helpers and the
//! history collaborator but never feeds the orchestrator's score.

use crate::config::RiskConfig;
use crate::error::{Error, Result};
use crate::geo::{is_impossible_travel, is_similar_location};
use crate::repository::HistoryRepository;
use crate::rules::{accumulate, Rule, Signal};
use crate::types::{GeoPoint, LoginContext, TakeoverAction, TakeoverAssessment};
use chrono::{Duration, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, warn};

/// Risk factor carried by the fail-safe assessment
pub const FAIL_SAFE_FACTOR: &str = "Error in security analysis";

/// Login-time account takeover detector
pub struct AccountTakeoverDetector {
    history: Arc<dyn HistoryRepository>,
    config: RiskConfig,
}

impl AccountTakeoverDetector {
    /// Create a detector over the history collaborator
    pub fn new(history: Arc<dyn HistoryRepository>, config: RiskConfig) -> Self {
        Self { history, config }
    }

    /// Assess one login. Never fails: collaborator errors yield the
    /// fail-safe two-factor decision.
    pub async fn detect(&self, user_id: &str, login: LoginContext) -> TakeoverAssessment {
        let assessment = match self.evaluate(user_id, &login).await {
            Ok(assessment) => assessment,
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "takeover analysis failed, returning fail-safe decision"
                );
                fail_safe()
            }
        };

        info!(
            user_id = %user_id,
            score = assessment.risk_score,
            suspicious = assessment.is_suspicious,
            action = ?assessment.recommended_action,
            "login assessed"
        );
        assessment
    }

    async fn evaluate(&self, user_id: &str, login: &LoginContext) -> Result<TakeoverAssessment> {
        let logins = timeout(
            self.config.collaborator_timeout(),
            self.history.fetch_recent_logins(
                user_id,
                self.config.login_history_limit,
                self.config.login_window_days,
            ),
        )
        .await
        .map_err(|_| Error::Timeout(self.config.collaborator_timeout()))??;

        let now = Utc::now();
        let mut signals: Vec<Signal> = Vec::new();

        let known_ips: HashSet<&str> = logins.iter().map(|l| l.ip_address.as_str()).collect();
        let known_agents: HashSet<&str> = logins.iter().map(|l| l.user_agent.as_str()).collect();
        signals.extend(accumulate(&[
            Rule::new(
                !known_ips.is_empty() && !known_ips.contains(login.ip_address.as_str()),
                30,
                "Login from unrecognized IP address",
            ),
            Rule::new(
                !known_agents.is_empty() && !known_agents.contains(login.user_agent.as_str()),
                25,
                "Login from unrecognized browser/device",
            ),
        ]));

        if let Some(location) = &login.location {
            let known_locations: Vec<&GeoPoint> =
                logins.iter().filter_map(|l| l.location.as_ref()).collect();
            let dissimilar = !known_locations.is_empty()
                && !known_locations
                    .iter()
                    .any(|k| is_similar_location(k, location));
            if dissimilar {
                // Logins are newest first; measure from the last located one.
                // Impossible travel supersedes the plain unusual-location
                // signal rather than stacking with it.
                let impossible = logins
                    .iter()
                    .find_map(|l| l.location.as_ref().map(|loc| (loc, l.timestamp)))
                    .is_some_and(|(last, at)| {
                        let elapsed_hours = (now - at).num_seconds() as f64 / 3_600.0;
                        is_impossible_travel(
                            last,
                            location,
                            elapsed_hours,
                            self.config.max_travel_speed_kmh,
                        )
                    });
                if impossible {
                    signals.push(Signal {
                        weight: 50,
                        reason: "Impossible travel detected",
                    });
                } else {
                    signals.push(Signal {
                        weight: 40,
                        reason: "Login from unusual location",
                    });
                }
            }
        }

        let stale = logins
            .first()
            .is_some_and(|last| now - last.timestamp > Duration::days(7));
        signals.extend(accumulate(&[Rule::new(
            stale,
            15,
            "Long gap since last login",
        )]));

        let risk_score: u32 = signals.iter().map(|s| s.weight).sum();
        Ok(TakeoverAssessment {
            risk_score,
            risk_factors: signals.iter().map(|s| s.reason.to_string()).collect(),
            is_suspicious: risk_score >= 40,
            recommended_action: takeover_action(risk_score),
        })
    }
}

/// Map an accumulated takeover score to an action
pub fn takeover_action(score: u32) -> TakeoverAction {
    if score >= 70 {
        TakeoverAction::BlockAccount
    } else if score >= 50 {
        TakeoverAction::RequireTwoFactor
    } else if score >= 30 {
        TakeoverAction::RequireEmailVerification
    } else {
        TakeoverAction::Allow
    }
}

fn fail_safe() -> TakeoverAssessment {
    TakeoverAssessment {
        risk_score: 50,
        risk_factors: vec![FAIL_SAFE_FACTOR.to_string()],
        is_suspicious: true,
        recommended_action: TakeoverAction::RequireTwoFactor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryHistoryRepository;
    use crate::types::{LoginRecord, TransactionRecord};
    use async_trait::async_trait;

    fn login_record(
        hours_ago: i64,
        ip: &str,
        agent: &str,
        location: Option<GeoPoint>,
    ) -> LoginRecord {
        LoginRecord {
            ip_address: ip.to_string(),
            user_agent: agent.to_string(),
            location,
            timestamp: Utc::now() - Duration::hours(hours_ago),
        }
    }

    fn login_from(ip: &str, agent: &str, location: Option<GeoPoint>) -> LoginContext {
        LoginContext {
            ip_address: ip.to_string(),
            user_agent: agent.to_string(),
            device_fingerprint: None,
            location,
        }
    }

    fn detector(history: Arc<InMemoryHistoryRepository>) -> AccountTakeoverDetector {
        AccountTakeoverDetector::new(history, RiskConfig::default())
    }

    #[tokio::test]
    async fn test_familiar_login_is_allowed() {
        let history = Arc::new(InMemoryHistoryRepository::new());
        history.record_login("u1", login_record(5, "10.0.0.1", "ua-known", None));

        let assessment = detector(history)
            .detect("u1", login_from("10.0.0.1", "ua-known", None))
            .await;
        assert_eq!(assessment.risk_score, 0);
        assert!(!assessment.is_suspicious);
        assert_eq!(assessment.recommended_action, TakeoverAction::Allow);
    }

    #[tokio::test]
    async fn test_empty_history_stays_quiet() {
        let history = Arc::new(InMemoryHistoryRepository::new());
        let assessment = detector(history)
            .detect("u1", login_from("10.0.0.1", "ua-new", None))
            .await;
        assert_eq!(assessment.risk_score, 0);
    }

    #[tokio::test]
    async fn test_new_ip_and_agent() {
        let history = Arc::new(InMemoryHistoryRepository::new());
        history.record_login("u1", login_record(5, "10.0.0.1", "ua-known", None));

        let assessment = detector(history)
            .detect("u1", login_from("172.16.0.9", "ua-new", None))
            .await;
        assert_eq!(assessment.risk_score, 55);
        assert!(assessment.is_suspicious);
        assert_eq!(
            assessment.recommended_action,
            TakeoverAction::RequireTwoFactor
        );
    }

    #[tokio::test]
    async fn test_impossible_travel_blocks_account() {
        let history = Arc::new(InMemoryHistoryRepository::new());
        // Last login from Lagos one hour ago
        history.record_login(
            "u1",
            login_record(1, "10.0.0.1", "ua-known", Some(GeoPoint::new(6.5244, 3.3792))),
        );

        // Now logging in from London: ~5,000 km in an hour
        let assessment = detector(history)
            .detect(
                "u1",
                login_from("172.16.0.9", "ua-new", Some(GeoPoint::new(51.5074, -0.1278))),
            )
            .await;

        // New IP (30) + new agent (25) + impossible travel (50); the plain
        // unusual-location signal must not stack on top
        assert_eq!(assessment.risk_score, 105);
        assert!(assessment.is_suspicious);
        assert_eq!(assessment.recommended_action, TakeoverAction::BlockAccount);
        assert!(assessment
            .risk_factors
            .iter()
            .any(|f| f == "Impossible travel detected"));
        assert!(!assessment
            .risk_factors
            .iter()
            .any(|f| f == "Login from unusual location"));
    }

    #[tokio::test]
    async fn test_plausible_relocation_flags_location_only() {
        let history = Arc::new(InMemoryHistoryRepository::new());
        // Lagos two days ago; Abuja now is ~520 km, ~11 km/h
        history.record_login(
            "u1",
            login_record(48, "10.0.0.1", "ua-known", Some(GeoPoint::new(6.5244, 3.3792))),
        );

        let assessment = detector(history)
            .detect(
                "u1",
                login_from("10.0.0.1", "ua-known", Some(GeoPoint::new(9.0765, 7.3986))),
            )
            .await;

        assert_eq!(assessment.risk_score, 40);
        assert!(assessment.is_suspicious);
        assert_eq!(
            assessment.recommended_action,
            TakeoverAction::RequireEmailVerification
        );
    }

    #[tokio::test]
    async fn test_long_gap_since_last_login() {
        let history = Arc::new(InMemoryHistoryRepository::new());
        history.record_login("u1", login_record(10 * 24, "10.0.0.1", "ua-known", None));

        let assessment = detector(history)
            .detect("u1", login_from("10.0.0.1", "ua-known", None))
            .await;
        assert_eq!(assessment.risk_score, 15);
        assert_eq!(assessment.recommended_action, TakeoverAction::Allow);
    }

    #[tokio::test]
    async fn test_collaborator_error_fails_safe() {
        struct FailingHistory;

        #[async_trait]
        impl HistoryRepository for FailingHistory {
            async fn fetch_recent(
                &self,
                _user_id: &str,
                _window_days: i64,
            ) -> crate::Result<Vec<TransactionRecord>> {
                Err(Error::History("connection refused".to_string()))
            }

            async fn fetch_recent_logins(
                &self,
                _user_id: &str,
                _limit: usize,
                _window_days: i64,
            ) -> crate::Result<Vec<LoginRecord>> {
                Err(Error::History("connection refused".to_string()))
            }
        }

        let detector =
            AccountTakeoverDetector::new(Arc::new(FailingHistory), RiskConfig::default());
        let assessment = detector
            .detect("u1", login_from("10.0.0.1", "ua", None))
            .await;

        assert_eq!(assessment.risk_score, 50);
        assert!(assessment.is_suspicious);
        assert_eq!(assessment.risk_factors, vec![FAIL_SAFE_FACTOR.to_string()]);
        assert_eq!(
            assessment.recommended_action,
            TakeoverAction::RequireTwoFactor
        );
    }

    #[test]
    fn test_action_ladder() {
        assert_eq!(takeover_action(0), TakeoverAction::Allow);
        assert_eq!(takeover_action(29), TakeoverAction::Allow);
        assert_eq!(takeover_action(30), TakeoverAction::RequireEmailVerification);
        assert_eq!(takeover_action(50), TakeoverAction::RequireTwoFactor);
        assert_eq!(takeover_action(70), TakeoverAction::BlockAccount);
        assert_eq!(takeover_action(105), TakeoverAction::BlockAccount);
    }
}
