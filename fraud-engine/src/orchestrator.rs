//! Risk orchestration
//!
//! Fetches collaborator data concurrently, runs every assessor in a fixed
//! order, aggregates and classifies, and hands the decision to the audit
//! recorder. Collaborator failures never surface to the caller: they
//! become the fixed fail-safe review decision.

use crate::assessors::{
    AccountAssessment, AccountRiskAssessor, AmountRiskAssessor, BehavioralRiskAssessor,
    BlacklistChecker, BlacklistHits, DeviceRiskAssessor, HeuristicModel, LocationRiskAssessor,
    ThresholdHeuristic, VelocityRiskAssessor,
};
use crate::assessors::account::ACCOUNT_NOT_FOUND_REASON;
use crate::assessors::device::NEW_DEVICE_REASON;
use crate::assessors::location::UNUSUAL_LOCATION_REASON;
use crate::config::RiskConfig;
use crate::error::{Error, Result};
use crate::recorder::AssessmentRecorder;
use crate::repository::{
    AssessmentStore, BlacklistRepository, HistoryRepository, ProfileRepository,
};
use crate::rules::Signal;
use crate::types::{
    AccountProfile, HistorySnapshot, RecommendedAction, RiskAssessment, RiskLevel, RiskScore,
    TransactionContext, TransactionRecord, VerificationStep,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, warn};

/// Reason carried by the fail-safe decision
pub const FAIL_SAFE_REASON: &str = "System error during fraud analysis";

/// Transaction risk orchestrator
pub struct RiskOrchestrator {
    history: Arc<dyn HistoryRepository>,
    profiles: Arc<dyn ProfileRepository>,
    blacklists: Arc<dyn BlacklistRepository>,
    recorder: AssessmentRecorder,
    amount: AmountRiskAssessor,
    velocity: VelocityRiskAssessor,
    location: LocationRiskAssessor,
    device: DeviceRiskAssessor,
    account: AccountRiskAssessor,
    behavioral: BehavioralRiskAssessor,
    blacklist: BlacklistChecker,
    heuristic: Arc<dyn HeuristicModel>,
    config: RiskConfig,
}

impl RiskOrchestrator {
    /// Create an orchestrator with the provided collaborators and the
    /// built-in threshold heuristic
    pub fn new(
        history: Arc<dyn HistoryRepository>,
        profiles: Arc<dyn ProfileRepository>,
        blacklists: Arc<dyn BlacklistRepository>,
        store: Arc<dyn AssessmentStore>,
        config: RiskConfig,
    ) -> Self {
        let heuristic = Arc::new(ThresholdHeuristic::new(config.history_window_days));
        Self::with_heuristic(history, profiles, blacklists, store, config, heuristic)
    }

    /// Create an orchestrator with a custom heuristic model
    pub fn with_heuristic(
        history: Arc<dyn HistoryRepository>,
        profiles: Arc<dyn ProfileRepository>,
        blacklists: Arc<dyn BlacklistRepository>,
        store: Arc<dyn AssessmentStore>,
        config: RiskConfig,
        heuristic: Arc<dyn HeuristicModel>,
    ) -> Self {
        Self {
            history,
            profiles,
            blacklists,
            recorder: AssessmentRecorder::new(store),
            amount: AmountRiskAssessor::new(config.history_window_days),
            velocity: VelocityRiskAssessor::new(),
            location: LocationRiskAssessor::new(
                config.high_risk_countries.clone(),
                config.device_window_days,
            ),
            device: DeviceRiskAssessor::new(config.device_window_days),
            account: AccountRiskAssessor::new(),
            behavioral: BehavioralRiskAssessor::new(config.history_window_days),
            blacklist: BlacklistChecker::new(),
            heuristic,
            config,
        }
    }

    /// Assess one transaction. Never fails: collaborator errors yield the
    /// fail-safe review decision, a missing account yields the terminal
    /// maximal-risk decision.
    pub async fn analyze_transaction(&self, ctx: TransactionContext) -> RiskAssessment {
        let assessment = match self.evaluate(&ctx).await {
            Ok(assessment) => assessment,
            Err(e) => {
                warn!(
                    user_id = %ctx.user_id,
                    error = %e,
                    "fraud analysis failed, returning fail-safe decision"
                );
                finalize(vec![Signal { weight: 75, reason: FAIL_SAFE_REASON }], ctx.timestamp)
            }
        };

        info!(
            user_id = %ctx.user_id,
            score = assessment.risk_score.score(),
            level = ?assessment.risk_level,
            action = ?assessment.recommended_action,
            "transaction risk assessed"
        );
        self.recorder.record(&assessment, &ctx);
        assessment
    }

    async fn evaluate(&self, ctx: &TransactionContext) -> Result<RiskAssessment> {
        let (transactions, profile, hits) = tokio::try_join!(
            self.fetch_history(ctx),
            self.fetch_profile(ctx),
            self.fetch_blacklist_hits(ctx),
        )?;
        let snapshot = HistorySnapshot {
            transactions,
            profile,
        };

        let mut signals: Vec<Signal> = Vec::new();
        signals.extend(self.amount.assess(ctx, &snapshot));
        signals.extend(self.velocity.assess(ctx, &snapshot));
        signals.extend(self.location.assess(ctx, &snapshot));
        signals.extend(self.device.assess(ctx, &snapshot));
        signals.extend(self.behavioral.assess(ctx, &snapshot));
        match self.account.assess(snapshot.profile.as_ref(), ctx.timestamp) {
            AccountAssessment::NotFound => {
                warn!(user_id = %ctx.user_id, "account profile missing, treating as maximal risk");
                return Ok(finalize(
                    vec![Signal { weight: 100, reason: ACCOUNT_NOT_FOUND_REASON }],
                    ctx.timestamp,
                ));
            }
            AccountAssessment::Scored(account_signals) => signals.extend(account_signals),
        }
        signals.extend(self.blacklist.assess(&hits));
        signals.extend(self.heuristic.score(ctx, &snapshot));

        Ok(finalize(signals, ctx.timestamp))
    }

    async fn fetch_history(&self, ctx: &TransactionContext) -> Result<Vec<TransactionRecord>> {
        timeout(
            self.config.collaborator_timeout(),
            self.history
                .fetch_recent(&ctx.user_id, self.config.widest_window_days()),
        )
        .await
        .map_err(|_| Error::Timeout(self.config.collaborator_timeout()))?
    }

    async fn fetch_profile(&self, ctx: &TransactionContext) -> Result<Option<AccountProfile>> {
        timeout(
            self.config.collaborator_timeout(),
            self.profiles.fetch_account_profile(&ctx.user_id),
        )
        .await
        .map_err(|_| Error::Timeout(self.config.collaborator_timeout()))?
    }

    async fn fetch_blacklist_hits(&self, ctx: &TransactionContext) -> Result<BlacklistHits> {
        timeout(self.config.collaborator_timeout(), async {
            let recipient_account = match &ctx.recipient_account {
                Some(account) => self.blacklists.is_account_blacklisted(account).await?,
                None => false,
            };
            let ip_address = self.blacklists.is_ip_blacklisted(&ctx.ip_address).await?;
            Ok::<_, Error>(BlacklistHits {
                recipient_account,
                ip_address,
            })
        })
        .await
        .map_err(|_| Error::Timeout(self.config.collaborator_timeout()))?
    }
}

/// Map a classified level and the raw pre-clamp score to an action.
/// The raw score is consulted deliberately: the source compares some
/// action thresholds before clamping.
pub fn recommended_action(level: RiskLevel, raw_score: u32) -> RecommendedAction {
    if level == RiskLevel::Critical || raw_score >= 90 {
        RecommendedAction::Decline
    } else if level == RiskLevel::High || raw_score >= 70 {
        RecommendedAction::Review
    } else if level == RiskLevel::Medium || raw_score >= 40 {
        RecommendedAction::RequireOtp
    } else {
        RecommendedAction::Approve
    }
}

fn verification_steps(level: RiskLevel, signals: &[Signal]) -> BTreeSet<VerificationStep> {
    let mut steps = BTreeSet::new();
    if level >= RiskLevel::High {
        steps.insert(VerificationStep::SmsOtp);
        steps.insert(VerificationStep::DocumentVerification);
    }
    if signals.iter().any(|s| s.reason == NEW_DEVICE_REASON) {
        steps.insert(VerificationStep::DeviceVerification);
    }
    if signals.iter().any(|s| s.reason == UNUSUAL_LOCATION_REASON) {
        steps.insert(VerificationStep::LocationConfirmation);
    }
    steps
}

fn finalize(signals: Vec<Signal>, assessed_at: DateTime<Utc>) -> RiskAssessment {
    let raw_score: u32 = signals.iter().map(|s| s.weight).sum();
    let risk_score = RiskScore::from_raw(raw_score);
    let risk_level = RiskLevel::from(risk_score);

    RiskAssessment {
        risk_score,
        risk_level,
        flagged_reasons: signals.iter().map(|s| s.reason.to_string()).collect(),
        recommended_action: recommended_action(risk_level, raw_score),
        additional_verification: verification_steps(risk_level, &signals),
        assessed_at,
    }
}
