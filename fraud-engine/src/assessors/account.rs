//! Account standing risk assessment

use crate::rules::{accumulate, first_match, Rule, Signal};
use crate::types::{AccountProfile, AccountStatus, KycStatus};
use chrono::{DateTime, Duration, Utc};

/// Reason attached to the terminal missing-profile outcome
pub const ACCOUNT_NOT_FOUND_REASON: &str = "User account not found";

/// Outcome of account assessment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountAssessment {
    /// Normal additive contribution
    Scored(Vec<Signal>),
    /// The profile lookup found no account. Terminal maximal-risk state:
    /// the caller must short-circuit to score 100 with the single reason
    /// [`ACCOUNT_NOT_FOUND_REASON`] instead of aggregating.
    NotFound,
}

/// Flags weak account standing: unverified KYC, young accounts, recent
/// failed logins and non-active status. The two age bands are mutually
/// exclusive.
#[derive(Debug, Clone, Default)]
pub struct AccountRiskAssessor;

impl AccountRiskAssessor {
    /// Create the assessor
    pub fn new() -> Self {
        Self
    }

    /// Score the account profile as of the evaluation instant `now`
    pub fn assess(
        &self,
        profile: Option<&AccountProfile>,
        now: DateTime<Utc>,
    ) -> AccountAssessment {
        let Some(profile) = profile else {
            return AccountAssessment::NotFound;
        };

        let age = now - profile.account_created_at;
        let age_bands = [
            Rule::new(
                age < Duration::days(7),
                30,
                "Account created within the last week",
            ),
            Rule::new(
                age < Duration::days(30),
                15,
                "Account created within the last month",
            ),
        ];

        let mut signals = Vec::new();
        signals.extend(accumulate(&[Rule::new(
            profile.kyc_status != KycStatus::Verified,
            25,
            "Account KYC not verified",
        )]));
        signals.extend(first_match(&age_bands));
        signals.extend(accumulate(&[
            Rule::new(
                profile.failed_login_attempts > 3,
                20,
                "Multiple failed login attempts",
            ),
            Rule::new(
                profile.account_status != AccountStatus::Active,
                50,
                "Account not in active status",
            ),
        ]));
        AccountAssessment::Scored(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_profile(now: DateTime<Utc>) -> AccountProfile {
        AccountProfile {
            kyc_status: KycStatus::Verified,
            account_status: AccountStatus::Active,
            account_created_at: now - Duration::days(400),
            failed_login_attempts: 0,
        }
    }

    fn total(assessment: &AccountAssessment) -> u32 {
        match assessment {
            AccountAssessment::Scored(signals) => signals.iter().map(|s| s.weight).sum(),
            AccountAssessment::NotFound => panic!("expected scored outcome"),
        }
    }

    #[test]
    fn test_healthy_account_is_clean() {
        let now = Utc::now();
        let assessment = AccountRiskAssessor::new().assess(Some(&good_profile(now)), now);
        assert_eq!(total(&assessment), 0);
    }

    #[test]
    fn test_missing_profile_is_terminal() {
        let assessment = AccountRiskAssessor::new().assess(None, Utc::now());
        assert_eq!(assessment, AccountAssessment::NotFound);
    }

    #[test]
    fn test_unverified_kyc() {
        let now = Utc::now();
        let mut profile = good_profile(now);
        profile.kyc_status = KycStatus::Pending;

        let assessment = AccountRiskAssessor::new().assess(Some(&profile), now);
        assert_eq!(total(&assessment), 25);
    }

    #[test]
    fn test_age_bands_are_exclusive() {
        let now = Utc::now();

        let mut brand_new = good_profile(now);
        brand_new.account_created_at = now - Duration::days(2);
        assert_eq!(
            total(&AccountRiskAssessor::new().assess(Some(&brand_new), now)),
            30
        );

        let mut recent = good_profile(now);
        recent.account_created_at = now - Duration::days(20);
        assert_eq!(
            total(&AccountRiskAssessor::new().assess(Some(&recent), now)),
            15
        );
    }

    #[test]
    fn test_failed_logins_and_status_accumulate() {
        let now = Utc::now();
        let mut profile = good_profile(now);
        profile.failed_login_attempts = 5;
        profile.account_status = AccountStatus::Frozen;

        let assessment = AccountRiskAssessor::new().assess(Some(&profile), now);
        assert_eq!(total(&assessment), 70);
    }

    #[test]
    fn test_worst_case_profile_stacks_all_groups() {
        let now = Utc::now();
        let profile = AccountProfile {
            kyc_status: KycStatus::Unverified,
            account_status: AccountStatus::Suspended,
            account_created_at: now - Duration::days(1),
            failed_login_attempts: 10,
        };

        // 25 (kyc) + 30 (age) + 20 (logins) + 50 (status)
        let assessment = AccountRiskAssessor::new().assess(Some(&profile), now);
        assert_eq!(total(&assessment), 125);
    }
}
