//! Loan-Rejection Risk Scorer
//!
//! Rules-based scoring over a financial profile. Checks run in a fixed
//! order (debt ratio, credit score, employer categorization) so the reason
//! list is stable, and the likelihood tier only ever escalates as reasons
//! accumulate. Deterministic enforcement; no I/O.

use crate::models::{RiskAssessment, RiskProfile, RiskReason, RiskReasonCode, RiskTier};
use crate::policy::BankPolicyDirectory;
use std::cmp::Ordering;
use tracing::debug;

/// Fixed proxy ratio converting stated gross income to usable net income.
/// Applied uniformly across banks and income levels.
pub const NET_INCOME_RATIO: f64 = 0.45;

/// FOIR above this is a critical obligation load.
pub const FOIR_CRITICAL: f64 = 0.60;

/// FOIR above this (and up to the critical line) is borderline.
pub const FOIR_BORDERLINE: f64 = 0.45;

/// Scores under this trip the low-score reason.
pub const LOW_SCORE_CUTOFF: u32 = 700;

/// Stand-in score when the band label cannot be parsed.
pub const DEFAULT_SCORE_PROXY: u32 = 650;

const RECOMMEND_HEALTHY: &str = "Profile sits inside comfortable underwriting bands. Keep \
     existing EMIs current and credit utilisation low until sanction.";

const RECOMMEND_SCORE_REPAIR: &str = "Repair the score first: clear every overdue, keep card \
     utilisation under 30%, and avoid fresh credit enquiries for 6-9 months before reapplying.";

const RECOMMEND_DEBT_REDUCTION: &str = "Bring the obligation ratio down before applying: close \
     small-ticket EMIs first, or add a co-applicant's income to the file.";

const RECOMMEND_COMBINED: &str = "Hold the application. Reduce existing obligations and repair \
     the score in parallel, then target a lender whose screening fits your employment profile.";

/// Stateless risk scorer
pub struct RiskScorer;

impl RiskScorer {
    /// Assess rejection likelihood for a profile. The bank directory
    /// supplies the policy-conservative classification; everything else is
    /// derived from the profile itself.
    pub fn assess(profile: &RiskProfile, banks: &BankPolicyDirectory) -> RiskAssessment {
        let mut reasons = Vec::new();

        // 1. Obligation load against estimated net income.
        let net_income = profile.gross_monthly_income * NET_INCOME_RATIO;
        let foir = if net_income > 0.0 {
            Some(profile.monthly_debt_service / net_income)
        } else {
            // Saturated: no measurable repayment capacity, not a division fault.
            None
        };

        match foir {
            None => reasons.push(RiskReason {
                code: RiskReasonCode::DebtRatioCritical,
                detail: "Stated income leaves no measurable repayment capacity; existing \
                         obligations saturate the file."
                    .to_string(),
            }),
            Some(ratio) if ratio > FOIR_CRITICAL => reasons.push(RiskReason {
                code: RiskReasonCode::DebtRatioCritical,
                detail: format!(
                    "Fixed obligations consume {:.0}% of estimated net income; lenders \
                     generally cap FOIR near {:.0}%.",
                    ratio * 100.0,
                    FOIR_CRITICAL * 100.0
                ),
            }),
            Some(ratio) if ratio > FOIR_BORDERLINE => reasons.push(RiskReason {
                code: RiskReasonCode::DebtRatioBorderline,
                detail: format!(
                    "FOIR of {:.0}% sits in the borderline band; sanction will depend on \
                     other compensating factors.",
                    ratio * 100.0
                ),
            }),
            Some(_) => {}
        }

        // 2. Credit score band.
        let score = credit_band_floor(&profile.credit_score_band);
        if score < LOW_SCORE_CUTOFF {
            reasons.push(RiskReason {
                code: RiskReasonCode::LowCreditScore,
                detail: format!(
                    "Credit band \"{}\" reads as {}, under the {} comfort line most \
                     underwriters apply.",
                    profile.credit_score_band.trim(),
                    score,
                    LOW_SCORE_CUTOFF
                ),
            });
        }

        // 3. Employer categorization at a policy-conservative institution.
        if profile.employer_category.is_elevated_risk() {
            if let Some(institution) = banks.conservative_match(&profile.target_bank) {
                reasons.push(RiskReason {
                    code: RiskReasonCode::EmployerCategoryRisk,
                    detail: format!(
                        "{} screens {} applicants under stricter internal policy, \
                         independent of score.",
                        institution, profile.employer_category
                    ),
                });
            }
        }

        let has_category_risk = reasons
            .iter()
            .any(|reason| reason.code == RiskReasonCode::EmployerCategoryRisk);

        let tier = match reasons.len() {
            0 => RiskTier::Low,
            1 if !has_category_risk => RiskTier::Medium,
            _ => RiskTier::High,
        };

        let recommendation = match tier {
            RiskTier::Low => RECOMMEND_HEALTHY.to_string(),
            RiskTier::Medium => match reasons[0].code {
                RiskReasonCode::LowCreditScore => RECOMMEND_SCORE_REPAIR.to_string(),
                _ => RECOMMEND_DEBT_REDUCTION.to_string(),
            },
            RiskTier::High => RECOMMEND_COMBINED.to_string(),
        };

        debug!(
            foir = ?foir,
            reason_count = reasons.len(),
            tier = %tier,
            "Risk assessment complete"
        );

        RiskAssessment {
            tier,
            reasons,
            recommendation,
            foir,
        }
    }
}

/// Representative numeric value of a credit-score band label: the first
/// digit run in the label ("600-699" reads 600, "800+" reads 800). A label
/// with no digits falls back to the fixed proxy.
pub fn credit_band_floor(band: &str) -> u32 {
    let digits: String = band
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().unwrap_or(DEFAULT_SCORE_PROXY)
}

//
// ================= RiskTier Ordering =================
//

impl PartialOrd for RiskTier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.rank().cmp(&other.rank()))
    }
}

impl Ord for RiskTier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl RiskTier {
    fn rank(&self) -> u8 {
        match self {
            RiskTier::Low => 0,
            RiskTier::Medium => 1,
            RiskTier::High => 2,
        }
    }
}

//
// ================= Tests =================
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_bank_directory;
    use crate::models::EmployerCategory;

    fn profile(
        gross: f64,
        debt: f64,
        band: &str,
        bank: &str,
        employer: EmployerCategory,
    ) -> RiskProfile {
        RiskProfile {
            gross_monthly_income: gross,
            monthly_debt_service: debt,
            credit_score_band: band.to_string(),
            target_bank: bank.to_string(),
            employer_category: employer,
        }
    }

    #[test]
    fn test_clean_profile_is_low_risk() {
        let banks = default_bank_directory();
        let assessment = RiskScorer::assess(
            &profile(120000.0, 0.0, "800+", "HDFC Bank", EmployerCategory::ListedCompany),
            &banks,
        );

        assert_eq!(assessment.tier, RiskTier::Low);
        assert!(assessment.reasons.is_empty());
        assert_eq!(assessment.foir, Some(0.0));
    }

    #[test]
    fn test_foir_boundaries() {
        let banks = default_bank_directory();
        // Gross 10000 → estimated net 4500.
        let cases = vec![
            (2025.0, None),                                    // exactly 0.45
            (2700.0, Some(RiskReasonCode::DebtRatioBorderline)), // exactly 0.60
            (2745.0, Some(RiskReasonCode::DebtRatioCritical)),   // 0.61
        ];

        for (debt, expected) in cases {
            let assessment = RiskScorer::assess(
                &profile(10000.0, debt, "750-799", "HDFC Bank", EmployerCategory::PrivateStable),
                &banks,
            );
            let debt_reason = assessment
                .reasons
                .iter()
                .find(|reason| {
                    matches!(
                        reason.code,
                        RiskReasonCode::DebtRatioCritical | RiskReasonCode::DebtRatioBorderline
                    )
                })
                .map(|reason| reason.code);
            assert_eq!(debt_reason, expected, "debt: {}", debt);
        }
    }

    #[test]
    fn test_zero_income_saturates_ratio() {
        let banks = default_bank_directory();
        let assessment = RiskScorer::assess(
            &profile(0.0, 15000.0, "800+", "HDFC Bank", EmployerCategory::PrivateStable),
            &banks,
        );

        assert_eq!(assessment.foir, None);
        assert_eq!(assessment.reasons[0].code, RiskReasonCode::DebtRatioCritical);
    }

    #[test]
    fn test_credit_band_parsing() {
        assert_eq!(credit_band_floor("600-699"), 600);
        assert_eq!(credit_band_floor("750-799"), 750);
        assert_eq!(credit_band_floor("800+"), 800);
        assert_eq!(credit_band_floor("Below 600"), 600);
        assert_eq!(credit_band_floor("excellent"), DEFAULT_SCORE_PROXY);
        assert_eq!(credit_band_floor(""), DEFAULT_SCORE_PROXY);
    }

    #[test]
    fn test_low_score_triggers_reason() {
        let banks = default_bank_directory();
        let assessment = RiskScorer::assess(
            &profile(100000.0, 0.0, "600-699", "HDFC Bank", EmployerCategory::PrivateStable),
            &banks,
        );

        assert_eq!(assessment.tier, RiskTier::Medium);
        assert_eq!(assessment.reasons.len(), 1);
        assert_eq!(assessment.reasons[0].code, RiskReasonCode::LowCreditScore);
        assert_eq!(assessment.recommendation, RECOMMEND_SCORE_REPAIR);
    }

    #[test]
    fn test_borderline_ratio_recommends_debt_reduction() {
        let banks = default_bank_directory();
        let assessment = RiskScorer::assess(
            &profile(10000.0, 2400.0, "750-799", "HDFC Bank", EmployerCategory::PrivateStable),
            &banks,
        );

        assert_eq!(assessment.tier, RiskTier::Medium);
        assert_eq!(assessment.recommendation, RECOMMEND_DEBT_REDUCTION);
    }

    #[test]
    fn test_categorization_risk_forces_high_tier() {
        let banks = default_bank_directory();
        let assessment = RiskScorer::assess(
            &profile(
                200000.0,
                0.0,
                "800+",
                "State Bank of India",
                EmployerCategory::SelfEmployed,
            ),
            &banks,
        );

        assert_eq!(assessment.tier, RiskTier::High);
        assert_eq!(assessment.reasons.len(), 1);
        assert_eq!(
            assessment.reasons[0].code,
            RiskReasonCode::EmployerCategoryRisk
        );
        assert!(assessment.reasons[0].detail.contains("STATE BANK OF INDIA"));
    }

    #[test]
    fn test_elevated_employer_at_flexible_bank_is_clean() {
        let banks = default_bank_directory();
        let assessment = RiskScorer::assess(
            &profile(200000.0, 0.0, "800+", "HDFC Bank", EmployerCategory::SelfEmployed),
            &banks,
        );

        assert_eq!(assessment.tier, RiskTier::Low);
        assert!(assessment.reasons.is_empty());
    }

    #[test]
    fn test_multiple_reasons_escalate_to_high() {
        let banks = default_bank_directory();
        let assessment = RiskScorer::assess(
            &profile(10000.0, 3000.0, "600-699", "HDFC Bank", EmployerCategory::PrivateStable),
            &banks,
        );

        assert_eq!(assessment.tier, RiskTier::High);
        assert_eq!(assessment.reasons.len(), 2);
        // Fixed check order: debt ratio before credit score.
        assert_eq!(assessment.reasons[0].code, RiskReasonCode::DebtRatioCritical);
        assert_eq!(assessment.reasons[1].code, RiskReasonCode::LowCreditScore);
    }

    #[test]
    fn test_tier_is_monotone_in_reasons() {
        let banks = default_bank_directory();
        let clean = RiskScorer::assess(
            &profile(100000.0, 0.0, "800+", "HDFC Bank", EmployerCategory::PrivateStable),
            &banks,
        );
        let one_reason = RiskScorer::assess(
            &profile(100000.0, 0.0, "600-699", "HDFC Bank", EmployerCategory::PrivateStable),
            &banks,
        );
        let two_reasons = RiskScorer::assess(
            &profile(10000.0, 3000.0, "600-699", "HDFC Bank", EmployerCategory::PrivateStable),
            &banks,
        );

        assert!(clean.tier < one_reason.tier);
        assert!(one_reason.tier < two_reasons.tier);
    }

    #[test]
    fn test_assessment_is_idempotent() {
        let banks = default_bank_directory();
        let p = profile(
            48000.0,
            14000.0,
            "700-749",
            "Canara Bank",
            EmployerCategory::EarlyStageStartup,
        );

        let first = RiskScorer::assess(&p, &banks);
        let second = RiskScorer::assess(&p, &banks);
        assert_eq!(first, second);
    }
}
