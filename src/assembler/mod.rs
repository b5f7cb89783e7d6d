//! Plan assembler - runs the deterministic facts pipeline
//!
//! CLASSIFY → RESOLVE → SIMULATE → SCORE → RECORD
//!
//! Per request: classify the text, resolve bank policy when the topic is
//! bank-relevant, run whichever calculators the request carries inputs
//! for, and hand the resulting structured facts to the downstream
//! explanation generator. No NLG, no network, no per-session state.

use crate::audit::{compute_request_hash, AuditLog, FactsRecord};
use crate::catalog::{default_bank_directory, default_topic_catalog};
use crate::classifier::TopicClassifier;
use crate::deposit::simulate_deposit;
use crate::models::{FactsBundle, FactsRequest};
use crate::policy::BankPolicyDirectory;
use crate::risk::RiskScorer;
use crate::Result;
use chrono::Utc;
use tracing::{info, warn};

/// Topics for which a bank policy lookup is worth running.
const BANK_POLICY_TOPICS: &[&str] = &["home_loan", "education_loan", "loan_default"];

pub struct PlanAssembler {
    classifier: TopicClassifier,
    banks: BankPolicyDirectory,
    audit: AuditLog,
}

impl PlanAssembler {
    pub fn new(classifier: TopicClassifier, banks: BankPolicyDirectory, audit: AuditLog) -> Self {
        Self {
            classifier,
            banks,
            audit,
        }
    }

    /// Assembler over the built-in catalogs.
    pub fn with_defaults() -> Self {
        Self::new(
            TopicClassifier::new(default_topic_catalog()),
            default_bank_directory(),
            AuditLog::new(),
        )
    }

    pub fn banks(&self) -> &BankPolicyDirectory {
        &self.banks
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Run the full pipeline for one request.
    pub fn assemble(&self, request: FactsRequest) -> Result<FactsBundle> {
        let mut trace = Vec::new();

        // 1. Topic classification
        let topic = self.classifier.classify(&request.text);
        match &topic {
            Some(id) => trace.push(format!("Classified request as topic '{}'", id)),
            None => trace.push("No topic matched; reply stays generic".to_string()),
        }

        info!(
            request_id = ?request.request_id,
            topic = ?topic.as_ref().map(|id| id.as_str()),
            "Topic classification complete"
        );

        // 2. Bank policy, only when the topic calls for it
        let bank_relevant = topic
            .as_ref()
            .map(|id| BANK_POLICY_TOPICS.contains(&id.as_str()))
            .unwrap_or(false);

        let bank_policy = if bank_relevant {
            let resolved = self.banks.resolve(&request.text);
            if resolved.matched {
                trace.push(format!("Bank policy resolved for {}", resolved.policy.bank));
            } else {
                warn!(request_id = ?request.request_id, "No bank matched; universal policy used");
                trace.push(
                    "No bank recognized; universal policy defaults apply and the user should \
                     be told the figures are generic"
                        .to_string(),
                );
            }
            Some(resolved)
        } else {
            None
        };

        // 3. Deposit simulation
        let deposit = request.deposit.as_ref().map(|input| {
            let result = simulate_deposit(input);
            trace.push(format!(
                "Simulated ₹{:.2}/month over {} months at {}% → maturity ₹{:.2}",
                input.monthly_amount,
                input.tenure_months,
                input.annual_rate_percent,
                result.maturity_amount
            ));
            result
        });

        // 4. Risk scoring
        let risk = request.risk_profile.as_ref().map(|profile| {
            let assessment = RiskScorer::assess(profile, &self.banks);
            trace.push(format!(
                "Risk tier {} with {} triggered reason(s)",
                assessment.tier,
                assessment.reasons.len()
            ));
            assessment
        });

        let bundle = FactsBundle {
            request_id: request.request_id,
            topic,
            bank_policy,
            deposit,
            risk,
            reasoning_trace: trace,
            assembled_at: Utc::now(),
        };

        // 5. Audit trail
        let request_hash = compute_request_hash(&request);
        self.audit.record(FactsRecord {
            audit_id: request.request_id,
            request,
            request_hash,
            bundle: bundle.clone(),
            recorded_at: Utc::now(),
        })?;

        info!(
            request_id = ?bundle.request_id,
            trace_len = bundle.reasoning_trace.len(),
            "Facts bundle assembled"
        );

        Ok(bundle)
    }
}

//
// ================= Tests =================
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DepositSimulationInput, EmployerCategory, RiskProfile, TopicId};

    #[test]
    fn test_home_loan_request_resolves_bank_policy() {
        let assembler = PlanAssembler::with_defaults();
        let bundle = assembler
            .assemble(FactsRequest::new("get a HDFC Bank home loan"))
            .unwrap();

        assert_eq!(bundle.topic, Some(TopicId::from("home_loan")));
        let resolved = bundle.bank_policy.expect("bank policy should be attached");
        assert!(resolved.matched);
        assert_eq!(resolved.policy.bank, "HDFC BANK");
    }

    #[test]
    fn test_unknown_bank_is_flagged_generic() {
        let assembler = PlanAssembler::with_defaults();
        let bundle = assembler
            .assemble(FactsRequest::new("home loan from Some Village Cooperative"))
            .unwrap();

        let resolved = bundle.bank_policy.expect("bank policy should be attached");
        assert!(!resolved.matched);
        assert_eq!(&resolved.policy, assembler.banks().defaults());
    }

    #[test]
    fn test_non_bank_topic_skips_policy_lookup() {
        let assembler = PlanAssembler::with_defaults();
        let bundle = assembler
            .assemble(FactsRequest::new("is an 11 month rent agreement valid"))
            .unwrap();

        assert_eq!(bundle.topic, Some(TopicId::from("rent_agreement")));
        assert!(bundle.bank_policy.is_none());
    }

    #[test]
    fn test_calculators_run_when_inputs_present() {
        let assembler = PlanAssembler::with_defaults();
        let request = FactsRequest::new("what will my recurring deposit mature to")
            .with_deposit(DepositSimulationInput {
                monthly_amount: 5000.0,
                annual_rate_percent: 7.5,
                tenure_months: 24,
            })
            .with_risk_profile(RiskProfile {
                gross_monthly_income: 90000.0,
                monthly_debt_service: 12000.0,
                credit_score_band: "750-799".to_string(),
                target_bank: "HDFC Bank".to_string(),
                employer_category: EmployerCategory::PrivateStable,
            });

        let bundle = assembler.assemble(request).unwrap();

        assert_eq!(bundle.topic, Some(TopicId::from("recurring_deposit")));
        assert_eq!(bundle.deposit.unwrap().maturity_amount, 130580.66);
        assert!(bundle.risk.is_some());
    }

    #[test]
    fn test_bundle_is_recorded_in_audit_log() {
        let assembler = PlanAssembler::with_defaults();
        let request = FactsRequest::new("HDFC home loan");
        let request_id = request.request_id;

        assembler.assemble(request).unwrap();

        assert_eq!(assembler.audit().len().unwrap(), 1);
        assert!(assembler.audit().verify_integrity(request_id).unwrap());
    }

    #[test]
    fn test_assembly_is_deterministic_for_same_request() {
        let assembler = PlanAssembler::with_defaults();
        let first = assembler
            .assemble(FactsRequest::new("HDFC home loan"))
            .unwrap();
        let second = assembler
            .assemble(FactsRequest::new("HDFC home loan"))
            .unwrap();

        assert_eq!(first.topic, second.topic);
        assert_eq!(first.bank_policy, second.bank_policy);
        assert_eq!(first.reasoning_trace, second.reasoning_trace);
    }
}
