//! Core data models for the facts engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

//
// ================= Topics =================
//

/// Identifier of a topic category, taken from the catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TopicId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One entry of the topic catalog. Catalog order is priority order:
/// the first category with a keyword hit wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicCategory {
    pub id: TopicId,
    pub keywords: Vec<String>,
}

//
// ================= Bank Policy =================
//

/// Benchmark-rate scheme a bank prices its floating home loans against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkScheme {
    /// EBLR — external benchmark (repo) linked
    ExternalBenchmark,
    /// RLLR — repo linked lending rate
    RepoLinked,
    /// RBLR — repo based lending rate
    RepoBased,
    /// RPLR — retail prime lending rate
    RetailPrime,
    /// MCLR — marginal cost of funds based
    MarginalCost,
}

impl BenchmarkScheme {
    pub fn label(&self) -> &'static str {
        match self {
            BenchmarkScheme::ExternalBenchmark => "EBLR (External Benchmark Lending Rate)",
            BenchmarkScheme::RepoLinked => "RLLR (Repo Linked Lending Rate)",
            BenchmarkScheme::RepoBased => "RBLR (Repo Based Lending Rate)",
            BenchmarkScheme::RetailPrime => "RPLR (Retail Prime Lending Rate)",
            BenchmarkScheme::MarginalCost => "MCLR (Marginal Cost of Funds based Lending Rate)",
        }
    }
}

/// A fully-populated lending policy record. Every field carries a value:
/// the universal defaults fill whatever a bank-specific override omits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankPolicy {
    pub bank: String,
    pub age_eligibility: String,
    pub benchmark: BenchmarkScheme,
    pub fee_structure: String,
    pub income_rule: String,
    pub doc_recency: String,
    pub income_disclaimer: String,
    pub cibil_note: String,
    pub rate_type: String,
    pub tenure_cap: String,
}

/// Bank-specific overrides, layered on the universal defaults.
/// `None` means "inherit the universal value".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankPolicyOverride {
    pub age_eligibility: Option<String>,
    pub benchmark: Option<BenchmarkScheme>,
    pub fee_structure: Option<String>,
    pub income_rule: Option<String>,
    pub doc_recency: Option<String>,
}

/// Outcome of a bank lookup. `matched = false` means the caller got the
/// universal defaults only and should warn the user the data is generic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPolicy {
    pub policy: BankPolicy,
    pub matched: bool,
}

//
// ================= Deposit Simulation =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DepositSimulationInput {
    pub monthly_amount: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepositSimulationResult {
    pub maturity_amount: f64,
    pub total_interest: f64,
}

//
// ================= Risk Scoring =================
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployerCategory {
    Government,
    ListedCompany,
    PrivateStable,
    EarlyStageStartup,
    SelfEmployed,
}

impl EmployerCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "government" | "psu" | "public sector" => Some(Self::Government),
            "listed" | "listed company" | "mnc" => Some(Self::ListedCompany),
            "private" | "private stable" | "established private" => Some(Self::PrivateStable),
            "startup" | "early startup" | "early-stage startup" => Some(Self::EarlyStageStartup),
            "self-employed" | "self employed" | "business" => Some(Self::SelfEmployed),
            _ => None,
        }
    }

    /// Categories that conservative lenders screen harder, independent of score.
    pub fn is_elevated_risk(self) -> bool {
        matches!(self, Self::EarlyStageStartup | Self::SelfEmployed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskProfile {
    pub gross_monthly_income: f64,
    pub monthly_debt_service: f64,
    /// Raw band label as selected in the UI, e.g. "750-799" or "800+".
    pub credit_score_band: String,
    pub target_bank: String,
    pub employer_category: EmployerCategory,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskReasonCode {
    DebtRatioCritical,
    DebtRatioBorderline,
    LowCreditScore,
    EmployerCategoryRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReason {
    pub code: RiskReasonCode,
    pub detail: String,
}

/// Produced fresh per request, never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub reasons: Vec<RiskReason>,
    pub recommendation: String,
    /// Fixed-obligation-to-income ratio. `None` when estimated net income
    /// is zero or negative (saturated risk, not a division fault).
    pub foir: Option<f64>,
}

//
// ================= Facts Request =================
//

/// One request into the facts layer. The free text drives classification
/// and bank resolution; the optional blocks drive the two calculators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactsRequest {
    pub request_id: Uuid,
    pub text: String,
    pub deposit: Option<DepositSimulationInput>,
    pub risk_profile: Option<RiskProfile>,
    pub created_at: DateTime<Utc>,
}

impl FactsRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            text: text.into(),
            deposit: None,
            risk_profile: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_deposit(mut self, input: DepositSimulationInput) -> Self {
        self.deposit = Some(input);
        self
    }

    pub fn with_risk_profile(mut self, profile: RiskProfile) -> Self {
        self.risk_profile = Some(profile);
        self
    }
}

//
// ================= Facts Bundle =================
//

/// Deterministic facts handed to the downstream explanation generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactsBundle {
    pub request_id: Uuid,
    pub topic: Option<TopicId>,
    pub bank_policy: Option<ResolvedPolicy>,
    pub deposit: Option<DepositSimulationResult>,
    pub risk: Option<RiskAssessment>,
    pub reasoning_trace: Vec<String>,
    pub assembled_at: DateTime<Utc>,
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BenchmarkScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for EmployerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EmployerCategory::Government => "Government",
            EmployerCategory::ListedCompany => "Listed Company",
            EmployerCategory::PrivateStable => "Private (Established)",
            EmployerCategory::EarlyStageStartup => "Early-Stage Startup",
            EmployerCategory::SelfEmployed => "Self-Employed",
        };
        write!(f, "{}", s)
    }
}
