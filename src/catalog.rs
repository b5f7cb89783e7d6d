//! Built-in catalogs and policy tables, plus JSON loaders
//!
//! The defaults reproduce the production topic routing and bank lending
//! tables; callers can substitute their own via the `load_*` functions.
//! Everything here is constructed once and treated as immutable.

use crate::classifier::TopicCatalog;
use crate::error::Result;
use crate::models::{
    BankPolicy, BankPolicyOverride, BenchmarkScheme, TopicCategory, TopicId,
};
use crate::policy::BankPolicyDirectory;
use lazy_static::lazy_static;
use serde::Deserialize;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref DEFAULT_TOPIC_CATALOG: TopicCatalog =
        build_topic_catalog().expect("built-in topic catalog is valid");
    static ref DEFAULT_BANK_DIRECTORY: BankPolicyDirectory =
        build_bank_directory().expect("built-in bank table is valid");
}

/// The built-in topic catalog, in priority order.
pub fn default_topic_catalog() -> TopicCatalog {
    DEFAULT_TOPIC_CATALOG.clone()
}

/// The built-in bank policy table with universal defaults.
pub fn default_bank_directory() -> BankPolicyDirectory {
    DEFAULT_BANK_DIRECTORY.clone()
}

/// Load a topic catalog from a JSON array of categories.
pub fn load_topic_catalog(path: &Path) -> Result<TopicCatalog> {
    let raw = fs::read_to_string(path)?;
    let categories: Vec<TopicCategory> = serde_json::from_str(&raw)?;
    TopicCatalog::new(categories)
}

#[derive(Deserialize)]
struct BankTableFile {
    defaults: BankPolicy,
    banks: Vec<BankTableEntry>,
    #[serde(default)]
    conservative: Vec<String>,
}

#[derive(Deserialize)]
struct BankTableEntry {
    name: String,
    policy: BankPolicyOverride,
}

/// Load a bank policy table from JSON: universal defaults, an ordered list
/// of bank overrides, and the conservative-institution list.
pub fn load_bank_directory(path: &Path) -> Result<BankPolicyDirectory> {
    let raw = fs::read_to_string(path)?;
    let file: BankTableFile = serde_json::from_str(&raw)?;

    let entries = file
        .banks
        .into_iter()
        .map(|entry| (entry.name, entry.policy))
        .collect();

    BankPolicyDirectory::new(file.defaults, entries, file.conservative)
}

//
// ================= Topic Catalog Data =================
//

fn topic(id: &str, keywords: &[&str]) -> TopicCategory {
    TopicCategory {
        id: TopicId::from(id),
        keywords: keywords.iter().map(|kw| kw.to_string()).collect(),
    }
}

fn build_topic_catalog() -> Result<TopicCatalog> {
    // Declaration order is resolution priority: urgent and specific
    // categories sit above the general ones they overlap with.
    TopicCatalog::new(vec![
        topic(
            "recovery_harassment",
            &["RECOVERY AGENT", "HARASS", "GOONS", "THREAT", "AGENT CALLING"],
        ),
        topic(
            "cheque_bounce",
            &["CHEQUE BOUNCE", "CHEQUE", "NI ACT", "SECTION 138"],
        ),
        topic(
            "pf_withdrawal",
            &["PF WITHDRAWAL", "PROVIDENT FUND", "EPFO", "EPF", "PF"],
        ),
        topic(
            "home_loan",
            &["HOME LOAN", "HOUSING LOAN", "MORTGAGE", "HOUSE PURCHASE"],
        ),
        topic(
            "education_loan",
            &["EDUCATION LOAN", "STUDENT LOAN", "80E"],
        ),
        topic(
            "loan_default",
            &["LOAN DEFAULT", "DEFAULT", "CANNOT PAY EMI", "MISSED EMI"],
        ),
        topic(
            "recurring_deposit",
            &["RECURRING DEPOSIT", "RD MATURITY", "RD ACCOUNT", "DEPOSIT MATURITY"],
        ),
        topic(
            "rent_agreement",
            &["RENT", "LEASE", "TENANT", "LANDLORD", "11 MONTH"],
        ),
        topic(
            "tax_notice",
            &["TAX", "ITR", "143(1)", "MISMATCH NOTICE", "RECTIFICATION"],
        ),
        topic(
            "property_dispute",
            &["SALE DEED", "BUILDER FRAUD", "PROPERTY DISPUTE", "SUB-REGISTRAR"],
        ),
        topic(
            "employment_bond",
            &["EMPLOYMENT BOND", "NOTICE PERIOD", "RESIGN"],
        ),
        topic(
            "merchandise_ip",
            &["TRADEMARK", "MERCHANDISE", "PASSING OFF", "FAN GEAR"],
        ),
    ])
}

//
// ================= Bank Policy Data =================
//

fn universal_defaults() -> BankPolicy {
    BankPolicy {
        bank: "UNIVERSAL".to_string(),
        age_eligibility: "21 to 70 years, subject to loan maturity age caps".to_string(),
        benchmark: BenchmarkScheme::ExternalBenchmark,
        fee_structure: "Typically 0.25% to 0.50% of loan amount + GST; caps vary by lender"
            .to_string(),
        income_rule: "Assessed on Net Monthly Income (NMI) and FOIR; no universal minimum"
            .to_string(),
        doc_recency: "Last 3 months salary slips, or 2-3 years ITR for self-employed".to_string(),
        income_disclaimer: "Never state a maximum income limit".to_string(),
        cibil_note: "Banks pull the CIBIL report themselves; the applicant does not submit one"
            .to_string(),
        rate_type: "Home loans are primarily floating-rate, linked to an external benchmark"
            .to_string(),
        tenure_cap: "Maximum repayment tenure is bounded by the age cap (usually 70 years)"
            .to_string(),
    }
}

struct BankRow {
    name: &'static str,
    age: &'static str,
    benchmark: BenchmarkScheme,
    fees: &'static str,
    income: &'static str,
    docs: &'static str,
}

fn bank_rows() -> Vec<BankRow> {
    use BenchmarkScheme::*;

    vec![
        // --- Public sector banks ---
        BankRow {
            name: "STATE BANK OF INDIA",
            age: "18 to 70 years (loan maturity)",
            benchmark: ExternalBenchmark,
            fees: "0.35% of loan amount + GST, capped at ₹10,000 + GST (often zero)",
            income: "Based on Net Monthly Income (NMI) and FOIR; no fixed minimum published",
            docs: "2-3 years ITR/Form 16 required for self-employed",
        },
        BankRow {
            name: "PUNJAB NATIONAL BANK",
            age: "21 to 70 years (loan maturity)",
            benchmark: RepoLinked,
            fees: "0.35% of loan amount + GST, with minimum/maximum caps",
            income: "Based on net take-home pay and repayment capacity",
            docs: "Last 3 months salary slips; 2 years ITR for non-salaried",
        },
        BankRow {
            name: "BANK OF BARODA",
            age: "18 or 21 (scheme dependent) up to a maximum of 70 years",
            benchmark: ExternalBenchmark,
            fees: "Usually 0.50% of the loan amount, subject to a minimum/maximum cap",
            income: "Based on Net Monthly Income and FOIR; no maximum limit",
            docs: "3-6 months salary slips, ITR/Form 16 required",
        },
        BankRow {
            name: "CANARA BANK",
            age: "18 to 70 years (loan maturity)",
            benchmark: RepoLinked,
            fees: "0.50% of loan amount + GST, capped at ₹20,000",
            income: "NMI must meet the minimum requirement specified by the branch",
            docs: "Last 3 months salary slip",
        },
        BankRow {
            name: "UNION BANK OF INDIA",
            age: "18 to 75 years (loan maturity)",
            benchmark: ExternalBenchmark,
            fees: "0.50% of loan amount + GST, minimum ₹1,500",
            income: "Net annual income must be adequate to maintain sufficient FOIR",
            docs: "Last 3 months salary slip; 3 years ITR for non-salaried",
        },
        BankRow {
            name: "BANK OF INDIA",
            age: "18 to 70 years (loan maturity)",
            benchmark: RepoBased,
            fees: "0.25% of loan amount + GST, capped at ₹10,000",
            income: "Minimum Net Monthly Income specified for metro/urban areas",
            docs: "Last 6 months bank statement; 2 years ITR",
        },
        BankRow {
            name: "INDIAN BANK",
            age: "21 to 70 years (loan maturity)",
            benchmark: RepoLinked,
            fees: "0.25% of loan amount + GST",
            income: "Adequate repayment capacity based on NMI and existing loans",
            docs: "Last 3 months salary slip",
        },
        BankRow {
            name: "UCO BANK",
            age: "21 to 70 years (loan maturity)",
            benchmark: RepoLinked,
            fees: "0.25% of loan amount + GST",
            income: "Based on NMI and FOIR",
            docs: "Last 6 months bank statement",
        },
        BankRow {
            name: "INDIAN OVERSEAS BANK",
            age: "21 to 60 years (loan maturity)",
            benchmark: RepoLinked,
            fees: "0.50% of loan amount + GST",
            income: "Sufficient net monthly income to cover EMIs",
            docs: "3 years ITR/assessment order",
        },
        BankRow {
            name: "CENTRAL BANK OF INDIA",
            age: "18 to 70 years (loan maturity)",
            benchmark: RepoBased,
            fees: "0.50% of loan amount + GST, minimum ₹2,000",
            income: "Clear repayment capacity based on gross monthly income",
            docs: "Last 6 months bank statement",
        },
        BankRow {
            name: "BANK OF MAHARASHTRA",
            age: "21 to 70 years (loan maturity)",
            benchmark: RepoLinked,
            fees: "0.25% of loan amount + GST, capped at ₹20,000",
            income: "Minimum NMI required; varies by location",
            docs: "Last 3 months salary slip",
        },
        BankRow {
            name: "PUNJAB & SIND BANK",
            age: "21 to 70 years (loan maturity)",
            benchmark: RepoLinked,
            fees: "0.40% of loan amount + GST",
            income: "Minimum monthly income necessary to cover installments",
            docs: "Last 6 months bank statement",
        },
        // --- Private sector banks ---
        BankRow {
            name: "HDFC BANK",
            age: "21 to 65 years (loan maturity)",
            benchmark: RetailPrime,
            fees: "Up to 1.50% of loan amount + GST, minimum ₹3,000",
            income: "Minimum monthly salary of ₹15,000 in non-metro and ₹25,000 in metro cities",
            docs: "Last 3 months salary slips; 3 years ITR for self-employed",
        },
        BankRow {
            name: "ICICI BANK",
            age: "21 to 65 years (loan maturity)",
            benchmark: RetailPrime,
            fees: "Up to 1.50% of loan amount + GST",
            income: "Based on repayment capacity and FOIR",
            docs: "Last 3 months salary slips",
        },
        BankRow {
            name: "AXIS BANK",
            age: "21 to 65 years (loan maturity)",
            benchmark: MarginalCost,
            fees: "Ranges from 0.5% to 1.0% of loan amount + GST",
            income: "Specific minimum monthly income often required",
            docs: "2 years ITR/Form 16 minimum",
        },
        BankRow {
            name: "KOTAK MAHINDRA BANK",
            age: "18 to 65 years (loan maturity)",
            benchmark: RepoBased,
            fees: "Up to 1.50% of loan amount + GST",
            income: "Minimum net annual income specified",
            docs: "Last 3 months salary slip",
        },
        BankRow {
            name: "INDUSIND BANK",
            age: "21 to 70 years (loan maturity)",
            benchmark: MarginalCost,
            fees: "0.50% to 1.0% of loan amount + GST",
            income: "Based on income, debt, and repayment history",
            docs: "Last 3 months salary slips",
        },
        BankRow {
            name: "YES BANK",
            age: "21 to 65 years (loan maturity)",
            benchmark: MarginalCost,
            fees: "0.50% to 1.0% of loan amount + GST",
            income: "Minimum net annual income required",
            docs: "3 months salary slip; 2 years ITR",
        },
        BankRow {
            name: "FEDERAL BANK",
            age: "21 to 60 years (loan maturity)",
            benchmark: RepoLinked,
            fees: "0.50% of loan amount + GST",
            income: "Adequate repayment capacity based on NMI",
            docs: "Last 6 months bank statement",
        },
        BankRow {
            name: "IDFC FIRST BANK",
            age: "21 to 65 years (loan maturity)",
            benchmark: MarginalCost,
            fees: "Up to 1.50% of loan amount + GST",
            income: "Based on financial stability and credit history",
            docs: "Last 3 months salary slips",
        },
    ]
}

/// Public-sector banks screen elevated-risk employer categories harder.
const CONSERVATIVE_BANKS: &[&str] = &[
    "STATE BANK OF INDIA",
    "PUNJAB NATIONAL BANK",
    "BANK OF BARODA",
    "CANARA BANK",
    "UNION BANK OF INDIA",
    "BANK OF INDIA",
    "INDIAN BANK",
    "UCO BANK",
    "INDIAN OVERSEAS BANK",
    "CENTRAL BANK OF INDIA",
    "BANK OF MAHARASHTRA",
    "PUNJAB & SIND BANK",
];

fn build_bank_directory() -> Result<BankPolicyDirectory> {
    let entries = bank_rows()
        .into_iter()
        .map(|row| {
            (
                row.name.to_string(),
                BankPolicyOverride {
                    age_eligibility: Some(row.age.to_string()),
                    benchmark: Some(row.benchmark),
                    fee_structure: Some(row.fees.to_string()),
                    income_rule: Some(row.income.to_string()),
                    doc_recency: Some(row.docs.to_string()),
                },
            )
        })
        .collect();

    BankPolicyDirectory::new(
        universal_defaults(),
        entries,
        CONSERVATIVE_BANKS.iter().map(|name| name.to_string()).collect(),
    )
}

//
// ================= Tests =================
//
