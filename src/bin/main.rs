use civic_facts_engine::{
    assembler::PlanAssembler,
    audit::AuditLog,
    catalog::{self, default_bank_directory, default_topic_catalog},
    classifier::TopicClassifier,
    models::{DepositSimulationInput, EmployerCategory, FactsRequest, RiskProfile},
};
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("Civic facts engine starting");

    let assembler = build_assembler()?;

    let requests = vec![
        FactsRequest::new("get a HDFC Bank home loan"),
        FactsRequest::new("recovery agent keeps threatening my family"),
        FactsRequest::new("what will my recurring deposit mature to").with_deposit(
            DepositSimulationInput {
                monthly_amount: 5000.0,
                annual_rate_percent: 7.5,
                tenure_months: 24,
            },
        ),
        FactsRequest::new("will SBI reject my home loan").with_risk_profile(RiskProfile {
            gross_monthly_income: 60000.0,
            monthly_debt_service: 21000.0,
            credit_score_band: "600-699".to_string(),
            target_bank: "State Bank of India".to_string(),
            employer_category: EmployerCategory::EarlyStageStartup,
        }),
    ];

    for request in requests {
        info!(
            request_id = ?request.request_id,
            text = %request.text,
            "Assembling facts"
        );

        let bundle = assembler.assemble(request)?;

        println!("\n=== FACTS BUNDLE ===");
        println!("Request ID: {}", bundle.request_id);
        match &bundle.topic {
            Some(topic) => println!("Topic: {}", topic),
            None => println!("Topic: (none)"),
        }
        if let Some(resolved) = &bundle.bank_policy {
            println!(
                "Bank policy: {} (matched: {})",
                resolved.policy.bank, resolved.matched
            );
        }
        if let Some(deposit) = &bundle.deposit {
            println!(
                "Deposit maturity: ₹{:.2} (interest ₹{:.2})",
                deposit.maturity_amount, deposit.total_interest
            );
        }
        if let Some(risk) = &bundle.risk {
            println!("Risk tier: {}", risk.tier);
            for (i, reason) in risk.reasons.iter().enumerate() {
                println!("  {}: {}", i + 1, reason.detail);
            }
            println!("Recommendation: {}", risk.recommendation);
        }
        println!("\nReasoning Trace:");
        for (i, line) in bundle.reasoning_trace.iter().enumerate() {
            println!("  {}: {}", i + 1, line);
        }
    }

    println!("\nAudited requests: {}", assembler.audit().len()?);

    Ok(())
}

/// Build the assembler from env-configured catalog files, falling back to
/// the built-in tables.
fn build_assembler() -> Result<PlanAssembler, Box<dyn std::error::Error>> {
    let topic_catalog = match env::var("FACTS_TOPIC_CATALOG") {
        Ok(path) => {
            info!(path = %path, "Loading topic catalog from file");
            catalog::load_topic_catalog(&PathBuf::from(path))?
        }
        Err(_) => default_topic_catalog(),
    };

    let banks = match env::var("FACTS_BANK_TABLE") {
        Ok(path) => {
            info!(path = %path, "Loading bank table from file");
            catalog::load_bank_directory(&PathBuf::from(path))?
        }
        Err(_) => default_bank_directory(),
    };

    Ok(PlanAssembler::new(
        TopicClassifier::new(topic_catalog),
        banks,
        AuditLog::new(),
    ))
}
