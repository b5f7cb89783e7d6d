//! Civic Facts Engine
//!
//! The deterministic decision layer behind a civic/financial assistant:
//! - Routes free text to a fixed topic catalog (first match wins)
//! - Resolves bank lending policy by layering bank records on universal defaults
//! - Simulates recurring-deposit maturity with quarterly compounding
//! - Scores loan-rejection risk from income, obligations, score band, employer
//!
//! Every output is computed, never generated: the downstream explanation
//! layer (LLM, templates, UI) consumes the structured facts produced here.
//!
//! PIPELINE: CLASSIFY → RESOLVE → SIMULATE → SCORE → RECORD

pub mod assembler;
pub mod audit;
pub mod catalog;
pub mod classifier;
pub mod deposit;
pub mod error;
pub mod models;
pub mod policy;
pub mod risk;

pub use error::Result;

// Re-export common types
pub use assembler::PlanAssembler;
pub use classifier::{TopicCatalog, TopicClassifier};
pub use deposit::simulate_deposit;
pub use models::*;
pub use policy::BankPolicyDirectory;
pub use risk::RiskScorer;
