//! Error types for the facts engine

use thiserror::Error;

/// Result type alias for facts-engine operations
pub type Result<T> = std::result::Result<T, FactsError>;

#[derive(Error, Debug)]
pub enum FactsError {

    // =============================
    // Catalog / Table Construction
    // =============================

    #[error("Topic catalog error: {0}")]
    CatalogError(String),

    #[error("Bank policy table error: {0}")]
    PolicyTableError(String),

    // =============================
    // Audit Trail
    // =============================

    #[error("Audit error: {0}")]
    AuditError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
