//! Error types for the email triage service.

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Errors raised while classifying an email.
///
/// `Validation` is the only failure of the pure pipeline. `Storage` comes
/// from the record store around it.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("{0}")]
    Validation(String),

    #[error("Storage failed: {0}")]
    Storage(#[from] DatabaseError),
}

impl ClassifyError {
    /// The standard rejection for blank email content.
    pub fn empty_content() -> Self {
        Self::Validation("Email content is required".to_string())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
