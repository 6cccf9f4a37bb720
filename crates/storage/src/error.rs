use thiserror::Error;
use uuid::Uuid;

/// Reasons a pitch record cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchValidationError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Invalid type for field {field}: expected {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
}

impl PitchValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredField(field) => field,
            Self::InvalidType { field, .. } => field,
        }
    }

    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::InvalidType { .. } => "invalid_type",
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(#[from] PitchValidationError),

    #[error("Stored document {id} is invalid: {source}")]
    CorruptDocument {
        id: Uuid,
        #[source]
        source: PitchValidationError,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;
