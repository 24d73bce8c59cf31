use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegdeskError {
    #[error("Invalid input for {}: {}", .0.field, .0.reason)]
    Validation(#[from] ValidationError),

    #[error("Duplicated data on unique field {field}: {value}")]
    DuplicateField { field: String, value: String },

    #[error("{kind} [{key}] does not exist")]
    NotFound { kind: &'static str, key: String },

    #[error("The {kind} code [{code}] does not exist in the data")]
    Reference { kind: &'static str, code: String },

    #[error("{0}")]
    Expired(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Input stream closed")]
    InputClosed,

    #[error("Store error: {0}")]
    Store(String),
}

impl RegdeskError {
    pub fn duplicate(field: impl std::fmt::Display, value: impl Into<String>) -> Self {
        RegdeskError::DuplicateField {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn not_found(kind: &'static str, key: impl std::fmt::Display) -> Self {
        RegdeskError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// Expected business outcomes a user can recover from by trying again.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RegdeskError::Validation(_)
                | RegdeskError::DuplicateField { .. }
                | RegdeskError::NotFound { .. }
                | RegdeskError::Reference { .. }
                | RegdeskError::Expired(_)
                | RegdeskError::Store(_)
        )
    }
}


pub type Result<T> = std::result::Result<T, RegdeskError>;
