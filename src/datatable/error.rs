use crate::form::ValidationErrors;
use crate::model::RecordId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataTableError {
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("No form is open (use `add` or `edit` first)")]
    NoActiveForm,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ValidationErrors> for DataTableError {
    fn from(errors: ValidationErrors) -> Self {
        DataTableError::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, DataTableError>;
