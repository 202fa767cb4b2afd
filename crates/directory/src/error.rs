//! # Directory Errors
//!
//! Error types for the flat-file layer, wrapping csv, IO and account errors.

use riverbank_core::AccountError;
use thiserror::Error;

/// Directory layer errors
#[derive(Debug, Error)]
pub enum DirectoryError {
    // === File errors ===
    #[error("Directory IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    // === Record errors ===
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Invalid client: {0}")]
    ClientValidation(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown account type: {0}")]
    UnknownAccountType(String),

    // === Lookup errors ===
    #[error("Account not found: {0}")]
    UnknownAccount(u32),

    #[error("Client not found: {0}")]
    UnknownClient(u32),
}

/// Result type alias with DirectoryError
pub type DirectoryResult<T> = Result<T, DirectoryError>;

impl DirectoryError {
    pub fn missing_column(file: &str, column: &str) -> Self {
        Self::MissingColumn {
            file: file.to_string(),
            column: column.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownAccount(_) | Self::UnknownClient(_))
    }
}
