//! # Error Module
//!
//! Domain errors for the account model, built on thiserror.

use crate::money::format_currency;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Identity fields that must parse as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    AccountNumber,
    ClientNumber,
}

impl IdentityField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityField::AccountNumber => "Account number",
            IdentityField::ClientNumber => "Client number",
        }
    }
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account errors surfaced to callers.
///
/// A failed call never leaves the account modified. Malformed kind-specific
/// parameters are not represented here: they are replaced by defaults in
/// [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    // === Construction ===
    #[error("{field} must be an integer: {value:?}")]
    InvalidIdentity { field: IdentityField, value: String },

    // === Transactions ===
    #[error("{0}")]
    InvalidAmount(String),

    #[error(
        "Withdrawal amount: {} must not exceed the account balance: {}",
        currency(.requested),
        currency(.available)
    )]
    InsufficientFunds { requested: Decimal, available: Decimal },
}

fn currency(amount: &Decimal) -> String {
    format_currency(*amount)
}

/// Result type alias with AccountError
pub type AccountResult<T> = Result<T, AccountError>;

impl AccountError {
    pub fn invalid_identity(field: IdentityField, value: &str) -> Self {
        Self::InvalidIdentity {
            field,
            value: value.to_string(),
        }
    }

    pub fn insufficient_funds(requested: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            requested,
            available,
        }
    }

    /// The change would take the balance outside the representable range.
    pub fn balance_overflow(delta: Decimal) -> Self {
        Self::InvalidAmount(format!(
            "Balance change: {} would overflow the account balance.",
            format_currency(delta)
        ))
    }

    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, AccountError::InvalidAmount(_))
    }

    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, AccountError::InsufficientFunds { .. })
    }
}

/// Account type name that matches no known kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown account type: {0}")]
pub struct UnknownAccountType(pub String);

/// Failure reported by an observer while handling a message.
///
/// Never propagated past [`crate::ObserverList::notify`].
#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("Observer '{observer}' failed: {reason}")]
    DeliveryFailed { observer: String, reason: String },

    #[error("Observer IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ObserverError {
    pub fn delivery_failed(observer: &str, reason: impl Into<String>) -> Self {
        Self::DeliveryFailed {
            observer: observer.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors loading a [`crate::BankConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
