//! Parse-or-default helpers for account construction
//!
//! Identity fields fail hard. Every other numeric parameter falls back to a
//! configured default and logs the substitution.

use crate::error::{AccountError, AccountResult, IdentityField};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an account or client number.
pub fn parse_identity(field: IdentityField, raw: &str) -> AccountResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| AccountError::invalid_identity(field, raw))
}

/// Accepted range of a decimal parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Any,
    NonNegative,
    NonPositive,
}

impl Bound {
    pub fn admits(&self, value: Decimal) -> bool {
        match self {
            Bound::Any => true,
            Bound::NonNegative => value >= Decimal::ZERO,
            Bound::NonPositive => value <= Decimal::ZERO,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Bound::Any => "any",
            Bound::NonNegative => ">= 0",
            Bound::NonPositive => "<= 0",
        }
    }
}

/// Parse a decimal parameter, substituting `default` when absent, malformed or
/// outside `bound`.
///
/// `None`, an empty string and the record placeholder `Null` count as absent.
pub fn decimal_or_default(
    parameter: &str,
    raw: Option<&str>,
    default: Decimal,
    bound: Bound,
) -> Decimal {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty() && *t != "Null") else {
        tracing::debug!(parameter, %default, "Parameter absent, using default");
        return default;
    };

    match Decimal::from_str(text) {
        Ok(value) if bound.admits(value) => value,
        Ok(value) => {
            tracing::warn!(
                parameter,
                %value,
                bound = bound.as_str(),
                %default,
                "Value out of range, using default"
            );
            default
        }
        Err(_) => {
            tracing::warn!(
                parameter,
                value = text,
                %default,
                "Invalid configuration value, using default"
            );
            default
        }
    }
}
