//! # Money Module
//!
//! Currency formatting and parsing of transaction amounts.
//!
//! Balances are `rust_decimal::Decimal` so cents never drift the way binary
//! floats do. Display always rounds half away from zero to 2 decimals.

use crate::error::{AccountError, AccountResult};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// Direction of a caller-initiated transaction, used for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }

    /// Label used when the amount is not a number.
    fn numeric_label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit amount",
            TransactionKind::Withdrawal => "Withdraw amount",
        }
    }

    /// Label used when the amount is not positive.
    fn positive_label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit amount",
            TransactionKind::Withdrawal => "Withdrawal amount",
        }
    }

    /// Error for an amount that failed to parse.
    pub fn not_numeric(&self, raw: &str) -> AccountError {
        AccountError::InvalidAmount(format!("{}: {} must be numeric.", self.numeric_label(), raw))
    }

    /// Error for an amount ≤ 0.
    pub fn not_positive(&self, amount: Decimal) -> AccountError {
        AccountError::InvalidAmount(format!(
            "{}: {} must be positive.",
            self.positive_label(),
            format_currency(amount)
        ))
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a transaction amount typed by a user or read from a record.
///
/// Only checks that the text is numeric; the sign is validated by
/// [`crate::Account::deposit`] / [`crate::Account::withdraw`].
pub fn parse_amount(raw: &str, kind: TransactionKind) -> AccountResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| kind.not_numeric(raw))
}

/// Round to cents, half away from zero.
pub(crate) fn round_cents(amount: Decimal) -> Decimal {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // drop the sign of -0.00
        Decimal::ZERO
    } else {
        rounded
    }
}

/// `$1,234.50` style: thousands separators, 2 decimals, sign after `$`.
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", group_thousands(&format_fixed(amount)))
}

/// Plain 2-decimal rendering without separators, e.g. `-100.00`.
pub fn format_fixed(amount: Decimal) -> String {
    format!("{:.2}", round_cents(amount))
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (whole, cents) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{}.{}", sign, grouped, cents)
}
