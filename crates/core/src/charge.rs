//! Service charge policies
//!
//! Each account kind binds one policy at construction. The policy is a pure
//! function of the balance and the evaluation date; it never mutates the account.
//! Charges are rounded to cents and saturate instead of overflowing.

use crate::money::round_cents;
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use std::fmt;

/// Strategy computing the periodic service charge of an account.
pub trait ChargePolicy: fmt::Debug + Send + Sync {
    /// Policy name (for logging)
    fn name(&self) -> &str;

    /// Charge owed for `balance` when evaluated on `on`.
    fn compute_charge(&self, balance: Decimal, on: NaiveDate) -> Decimal;

    /// Whether a fee this policy normally adds is waived on `on`.
    ///
    /// Rendering asks this instead of repeating the rule, so the displayed fee
    /// and the computed charge always agree.
    fn waives_fee(&self, _on: NaiveDate) -> bool {
        false
    }
}

/// Chequing: base charge plus a surcharge proportional to the overdraft depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverdraftPolicy {
    overdraft_limit: Decimal,
    overdraft_rate: Decimal,
    base_charge: Decimal,
}

impl OverdraftPolicy {
    pub fn new(overdraft_limit: Decimal, overdraft_rate: Decimal, base_charge: Decimal) -> Self {
        Self {
            overdraft_limit,
            overdraft_rate,
            base_charge,
        }
    }
}

impl ChargePolicy for OverdraftPolicy {
    fn name(&self) -> &str {
        "overdraft"
    }

    fn compute_charge(&self, balance: Decimal, _on: NaiveDate) -> Decimal {
        if balance >= self.overdraft_limit {
            self.base_charge
        } else {
            // limit - balance > 0 here: how far past the limit the balance sits
            let depth = self.overdraft_limit.saturating_sub(balance);
            round_cents(self.base_charge.saturating_add(depth.saturating_mul(self.overdraft_rate)))
        }
    }
}

/// Savings: flat penalty (base × premium) whenever the balance is under the minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimumBalancePolicy {
    minimum_balance: Decimal,
    base_charge: Decimal,
    premium_multiplier: Decimal,
}

impl MinimumBalancePolicy {
    pub fn new(minimum_balance: Decimal, base_charge: Decimal, premium_multiplier: Decimal) -> Self {
        Self {
            minimum_balance,
            base_charge,
            premium_multiplier,
        }
    }
}

impl ChargePolicy for MinimumBalancePolicy {
    fn name(&self) -> &str {
        "minimum_balance"
    }

    fn compute_charge(&self, balance: Decimal, _on: NaiveDate) -> Decimal {
        if balance >= self.minimum_balance {
            self.base_charge
        } else {
            round_cents(self.base_charge.saturating_mul(self.premium_multiplier))
        }
    }
}

/// Investment: base charge plus the annual fee, fee waived once the account is old enough.
///
/// The age is measured against the evaluation date of every call, never a date
/// captured at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementFeePolicy {
    annual_fee: Decimal,
    created_on: NaiveDate,
    base_charge: Decimal,
    waiver_years: u32,
}

impl ManagementFeePolicy {
    pub fn new(
        annual_fee: Decimal,
        created_on: NaiveDate,
        base_charge: Decimal,
        waiver_years: u32,
    ) -> Self {
        Self {
            annual_fee,
            created_on,
            base_charge,
            waiver_years,
        }
    }

    /// True when the account is at least `waiver_years` old on `on`.
    pub fn is_waived(&self, on: NaiveDate) -> bool {
        on.checked_sub_months(Months::new(self.waiver_years.saturating_mul(12)))
            .map_or(false, |cutoff| self.created_on <= cutoff)
    }
}

impl ChargePolicy for ManagementFeePolicy {
    fn name(&self) -> &str {
        "management_fee"
    }

    fn compute_charge(&self, _balance: Decimal, on: NaiveDate) -> Decimal {
        if self.is_waived(on) {
            self.base_charge
        } else {
            round_cents(self.base_charge.saturating_add(self.annual_fee))
        }
    }

    fn waives_fee(&self, on: NaiveDate) -> bool {
        self.is_waived(on)
    }
}
