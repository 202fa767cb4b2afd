//! Bank configuration with tunable thresholds
//!
//! Every field has a serde default, so a config file only needs to list the
//! values it overrides. `BankConfig::default()` is the stock Riverbank setup.

use crate::error::ConfigError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for account alerts and service charges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConfig {
    // === Alerts ===
    /// Balance strictly below this triggers a low-balance alert
    #[serde(default = "default_low_balance_floor")]
    pub low_balance_floor: Decimal,

    /// A single balance change strictly above this triggers a large-transaction alert
    #[serde(default = "default_large_transaction_floor")]
    pub large_transaction_floor: Decimal,

    // === Service charges ===
    /// Flat charge every account kind starts from
    #[serde(default = "default_base_service_charge")]
    pub base_service_charge: Decimal,

    /// Savings accounts below their minimum pay `base × multiplier`
    #[serde(default = "default_savings_premium_multiplier")]
    pub savings_premium_multiplier: Decimal,

    /// Investment accounts at least this old pay no management fee
    #[serde(default = "default_management_fee_waiver_years")]
    pub management_fee_waiver_years: u32,

    // === Construction fallbacks ===
    #[serde(default)]
    pub defaults: ParameterDefaults,
}

/// Values substituted for malformed construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefaults {
    #[serde(default = "default_balance")]
    pub balance: Decimal,
    #[serde(default = "default_overdraft_limit")]
    pub overdraft_limit: Decimal,
    #[serde(default = "default_overdraft_rate")]
    pub overdraft_rate: Decimal,
    #[serde(default = "default_minimum_balance")]
    pub minimum_balance: Decimal,
    #[serde(default = "default_management_fee")]
    pub management_fee: Decimal,
}

/// Alert floors copied into every account at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertThresholds {
    pub low_balance_floor: Decimal,
    pub large_transaction_floor: Decimal,
}

// Default value functions for serde
fn default_low_balance_floor() -> Decimal {
    Decimal::new(5000, 2) // 50.00
}

fn default_large_transaction_floor() -> Decimal {
    Decimal::new(1_000_000, 2) // 10,000.00
}

fn default_base_service_charge() -> Decimal {
    Decimal::new(50, 2) // 0.50
}

fn default_savings_premium_multiplier() -> Decimal {
    Decimal::new(200, 2) // 2.00
}

fn default_management_fee_waiver_years() -> u32 {
    10
}

fn default_balance() -> Decimal {
    Decimal::ZERO
}

fn default_overdraft_limit() -> Decimal {
    Decimal::new(-10000, 2) // -100.00
}

fn default_overdraft_rate() -> Decimal {
    Decimal::new(5, 2) // 0.05
}

fn default_minimum_balance() -> Decimal {
    Decimal::new(5000, 2) // 50.00
}

fn default_management_fee() -> Decimal {
    Decimal::new(255, 2) // 2.55
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            low_balance_floor: default_low_balance_floor(),
            large_transaction_floor: default_large_transaction_floor(),
            base_service_charge: default_base_service_charge(),
            savings_premium_multiplier: default_savings_premium_multiplier(),
            management_fee_waiver_years: default_management_fee_waiver_years(),
            defaults: ParameterDefaults::default(),
        }
    }
}

impl Default for ParameterDefaults {
    fn default() -> Self {
        Self {
            balance: default_balance(),
            overdraft_limit: default_overdraft_limit(),
            overdraft_rate: default_overdraft_rate(),
            minimum_balance: default_minimum_balance(),
            management_fee: default_management_fee(),
        }
    }
}

impl BankConfig {
    /// Load from a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: BankConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make charges or alerts meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_service_charge < Decimal::ZERO {
            return Err(ConfigError::Invalid(format!(
                "base_service_charge must not be negative: {}",
                self.base_service_charge
            )));
        }
        if self.savings_premium_multiplier < Decimal::ZERO {
            return Err(ConfigError::Invalid(format!(
                "savings_premium_multiplier must not be negative: {}",
                self.savings_premium_multiplier
            )));
        }
        if self.large_transaction_floor <= Decimal::ZERO {
            return Err(ConfigError::Invalid(format!(
                "large_transaction_floor must be positive: {}",
                self.large_transaction_floor
            )));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            low_balance_floor: self.low_balance_floor,
            large_transaction_floor: self.large_transaction_floor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BankConfig::default();
        assert_eq!(config.low_balance_floor, dec!(50.00));
        assert_eq!(config.large_transaction_floor, dec!(10000.00));
        assert_eq!(config.base_service_charge, dec!(0.50));
        assert_eq!(config.savings_premium_multiplier, dec!(2.00));
        assert_eq!(config.management_fee_waiver_years, 10);
    }

    #[test]
    fn test_parameter_defaults() {
        let defaults = ParameterDefaults::default();
        assert_eq!(defaults.balance, dec!(0.00));
        assert_eq!(defaults.overdraft_limit, dec!(-100.00));
        assert_eq!(defaults.overdraft_rate, dec!(0.05));
        assert_eq!(defaults.minimum_balance, dec!(50.00));
        assert_eq!(defaults.management_fee, dec!(2.55));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "low_balance_floor": "25.00", "defaults": { "management_fee": "3.10" } }"#;
        let config: BankConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.low_balance_floor, dec!(25.00));
        assert_eq!(config.large_transaction_floor, dec!(10000.00));
        assert_eq!(config.defaults.management_fee, dec!(3.10));
        assert_eq!(config.defaults.overdraft_limit, dec!(-100.00));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "base_service_charge": "1.25" }}"#).unwrap();

        let config = BankConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.base_service_charge, dec!(1.25));
        assert_eq!(config.thresholds().low_balance_floor, dec!(50.00));
    }

    #[test]
    fn test_from_json_file_rejects_negative_charge() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "base_service_charge": "-1" }}"#).unwrap();

        let err = BankConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = BankConfig::from_json_file("/nonexistent/riverbank.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
