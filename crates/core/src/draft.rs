//! Account construction from untyped fields
//!
//! Records and user input arrive as text. `AccountDraft` holds that text and
//! turns it into an [`Account`]: identity fields must be integers, everything
//! else falls back to [`ParameterDefaults`](crate::ParameterDefaults) when absent,
//! malformed or out of range.

use crate::account::{
    Account, AccountKind, AccountType, ChequingTerms, InvestmentTerms, SavingsTerms,
};
use crate::config::BankConfig;
use crate::error::{AccountResult, IdentityField};
use crate::parse::{decimal_or_default, parse_identity, Bound};
use chrono::NaiveDate;

/// Raw account fields, as read from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDraft {
    pub account_number: String,
    pub client_number: String,
    pub balance: Option<String>,
    pub date_created: NaiveDate,
    pub account_type: AccountType,
    pub overdraft_limit: Option<String>,
    pub overdraft_rate: Option<String>,
    pub minimum_balance: Option<String>,
    pub management_fee: Option<String>,
}

impl AccountDraft {
    /// Draft with only the required fields; kind parameters take their defaults.
    pub fn new(
        account_number: &str,
        client_number: &str,
        date_created: NaiveDate,
        account_type: AccountType,
    ) -> Self {
        Self {
            account_number: account_number.to_string(),
            client_number: client_number.to_string(),
            balance: None,
            date_created,
            account_type,
            overdraft_limit: None,
            overdraft_rate: None,
            minimum_balance: None,
            management_fee: None,
        }
    }

    pub fn with_balance(mut self, balance: &str) -> Self {
        self.balance = Some(balance.to_string());
        self
    }

    pub fn with_overdraft(mut self, limit: &str, rate: &str) -> Self {
        self.overdraft_limit = Some(limit.to_string());
        self.overdraft_rate = Some(rate.to_string());
        self
    }

    pub fn with_minimum_balance(mut self, minimum_balance: &str) -> Self {
        self.minimum_balance = Some(minimum_balance.to_string());
        self
    }

    pub fn with_management_fee(mut self, management_fee: &str) -> Self {
        self.management_fee = Some(management_fee.to_string());
        self
    }

    /// Validate identity, default the rest, and open the account.
    pub fn build(&self, config: &BankConfig) -> AccountResult<Account> {
        let account_number = parse_identity(IdentityField::AccountNumber, &self.account_number)?;
        let client_number = parse_identity(IdentityField::ClientNumber, &self.client_number)?;

        let defaults = &config.defaults;
        let balance = decimal_or_default(
            "balance",
            self.balance.as_deref(),
            defaults.balance,
            Bound::Any,
        );

        let kind = match self.account_type {
            AccountType::Chequing => AccountKind::Chequing(ChequingTerms {
                overdraft_limit: decimal_or_default(
                    "overdraft_limit",
                    self.overdraft_limit.as_deref(),
                    defaults.overdraft_limit,
                    Bound::NonPositive,
                ),
                overdraft_rate: decimal_or_default(
                    "overdraft_rate",
                    self.overdraft_rate.as_deref(),
                    defaults.overdraft_rate,
                    Bound::NonNegative,
                ),
            }),
            AccountType::Savings => AccountKind::Savings(SavingsTerms {
                minimum_balance: decimal_or_default(
                    "minimum_balance",
                    self.minimum_balance.as_deref(),
                    defaults.minimum_balance,
                    Bound::NonNegative,
                ),
            }),
            AccountType::Investment => AccountKind::Investment(InvestmentTerms {
                management_fee: decimal_or_default(
                    "management_fee",
                    self.management_fee.as_deref(),
                    defaults.management_fee,
                    Bound::NonNegative,
                ),
            }),
        };

        Ok(Account::open(
            account_number,
            client_number,
            balance,
            self.date_created,
            kind,
            config,
        ))
    }
}
