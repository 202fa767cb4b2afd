//! CSV row shapes
//!
//! Rows are read as text so a single malformed value only affects the field it
//! sits in; conversion rules live in [`riverbank_core::AccountDraft`].

use crate::client::Client;
use crate::error::{DirectoryError, DirectoryResult};
use chrono::NaiveDate;
use riverbank_core::{parse::parse_identity, AccountDraft, AccountType, IdentityField};
use serde::{Deserialize, Serialize};

/// Placeholder for a parameter that does not apply to the account kind
pub const NULL_FIELD: &str = "Null";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row of `clients.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl ClientRecord {
    pub fn to_client(&self) -> DirectoryResult<Client> {
        let client_number = parse_identity(IdentityField::ClientNumber, &self.client_number)?;
        Client::new(
            client_number,
            &self.first_name,
            &self.last_name,
            &self.email_address,
        )
    }
}

/// Row of `accounts.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_number: String,
    pub client_number: String,
    pub balance: String,
    pub date_created: String,
    pub account_type: String,
    #[serde(default)]
    pub overdraft_limit: Option<String>,
    #[serde(default)]
    pub overdraft_rate: Option<String>,
    #[serde(default)]
    pub minimum_balance: Option<String>,
    #[serde(default)]
    pub management_fee: Option<String>,
}

impl AccountRecord {
    /// Convert to a draft; fails on an unparsable date or unknown account type.
    pub fn to_draft(&self) -> DirectoryResult<AccountDraft> {
        let date_created = NaiveDate::parse_from_str(self.date_created.trim(), DATE_FORMAT)
            .map_err(|_| DirectoryError::InvalidDate(self.date_created.clone()))?;

        let account_type: AccountType = self
            .account_type
            .parse()
            .map_err(|_| DirectoryError::UnknownAccountType(self.account_type.clone()))?;

        Ok(AccountDraft {
            account_number: self.account_number.clone(),
            client_number: self.client_number.clone(),
            balance: Some(self.balance.clone()),
            date_created,
            account_type,
            overdraft_limit: self.overdraft_limit.clone(),
            overdraft_rate: self.overdraft_rate.clone(),
            minimum_balance: self.minimum_balance.clone(),
            management_fee: self.management_fee.clone(),
        })
    }
}
