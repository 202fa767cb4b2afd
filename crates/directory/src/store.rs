//! # Account Directory
//!
//! Clients and accounts loaded from `clients.csv` / `accounts.csv`.
//!
//! Loading is lenient: a bad row is logged and skipped, and so is an account
//! whose client is not on file. Balances are written back one row at a time
//! with [`AccountDirectory::persist_balance`].

use crate::client::Client;
use crate::error::{DirectoryError, DirectoryResult};
use crate::notifier::ClientNotifier;
use crate::outbox::EmailOutbox;
use crate::records::{AccountRecord, ClientRecord};
use riverbank_core::{format_fixed, Account, AccountObserver, BankConfig};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const CLIENTS_FILE: &str = "clients.csv";
pub const ACCOUNTS_FILE: &str = "accounts.csv";

/// In-memory view of the client and account files.
pub struct AccountDirectory {
    clients_path: PathBuf,
    accounts_path: PathBuf,
    config: BankConfig,
    clients: BTreeMap<u32, Client>,
    accounts: BTreeMap<u32, Account>,
    /// One notifier per client and outbox file, so repeated attaches hit the same observer
    notifiers: BTreeMap<(u32, PathBuf), Arc<dyn AccountObserver>>,
}

impl AccountDirectory {
    /// Load `clients.csv` and `accounts.csv` from `data_dir`.
    pub fn load<P: AsRef<Path>>(data_dir: P, config: BankConfig) -> DirectoryResult<Self> {
        let data_dir = data_dir.as_ref();
        Self::load_from(
            data_dir.join(CLIENTS_FILE),
            data_dir.join(ACCOUNTS_FILE),
            config,
        )
    }

    /// Load from explicit file paths. A missing file yields an empty map.
    pub fn load_from<P: AsRef<Path>, Q: AsRef<Path>>(
        clients_path: P,
        accounts_path: Q,
        config: BankConfig,
    ) -> DirectoryResult<Self> {
        let mut directory = Self {
            clients_path: clients_path.as_ref().to_path_buf(),
            accounts_path: accounts_path.as_ref().to_path_buf(),
            config,
            clients: BTreeMap::new(),
            accounts: BTreeMap::new(),
            notifiers: BTreeMap::new(),
        };

        directory.load_clients()?;
        directory.load_accounts()?;

        tracing::info!(
            clients = directory.clients.len(),
            accounts = directory.accounts.len(),
            "Directory loaded"
        );
        Ok(directory)
    }

    fn load_clients(&mut self) -> DirectoryResult<()> {
        let Some(mut reader) = open_reader(&self.clients_path)? else {
            return Ok(());
        };

        for (line, row) in reader.deserialize::<ClientRecord>().enumerate() {
            let client = row
                .map_err(DirectoryError::from)
                .and_then(|record| record.to_client());

            match client {
                Ok(client) => {
                    self.clients.insert(client.client_number(), client);
                }
                Err(e) => {
                    tracing::error!(file = %self.clients_path.display(), row = line + 1, error = %e, "Skipping client row");
                }
            }
        }
        Ok(())
    }

    fn load_accounts(&mut self) -> DirectoryResult<()> {
        let Some(mut reader) = open_reader(&self.accounts_path)? else {
            return Ok(());
        };

        for (line, row) in reader.deserialize::<AccountRecord>().enumerate() {
            let account = row
                .map_err(DirectoryError::from)
                .and_then(|record| record.to_draft())
                .and_then(|draft| draft.build(&self.config).map_err(DirectoryError::from));

            let account = match account {
                Ok(account) => account,
                Err(e) => {
                    tracing::error!(file = %self.accounts_path.display(), row = line + 1, error = %e, "Skipping account row");
                    continue;
                }
            };

            if !self.clients.contains_key(&account.client_number()) {
                tracing::error!(
                    "Bank Account: {} contains invalid Client Number: {}",
                    account.account_number(),
                    account.client_number()
                );
                continue;
            }

            self.accounts.insert(account.account_number(), account);
        }
        Ok(())
    }

    // === Lookups ===

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn client(&self, client_number: u32) -> DirectoryResult<&Client> {
        self.clients
            .get(&client_number)
            .ok_or(DirectoryError::UnknownClient(client_number))
    }

    pub fn account(&self, account_number: u32) -> DirectoryResult<&Account> {
        self.accounts
            .get(&account_number)
            .ok_or(DirectoryError::UnknownAccount(account_number))
    }

    pub fn account_mut(&mut self, account_number: u32) -> DirectoryResult<&mut Account> {
        self.accounts
            .get_mut(&account_number)
            .ok_or(DirectoryError::UnknownAccount(account_number))
    }

    /// Accounts owned by a client, in account-number order.
    pub fn accounts_for_client(&self, client_number: u32) -> Vec<&Account> {
        self.accounts
            .values()
            .filter(|account| account.client_number() == client_number)
            .collect()
    }

    // === Notification ===

    /// Subscribe the owning client to an account's alerts.
    ///
    /// Notifiers are shared per client and outbox file: attaching again with
    /// the same outbox is a no-op, a different outbox adds a second notifier.
    pub fn attach_client_notifier(
        &mut self,
        account_number: u32,
        outbox: &Arc<EmailOutbox>,
    ) -> DirectoryResult<()> {
        let client_number = self.account(account_number)?.client_number();
        let client = self.client(client_number)?.clone();

        let notifier = self
            .notifiers
            .entry((client_number, outbox.path().to_path_buf()))
            .or_insert_with(|| {
                let notifier: Arc<dyn AccountObserver> =
                    Arc::new(ClientNotifier::new(client, outbox.clone()));
                notifier
            })
            .clone();

        self.account_mut(account_number)?.attach(notifier);
        tracing::debug!(account = account_number, client = client_number, "Client notifier attached");
        Ok(())
    }

    // === Persistence ===

    /// Rewrite the balance column of one account's row in `accounts.csv`.
    ///
    /// Every other row is copied through untouched. The file is replaced via a
    /// temporary sibling and a rename.
    pub fn persist_balance(&self, account_number: u32) -> DirectoryResult<()> {
        let account = self.account(account_number)?;
        let file = self.accounts_path.display().to_string();

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.accounts_path)?;
        let headers = reader.headers()?.clone();
        let number_idx = column_index(&headers, "account_number")
            .ok_or_else(|| DirectoryError::missing_column(&file, "account_number"))?;
        let balance_idx = column_index(&headers, "balance")
            .ok_or_else(|| DirectoryError::missing_column(&file, "balance"))?;

        let tmp_path = self.accounts_path.with_extension("csv.tmp");
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&tmp_path)?;
        writer.write_record(&headers)?;

        let balance = balance_field(account.balance());
        let mut updated = 0;
        for row in reader.records() {
            let row = row?;
            let matches = row
                .get(number_idx)
                .and_then(|raw| raw.trim().parse::<u32>().ok())
                == Some(account_number);

            if matches {
                let rewritten: csv::StringRecord = row
                    .iter()
                    .enumerate()
                    .map(|(i, field)| if i == balance_idx { balance.as_str() } else { field })
                    .collect();
                writer.write_record(&rewritten)?;
                updated += 1;
            } else {
                writer.write_record(&row)?;
            }
        }
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp_path, &self.accounts_path)?;

        if updated == 0 {
            tracing::warn!(account = account_number, file = %file, "No row to persist balance into");
        } else {
            tracing::info!(account = account_number, balance = %balance, "Balance persisted");
        }
        Ok(())
    }
}

/// Open a CSV file, or `None` when it does not exist.
fn open_reader(path: &Path) -> DirectoryResult<Option<csv::Reader<fs::File>>> {
    if !path.exists() {
        tracing::error!(file = %path.display(), "File not found");
        return Ok(None);
    }

    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    Ok(Some(reader))
}

/// Cents when they are exact, full precision otherwise, so a reload reads back
/// the same balance.
fn balance_field(balance: Decimal) -> String {
    if balance.round_dp(2) == balance {
        format_fixed(balance)
    } else {
        balance.normalize().to_string()
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}
