//! Read-only commands: clients, client, show

use anyhow::{anyhow, bail, Result};
use riverbank_core::{format_currency, Account};
use riverbank_directory::AccountDirectory;
use std::str::FromStr;

/// Print every client followed by their accounts.
pub fn list_clients(directory: &AccountDirectory) {
    let mut any = false;

    for client in directory.clients() {
        any = true;
        println!("{}", client);

        let accounts = directory.accounts_for_client(client.client_number());
        if accounts.is_empty() {
            println!("   (no accounts)");
        }
        for account in accounts {
            for line in account.to_string().lines() {
                println!("   {}", line);
            }
        }
        println!();
    }

    if !any {
        println!("No clients on file.");
    }
}

/// Column of the client account table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountColumn {
    Number,
    Balance,
    DateCreated,
    Type,
}

impl AccountColumn {
    fn cell(&self, account: &Account) -> String {
        match self {
            AccountColumn::Number => account.account_number().to_string(),
            AccountColumn::Balance => format_currency(account.balance()),
            AccountColumn::DateCreated => account.date_created().format("%Y-%m-%d").to_string(),
            AccountColumn::Type => account.account_type().as_str().to_string(),
        }
    }
}

/// `<column>=<text>`: keep rows whose column contains the text, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFilter {
    pub column: AccountColumn,
    pub needle: String,
}

impl AccountFilter {
    pub fn matches(&self, account: &Account) -> bool {
        self.column
            .cell(account)
            .to_lowercase()
            .contains(&self.needle)
    }
}

impl FromStr for AccountFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, needle) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <column>=<text>, got {:?}", s))?;

        let column = match column.trim().to_lowercase().as_str() {
            "account_number" | "number" => AccountColumn::Number,
            "balance" => AccountColumn::Balance,
            "date_created" | "date" => AccountColumn::DateCreated,
            "account_type" | "type" => AccountColumn::Type,
            other => {
                return Err(format!(
                    "unknown column {:?} (account_number, balance, date_created, account_type)",
                    other
                ))
            }
        };

        Ok(Self {
            column,
            needle: needle.trim().to_lowercase(),
        })
    }
}

/// Validate a typed client number.
pub fn parse_client_number(raw: &str) -> Result<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("Client Number field is empty. Please enter a Client Number.");
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        bail!("Please enter a valid numeric Client Number. Example: 12345");
    }
    raw.parse()
        .map_err(|_| anyhow!("Please enter a valid numeric Client Number. Example: 12345"))
}

/// Table rows (number, balance, date, type) for one client's accounts.
pub fn client_rows(
    directory: &AccountDirectory,
    client_number: u32,
    filter: Option<&AccountFilter>,
) -> Result<Vec<[String; 4]>> {
    if directory.client(client_number).is_err() {
        bail!("Client Number {} does not exist.", client_number);
    }

    let columns = [
        AccountColumn::Number,
        AccountColumn::Balance,
        AccountColumn::DateCreated,
        AccountColumn::Type,
    ];

    Ok(directory
        .accounts_for_client(client_number)
        .into_iter()
        .filter(|account| filter.map_or(true, |f| f.matches(account)))
        .map(|account| columns.map(|column| column.cell(account)))
        .collect())
}

/// Print one client's account table.
pub fn show_client(
    directory: &AccountDirectory,
    raw_client_number: &str,
    filter: Option<&AccountFilter>,
) -> Result<()> {
    let client_number = parse_client_number(raw_client_number)?;
    let rows = client_rows(directory, client_number, filter)?;
    let client = directory.client(client_number)?;

    println!("{}", client.full_name());
    println!(
        "{:<16} {:>16} {:<12} {}",
        "Account Number", "Balance", "Date Created", "Account Type"
    );
    for [number, balance, date, kind] in &rows {
        println!("{:<16} {:>16} {:<12} {}", number, balance, date, kind);
    }

    if filter.is_some() {
        println!("Data is Currently Filtered");
    }
    Ok(())
}

/// Print one account's summary.
pub fn show_account(directory: &AccountDirectory, account_number: u32) -> Result<()> {
    let account = directory.account(account_number)?;
    let client = directory.client(account.client_number())?;

    println!("Client:  {}", client);
    println!("{}", account);
    println!("Service Charge: {}", format_currency(account.service_charges()));
    Ok(())
}
