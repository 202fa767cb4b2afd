//! Balance-changing commands: deposit, withdraw, charge
//!
//! Each command subscribes the owning client's notifier, applies the change,
//! then writes the new balance back to `accounts.csv`.

use anyhow::{Context, Result};
use riverbank_core::{format_currency, parse_amount, BalanceAlert, TransactionKind};
use riverbank_directory::{AccountDirectory, EmailOutbox};
use std::path::Path;
use std::sync::Arc;

/// Deposit funds to an account
pub fn deposit(
    directory: &mut AccountDirectory,
    outbox_dir: &Path,
    account_number: u32,
    raw_amount: &str,
) -> Result<()> {
    let amount = parse_amount(raw_amount, TransactionKind::Deposit)?;
    prepare(directory, outbox_dir, account_number)?;

    let alerts = directory.account_mut(account_number)?.deposit(amount)?;
    finish(directory, account_number, &alerts)?;

    println!("✅ Deposit successful!");
    println!("   Amount:  {}", format_currency(amount));
    print_balance(directory, account_number)
}

/// Withdraw funds from an account
pub fn withdraw(
    directory: &mut AccountDirectory,
    outbox_dir: &Path,
    account_number: u32,
    raw_amount: &str,
) -> Result<()> {
    let amount = parse_amount(raw_amount, TransactionKind::Withdrawal)?;
    prepare(directory, outbox_dir, account_number)?;

    let alerts = directory.account_mut(account_number)?.withdraw(amount)?;
    finish(directory, account_number, &alerts)?;

    println!("✅ Withdrawal successful!");
    println!("   Amount:  {}", format_currency(amount));
    print_balance(directory, account_number)
}

/// Compute the service charge and debit it
pub fn charge(directory: &mut AccountDirectory, outbox_dir: &Path, account_number: u32) -> Result<()> {
    prepare(directory, outbox_dir, account_number)?;

    let account = directory.account_mut(account_number)?;
    let amount = account.service_charges();
    // charges may take the balance below zero, so skip withdrawal checks
    let alerts = account.update_balance(-amount)?;
    finish(directory, account_number, &alerts)?;

    println!("✅ Service charge applied!");
    println!("   Charge:  {}", format_currency(amount));
    print_balance(directory, account_number)
}

fn prepare(directory: &mut AccountDirectory, outbox_dir: &Path, account_number: u32) -> Result<()> {
    let outbox = EmailOutbox::new(outbox_dir)
        .with_context(|| format!("Failed to open outbox {:?}", outbox_dir))?;
    directory.attach_client_notifier(account_number, &Arc::new(outbox))?;
    Ok(())
}

fn finish(directory: &AccountDirectory, account_number: u32, alerts: &[BalanceAlert]) -> Result<()> {
    directory
        .persist_balance(account_number)
        .context("Failed to persist balance")?;

    for alert in alerts {
        println!("⚠️  {}", alert);
    }
    Ok(())
}

fn print_balance(directory: &AccountDirectory, account_number: u32) -> Result<()> {
    let account = directory.account(account_number)?;
    println!("   Balance: {}", format_currency(account.balance()));
    Ok(())
}
