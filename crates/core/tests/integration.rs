//! Integration tests for accounts + charge policies + alert delivery

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use riverbank_core::{
    parse_amount, Account, AccountDraft, AccountError, AccountObserver, AccountType, BankConfig,
    ChargePolicy, MinimumBalancePolicy, ObserverError, RecordingObserver, TransactionKind,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn savings(balance: &str) -> Account {
    AccountDraft::new("6854", "1", date(2024, 10, 6), AccountType::Savings)
        .with_balance(balance)
        .with_minimum_balance("500.00")
        .build(&BankConfig::default())
        .unwrap()
}

/// Observer that fails every delivery
struct BrokenMailbox;

impl AccountObserver for BrokenMailbox {
    fn name(&self) -> &str {
        "broken-mailbox"
    }

    fn update(&self, _message: &str) -> Result<(), ObserverError> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
    }
}

#[test]
fn test_deposit_then_withdraw_keeps_running_sum() {
    let mut account = savings("1000.00");
    let deltas = [dec!(250.10), dec!(-99.99), dec!(0.01), dec!(-1000)];

    let mut expected = account.balance();
    for delta in deltas {
        if delta > Decimal::ZERO {
            account.deposit(delta).unwrap();
        } else {
            account.withdraw(-delta).unwrap();
        }
        expected += delta;
        assert_eq!(account.balance(), expected);
    }
    assert_eq!(account.balance(), dec!(150.12));
}

#[test]
fn test_rejected_transactions_leave_balance_unchanged() {
    let mut account = savings("100.00");

    assert!(account.deposit(dec!(0)).unwrap_err().is_invalid_amount());
    assert!(account.withdraw(dec!(-20)).unwrap_err().is_invalid_amount());
    assert!(account.withdraw(dec!(100.01)).unwrap_err().is_insufficient_funds());

    let err = parse_amount("twenty", TransactionKind::Deposit).unwrap_err();
    assert_eq!(err, AccountError::InvalidAmount("Deposit amount: twenty must be numeric.".into()));

    assert_eq!(account.balance(), dec!(100.00));
}

#[test]
fn test_low_balance_reaches_every_observer_once() {
    let mut account = savings("1200.00");
    let alice = Arc::new(RecordingObserver::new("alice"));
    let bob = Arc::new(RecordingObserver::new("bob"));

    account.attach(alice.clone());
    account.attach(bob.clone());
    account.attach(alice.clone());

    account.withdraw(dec!(1160)).unwrap();

    let expected = vec!["Low balance warning $40.00: on account 6854.".to_string()];
    assert_eq!(alice.messages(), expected);
    assert_eq!(bob.messages(), expected);
}

#[test]
fn test_large_deposit_notifies_once() {
    let mut account = savings("1000.00");
    let alice = Arc::new(RecordingObserver::new("alice"));
    account.attach(alice.clone());

    account.deposit(dec!(15000)).unwrap();

    assert_eq!(
        alice.messages(),
        vec!["Large transaction $15,000.00: on account 6854."]
    );
}

#[test]
fn test_large_withdrawal_to_low_balance_fires_both() {
    let mut account = savings("10040.00");
    let alice = Arc::new(RecordingObserver::new("alice"));
    account.attach(alice.clone());

    let alerts = account.withdraw(dec!(10000.01)).unwrap();

    assert_eq!(alerts.len(), 2);
    assert_eq!(
        alice.messages(),
        vec![
            "Low balance warning $39.99: on account 6854.",
            "Large transaction $10,000.01: on account 6854.",
        ]
    );
}

#[test]
fn test_broken_observer_is_isolated() {
    let mut account = savings("100.00");
    let broken: Arc<dyn AccountObserver> = Arc::new(BrokenMailbox);
    let alice = Arc::new(RecordingObserver::new("alice"));

    account.attach(broken);
    account.attach(alice.clone());

    // the failure never reaches the caller
    let alerts = account.withdraw(dec!(80)).unwrap();

    assert_eq!(alerts.len(), 1);
    assert_eq!(account.balance(), dec!(20));
    assert_eq!(alice.messages().len(), 1);
}

#[test]
fn test_apply_service_charge_through_update_balance() {
    let mut account = AccountDraft::new("9876", "1", date(2024, 10, 6), AccountType::Chequing)
        .with_balance("-400")
        .with_overdraft("-350", "0.05")
        .build(&BankConfig::default())
        .unwrap();
    let alice = Arc::new(RecordingObserver::new("alice"));
    account.attach(alice.clone());

    let charge = account.service_charges_on(date(2026, 10, 15));
    assert_eq!(charge, dec!(3.00));

    account.update_balance(-charge).unwrap();
    assert_eq!(account.balance(), dec!(-403.00));
    assert_eq!(
        alice.messages(),
        vec!["Low balance warning $-403.00: on account 9876."]
    );
}

#[test]
fn test_savings_charge_with_custom_base() {
    let policy = MinimumBalancePolicy::new(dec!(50.00), dec!(10.00), dec!(2.00));
    let today = date(2026, 10, 15);

    assert_eq!(policy.compute_charge(dec!(49.99), today), dec!(20.00));
    assert_eq!(policy.compute_charge(dec!(50.00), today), dec!(10.00));

    let mut config = BankConfig::default();
    config.base_service_charge = dec!(10.00);
    let account = AccountDraft::new("1", "1", date(2024, 1, 1), AccountType::Savings)
        .with_balance("49.99")
        .with_minimum_balance("50.00")
        .build(&config)
        .unwrap();
    assert_eq!(account.service_charges_on(today), dec!(20.00));
}

#[test]
fn test_investment_fee_waived_after_ten_years() {
    let config = BankConfig::default();
    let today = date(2026, 10, 15);

    let old = AccountDraft::new("59002635", "5550", date(2016, 10, 1), AccountType::Investment)
        .with_balance("1200.00")
        .with_management_fee("2.00")
        .build(&config)
        .unwrap();
    assert_eq!(old.service_charges_on(today), config.base_service_charge);
    assert!(old.render_on(today).contains("Management Fee: Waived"));

    let recent = AccountDraft::new("59002636", "5550", date(2026, 1, 1), AccountType::Investment)
        .with_balance("1200.00")
        .with_management_fee("2.00")
        .build(&config)
        .unwrap();
    assert_eq!(
        recent.service_charges_on(today),
        config.base_service_charge + dec!(2.00)
    );
    assert!(recent.render_on(today).contains("Management Fee: $2.00"));
}
