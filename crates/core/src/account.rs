//! # Account Module
//!
//! One concrete `Account` type. What differs between chequing, savings and
//! investment accounts lives in [`AccountKind`] (terms used for display) and in
//! the [`ChargePolicy`] bound at construction.

use crate::charge::{ChargePolicy, ManagementFeePolicy, MinimumBalancePolicy, OverdraftPolicy};
use crate::config::{AlertThresholds, BankConfig};
use crate::error::{AccountError, AccountResult, UnknownAccountType};
use crate::money::{format_currency, format_fixed, TransactionKind};
use crate::observer::{AccountObserver, BalanceAlert, Delivery, ObserverList};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Account kind discriminant, as stored in records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    #[serde(rename = "ChequingAccount")]
    Chequing,
    #[serde(rename = "SavingsAccount")]
    Savings,
    #[serde(rename = "InvestmentAccount")]
    Investment,
}

impl AccountType {
    /// Record name (`ChequingAccount`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Chequing => "ChequingAccount",
            AccountType::Savings => "SavingsAccount",
            AccountType::Investment => "InvestmentAccount",
        }
    }

    /// Human label used in the rendered summary
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Chequing => "Chequing",
            AccountType::Savings => "Savings",
            AccountType::Investment => "Investment",
        }
    }
}

impl FromStr for AccountType {
    type Err = UnknownAccountType;

    /// Parse a record name; the short form (`chequing`) is accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chequingaccount" | "chequing" => Ok(AccountType::Chequing),
            "savingsaccount" | "savings" => Ok(AccountType::Savings),
            "investmentaccount" | "investment" => Ok(AccountType::Investment),
            _ => Err(UnknownAccountType(s.to_string())),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequingTerms {
    /// Negative-or-zero threshold below which the overdraft surcharge applies
    pub overdraft_limit: Decimal,
    /// Fraction of the overdraft depth charged on top of the base charge
    pub overdraft_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsTerms {
    pub minimum_balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentTerms {
    pub management_fee: Decimal,
}

/// Kind-specific terms of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    Chequing(ChequingTerms),
    Savings(SavingsTerms),
    Investment(InvestmentTerms),
}

impl AccountKind {
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Chequing(_) => AccountType::Chequing,
            AccountKind::Savings(_) => AccountType::Savings,
            AccountKind::Investment(_) => AccountType::Investment,
        }
    }

    /// Build the charge policy matching these terms.
    fn charge_policy(&self, date_created: NaiveDate, config: &BankConfig) -> Box<dyn ChargePolicy> {
        match *self {
            AccountKind::Chequing(terms) => Box::new(OverdraftPolicy::new(
                terms.overdraft_limit,
                terms.overdraft_rate,
                config.base_service_charge,
            )),
            AccountKind::Savings(terms) => Box::new(MinimumBalancePolicy::new(
                terms.minimum_balance,
                config.base_service_charge,
                config.savings_premium_multiplier,
            )),
            AccountKind::Investment(terms) => Box::new(ManagementFeePolicy::new(
                terms.management_fee,
                date_created,
                config.base_service_charge,
                config.management_fee_waiver_years,
            )),
        }
    }
}

/// A client's bank account.
///
/// Mutation requires `&mut self`; the account does no internal locking, so
/// callers sharing one across threads must serialize access themselves.
#[derive(Debug)]
pub struct Account {
    account_number: u32,
    client_number: u32,
    balance: Decimal,
    date_created: NaiveDate,
    kind: AccountKind,
    charge_policy: Box<dyn ChargePolicy>,
    thresholds: AlertThresholds,
    observers: ObserverList,
}

impl Account {
    /// Open an account with already-validated parameters.
    pub fn open(
        account_number: u32,
        client_number: u32,
        balance: Decimal,
        date_created: NaiveDate,
        kind: AccountKind,
        config: &BankConfig,
    ) -> Self {
        Self {
            account_number,
            client_number,
            balance,
            date_created,
            kind,
            charge_policy: kind.charge_policy(date_created, config),
            thresholds: config.thresholds(),
            observers: ObserverList::new(),
        }
    }

    pub fn account_number(&self) -> u32 {
        self.account_number
    }

    pub fn client_number(&self) -> u32 {
        self.client_number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn date_created(&self) -> NaiveDate {
        self.date_created
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn charge_policy(&self) -> &dyn ChargePolicy {
        self.charge_policy.as_ref()
    }

    // === Balance mutation ===

    /// Deposit a positive amount.
    pub fn deposit(&mut self, amount: Decimal) -> AccountResult<Vec<BalanceAlert>> {
        if amount <= Decimal::ZERO {
            return Err(TransactionKind::Deposit.not_positive(amount));
        }

        self.update_balance(amount)
    }

    /// Withdraw a positive amount not exceeding the balance.
    pub fn withdraw(&mut self, amount: Decimal) -> AccountResult<Vec<BalanceAlert>> {
        if amount <= Decimal::ZERO {
            return Err(TransactionKind::Withdrawal.not_positive(amount));
        }

        if amount > self.balance {
            return Err(AccountError::insufficient_funds(amount, self.balance));
        }

        self.update_balance(-amount)
    }

    /// Apply a signed delta, then raise alerts.
    ///
    /// Used by `deposit`/`withdraw` and directly by callers applying a service
    /// charge. Only overflow is rejected, leaving the balance untouched. Each
    /// alert is broadcast once; both can fire from one call.
    pub fn update_balance(&mut self, delta: Decimal) -> AccountResult<Vec<BalanceAlert>> {
        self.balance = self
            .balance
            .checked_add(delta)
            .ok_or_else(|| AccountError::balance_overflow(delta))?;
        tracing::info!(
            account = self.account_number,
            %delta,
            balance = %self.balance,
            "Balance updated"
        );

        let mut alerts = Vec::new();

        if self.balance < self.thresholds.low_balance_floor {
            alerts.push(BalanceAlert::LowBalance {
                account_number: self.account_number,
                balance: self.balance,
            });
        }

        if delta.abs() > self.thresholds.large_transaction_floor {
            alerts.push(BalanceAlert::LargeTransaction {
                account_number: self.account_number,
                amount: delta.abs(),
            });
        }

        for alert in &alerts {
            let delivery = self.notify(&alert.to_string());
            tracing::debug!(
                account = self.account_number,
                alert = alert.as_str(),
                delivered = delivery.delivered,
                failed = delivery.failed,
                "Alert broadcast"
            );
        }

        Ok(alerts)
    }

    // === Observers ===

    /// Subscribe an observer. Attaching twice is a no-op.
    pub fn attach(&mut self, observer: Arc<dyn AccountObserver>) {
        self.observers.attach(observer);
    }

    /// Unsubscribe an observer. Detaching a stranger is a no-op.
    pub fn detach(&mut self, observer: &Arc<dyn AccountObserver>) {
        self.observers.detach(observer);
    }

    pub fn observers(&self) -> &ObserverList {
        &self.observers
    }

    /// Broadcast a message to every attached observer.
    pub fn notify(&self, message: &str) -> Delivery {
        self.observers.notify(message)
    }

    // === Service charges ===

    /// Service charge as of today.
    pub fn service_charges(&self) -> Decimal {
        self.service_charges_on(today())
    }

    /// Service charge as of `on`.
    pub fn service_charges_on(&self, on: NaiveDate) -> Decimal {
        self.charge_policy.compute_charge(self.balance, on)
    }

    // === Rendering ===

    /// Multi-line summary as of `on` (the investment fee line depends on the date).
    pub fn render_on(&self, on: NaiveDate) -> String {
        let base = format!(
            "Account Number: {} Balance: {}\n",
            self.account_number,
            format_currency(self.balance)
        );

        let detail = match &self.kind {
            AccountKind::Chequing(terms) => format!(
                "Overdraft Limit: ${} Overdraft Rate: {}% Account Type: {}",
                format_fixed(terms.overdraft_limit),
                format_fixed(terms.overdraft_rate.saturating_mul(Decimal::ONE_HUNDRED)),
                AccountType::Chequing.label()
            ),
            AccountKind::Savings(terms) => format!(
                "Minimum Balance: ${} Account Type: {}",
                format_fixed(terms.minimum_balance),
                AccountType::Savings.label()
            ),
            AccountKind::Investment(terms) => {
                let fee = if self.charge_policy.waives_fee(on) {
                    "Waived".to_string()
                } else {
                    format!("${}", format_fixed(terms.management_fee))
                };
                format!(
                    "Date Created: {} Management Fee: {} Account Type: {}",
                    self.date_created.format("%Y-%m-%d"),
                    fee,
                    AccountType::Investment.label()
                )
            }
        };

        base + &detail
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_on(today()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn chequing(balance: Decimal) -> Account {
        Account::open(
            9876,
            1,
            balance,
            date(2024, 10, 6),
            AccountKind::Chequing(ChequingTerms {
                overdraft_limit: dec!(-100),
                overdraft_rate: dec!(0.05),
            }),
            &BankConfig::default(),
        )
    }

    #[test]
    fn test_account_type_str() {
        assert_eq!(AccountType::Chequing.as_str(), "ChequingAccount");
        assert_eq!("SavingsAccount".parse::<AccountType>(), Ok(AccountType::Savings));
        assert_eq!(" investment ".parse::<AccountType>(), Ok(AccountType::Investment));

        let err = "BrokerageAccount".parse::<AccountType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown account type: BrokerageAccount");
    }

    #[test]
    fn test_open_account() {
        let account = chequing(dec!(200));

        assert_eq!(account.account_number(), 9876);
        assert_eq!(account.client_number(), 1);
        assert_eq!(account.balance(), dec!(200));
        assert_eq!(account.date_created(), date(2024, 10, 6));
        assert_eq!(account.account_type(), AccountType::Chequing);
        assert_eq!(account.charge_policy().name(), "overdraft");
        assert!(account.observers().is_empty());
    }

    #[test]
    fn test_deposit() {
        let mut account = chequing(dec!(200));
        account.deposit(dec!(100.25)).unwrap();
        assert_eq!(account.balance(), dec!(300.25));
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut account = chequing(dec!(200));

        let err = account.deposit(dec!(0)).unwrap_err();
        assert_eq!(err.to_string(), "Deposit amount: $0.00 must be positive.");

        let err = account.deposit(dec!(-5)).unwrap_err();
        assert!(err.is_invalid_amount());
        assert_eq!(account.balance(), dec!(200));
    }

    #[test]
    fn test_withdraw() {
        let mut account = chequing(dec!(200));
        account.withdraw(dec!(200)).unwrap();
        assert_eq!(account.balance(), dec!(0));
    }

    #[test]
    fn test_withdraw_insufficient_funds() {
        let mut account = chequing(dec!(500));

        let err = account.withdraw(dec!(600)).unwrap_err();
        assert_eq!(
            err,
            AccountError::InsufficientFunds {
                requested: dec!(600),
                available: dec!(500),
            }
        );
        assert_eq!(account.balance(), dec!(500));
    }

    #[test]
    fn test_withdraw_rejects_non_positive() {
        let mut account = chequing(dec!(500));

        let err = account.withdraw(dec!(-1)).unwrap_err();
        assert_eq!(err.to_string(), "Withdrawal amount: $-1.00 must be positive.");
        assert_eq!(account.balance(), dec!(500));
    }

    #[test]
    fn test_update_balance_is_unconditional() {
        let mut account = chequing(dec!(10));
        account.update_balance(dec!(-400)).unwrap();
        assert_eq!(account.balance(), dec!(-390));
    }

    #[test]
    fn test_overflow_rejected_without_change() {
        let mut account = chequing(dec!(1));
        let observer = Arc::new(RecordingObserver::new("alice"));
        account.attach(observer.clone());

        let err = account.deposit(Decimal::MAX).unwrap_err();
        assert!(err.is_invalid_amount());
        assert_eq!(account.balance(), dec!(1));

        let mut account = chequing(Decimal::MIN);
        assert!(account.update_balance(dec!(-1)).unwrap_err().is_invalid_amount());
        assert_eq!(account.balance(), Decimal::MIN);

        assert!(observer.messages().is_empty());
    }

    #[test]
    fn test_render_huge_rate_saturates() {
        let account = Account::open(
            1,
            1,
            dec!(0),
            date(2024, 10, 6),
            AccountKind::Chequing(ChequingTerms {
                overdraft_limit: dec!(-100),
                overdraft_rate: Decimal::MAX,
            }),
            &BankConfig::default(),
        );
        assert!(account.render_on(date(2026, 10, 15)).contains("Overdraft Rate: "));
    }

    #[test]
    fn test_update_balance_alerts() {
        let mut account = chequing(dec!(100));

        assert!(account.update_balance(dec!(10)).unwrap().is_empty());

        let alerts = account.update_balance(dec!(-70)).unwrap();
        assert_eq!(
            alerts,
            vec![BalanceAlert::LowBalance {
                account_number: 9876,
                balance: dec!(40),
            }]
        );

        let alerts = account.update_balance(dec!(-10000.01)).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].as_str(), "low_balance");
        assert_eq!(
            alerts[1],
            BalanceAlert::LargeTransaction {
                account_number: 9876,
                amount: dec!(10000.01),
            }
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let mut account = chequing(dec!(0));

        // exactly 10,000.00 is not large; landing on exactly 50.00 is not low
        let alerts = account.update_balance(dec!(10000)).unwrap();
        assert!(alerts.is_empty());

        let alerts = account.update_balance(dec!(-9950)).unwrap();
        assert!(alerts.is_empty());
        assert_eq!(account.balance(), dec!(50));
    }

    #[test]
    fn test_attach_detach_on_account() {
        let mut account = chequing(dec!(100));
        let observer = Arc::new(RecordingObserver::new("alice"));
        let handle: Arc<dyn AccountObserver> = observer.clone();

        account.attach(handle.clone());
        account.attach(handle.clone());
        assert_eq!(account.observers().len(), 1);

        account.withdraw(dec!(60)).unwrap();
        assert_eq!(
            observer.messages(),
            vec!["Low balance warning $40.00: on account 9876."]
        );

        account.detach(&handle);
        account.detach(&handle);
        account.withdraw(dec!(1)).unwrap();
        assert_eq!(observer.messages().len(), 1);
    }

    #[test]
    fn test_service_charges_follow_balance() {
        let mut account = chequing(dec!(0));
        let today = date(2026, 10, 15);

        assert_eq!(account.service_charges_on(today), dec!(0.50));

        account.update_balance(dec!(-300)).unwrap();
        // 0.50 + (-100 - -300) * 0.05
        assert_eq!(account.service_charges_on(today), dec!(10.50));
    }

    #[test]
    fn test_render_chequing() {
        let account = chequing(dec!(1200));
        assert_eq!(
            account.render_on(date(2026, 10, 15)),
            "Account Number: 9876 Balance: $1,200.00\n\
             Overdraft Limit: $-100.00 Overdraft Rate: 5.00% Account Type: Chequing"
        );
    }

    #[test]
    fn test_render_savings() {
        let account = Account::open(
            6854,
            1,
            dec!(1000),
            date(2024, 10, 6),
            AccountKind::Savings(SavingsTerms {
                minimum_balance: dec!(500),
            }),
            &BankConfig::default(),
        );
        assert_eq!(
            account.to_string(),
            "Account Number: 6854 Balance: $1,000.00\nMinimum Balance: $500.00 Account Type: Savings"
        );
    }

    #[test]
    fn test_render_investment_matches_charge() {
        let account = Account::open(
            59002635,
            5550,
            dec!(1200),
            date(2016, 10, 15),
            AccountKind::Investment(InvestmentTerms {
                management_fee: dec!(2.00),
            }),
            &BankConfig::default(),
        );

        let before = date(2026, 10, 14);
        assert_eq!(account.service_charges_on(before), dec!(2.50));
        assert_eq!(
            account.render_on(before),
            "Account Number: 59002635 Balance: $1,200.00\n\
             Date Created: 2016-10-15 Management Fee: $2.00 Account Type: Investment"
        );

        let after = date(2026, 10, 15);
        assert_eq!(account.service_charges_on(after), dec!(0.50));
        assert_eq!(
            account.render_on(after),
            "Account Number: 59002635 Balance: $1,200.00\n\
             Date Created: 2016-10-15 Management Fee: Waived Account Type: Investment"
        );
    }
}
