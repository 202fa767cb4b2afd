//! # Riverbank Core
//!
//! Account model for a small retail-banking simulation.
//!
//! ```text
//! caller ──deposit/withdraw──▶ Account ──update_balance──▶ thresholds
//!                                 │                            │
//!                                 │ service_charges()          ▼
//!                                 ▼                     ObserverList::notify
//!                           ChargePolicy                 (best-effort fan-out)
//! ```
//!
//! - [`Account`]: one concrete type, kind-specific terms live in [`AccountKind`]
//! - [`ChargePolicy`]: overdraft / minimum balance / management fee strategies
//! - [`AccountObserver`]: capability that receives balance alerts
//!
//! Every operation is synchronous. An `Account` assumes a single writer; share it
//! across threads only behind your own lock.

pub mod account;
pub mod charge;
pub mod config;
pub mod draft;
pub mod error;
pub mod money;
pub mod observer;
pub mod parse;

pub use account::{
    Account, AccountKind, AccountType, ChequingTerms, InvestmentTerms, SavingsTerms,
};
pub use charge::{ChargePolicy, ManagementFeePolicy, MinimumBalancePolicy, OverdraftPolicy};
pub use config::{AlertThresholds, BankConfig, ParameterDefaults};
pub use draft::AccountDraft;
pub use error::{
    AccountError, AccountResult, ConfigError, IdentityField, ObserverError, UnknownAccountType,
};
pub use money::{format_currency, format_fixed, parse_amount, TransactionKind};
pub use observer::{AccountObserver, BalanceAlert, Delivery, ObserverList, RecordingObserver};
