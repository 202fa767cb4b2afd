//! # Riverbank Directory
//!
//! Flat-file collaborators around the account model.
//!
//! ## Layout
//!
//! ```text
//! data/
//!   clients.csv    client_number,first_name,last_name,email_address
//!   accounts.csv   account_number,client_number,balance,date_created,account_type,
//!                  overdraft_limit,overdraft_rate,minimum_balance,management_fee
//! output/
//!   observer_emails.txt   simulated alert emails, appended
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use riverbank_directory::{AccountDirectory, EmailOutbox};
//!
//! let mut directory = AccountDirectory::load("data", BankConfig::default())?;
//! let outbox = Arc::new(EmailOutbox::new("output")?);
//!
//! directory.attach_client_notifier(9876, &outbox)?;
//! directory.account_mut(9876)?.withdraw(dec!(10))?;
//! directory.persist_balance(9876)?;
//! ```

pub mod client;
pub mod error;
pub mod notifier;
pub mod outbox;
pub mod records;
pub mod store;

pub use client::{Client, DEFAULT_EMAIL};
pub use error::{DirectoryError, DirectoryResult};
pub use notifier::ClientNotifier;
pub use outbox::EmailOutbox;
pub use records::{AccountRecord, ClientRecord};
pub use store::AccountDirectory;
