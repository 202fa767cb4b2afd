//! Balance alerts and the observers that receive them
//!
//! Delivery is a synchronous broadcast in attachment order. A failing observer
//! is logged and skipped; the remaining observers still get the message and the
//! caller that triggered the alert never sees the failure.

use crate::error::ObserverError;
use crate::money::format_currency;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Party interested in balance events on an account.
pub trait AccountObserver: Send + Sync {
    /// Observer name (for logging)
    fn name(&self) -> &str;

    /// React to a message. Errors are reported back to the list, which logs them.
    fn update(&self, message: &str) -> Result<(), ObserverError>;
}

/// Event raised by a balance mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceAlert {
    /// Resulting balance fell under the low-balance floor
    LowBalance { account_number: u32, balance: Decimal },
    /// The applied change exceeded the large-transaction floor
    LargeTransaction { account_number: u32, amount: Decimal },
}

impl BalanceAlert {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceAlert::LowBalance { .. } => "low_balance",
            BalanceAlert::LargeTransaction { .. } => "large_transaction",
        }
    }
}

impl fmt::Display for BalanceAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceAlert::LowBalance {
                account_number,
                balance,
            } => write!(
                f,
                "Low balance warning {}: on account {}.",
                format_currency(*balance),
                account_number
            ),
            BalanceAlert::LargeTransaction {
                account_number,
                amount,
            } => write!(
                f,
                "Large transaction {}: on account {}.",
                format_currency(*amount),
                account_number
            ),
        }
    }
}

/// Outcome of one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub failed: usize,
}

/// Ordered set of observers, deduplicated by `Arc` identity.
#[derive(Clone, Default)]
pub struct ObserverList {
    observers: Vec<Arc<dyn AccountObserver>>,
}

fn same_observer(a: &Arc<dyn AccountObserver>, b: &Arc<dyn AccountObserver>) -> bool {
    // compare data pointers only; vtable pointers may differ across codegen units
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer. Returns false (and changes nothing) if already attached.
    pub fn attach(&mut self, observer: Arc<dyn AccountObserver>) -> bool {
        if self.contains(&observer) {
            tracing::debug!(observer = observer.name(), "Observer already attached");
            return false;
        }
        tracing::debug!(observer = observer.name(), "Attached observer");
        self.observers.push(observer);
        true
    }

    /// Remove an observer. Returns false (and changes nothing) if it was not attached.
    pub fn detach(&mut self, observer: &Arc<dyn AccountObserver>) -> bool {
        match self.observers.iter().position(|o| same_observer(o, observer)) {
            Some(index) => {
                self.observers.remove(index);
                tracing::debug!(observer = observer.name(), "Detached observer");
                true
            }
            None => {
                tracing::debug!(observer = observer.name(), "Observer was not attached");
                false
            }
        }
    }

    pub fn contains(&self, observer: &Arc<dyn AccountObserver>) -> bool {
        self.observers.iter().any(|o| same_observer(o, observer))
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `message` to every observer, in attachment order.
    pub fn notify(&self, message: &str) -> Delivery {
        let mut delivery = Delivery::default();

        for observer in &self.observers {
            match observer.update(message) {
                Ok(()) => {
                    tracing::debug!(observer = observer.name(), "Notified observer");
                    delivery.delivered += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        observer = observer.name(),
                        error = %e,
                        "Observer failed to handle message, continuing"
                    );
                    delivery.failed += 1;
                }
            }
        }

        delivery
    }
}

impl fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|o| o.name()))
            .finish()
    }
}

/// Observer that keeps every message in memory.
///
/// Handy for tests and for callers that want to inspect alerts after the fact.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    name: String,
    messages: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl AccountObserver for RecordingObserver {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&self, message: &str) -> Result<(), ObserverError> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|_| ObserverError::delivery_failed(&self.name, "message log poisoned"))?;
        messages.push(message.to_string());
        Ok(())
    }
}
