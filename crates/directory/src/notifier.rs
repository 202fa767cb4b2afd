//! Client-side observer: forwards account alerts to the client's mailbox

use crate::client::Client;
use crate::outbox::EmailOutbox;
use chrono::Local;
use riverbank_core::{AccountObserver, ObserverError};
use std::sync::Arc;

/// Observer sending each alert as a simulated email to one client.
#[derive(Debug, Clone)]
pub struct ClientNotifier {
    name: String,
    client: Client,
    outbox: Arc<EmailOutbox>,
}

impl ClientNotifier {
    pub fn new(client: Client, outbox: Arc<EmailOutbox>) -> Self {
        Self {
            name: format!("client-{}", client.client_number()),
            client,
            outbox,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn subject() -> String {
        format!(
            "ALERT: Unusual Activity: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )
    }
}

impl AccountObserver for ClientNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&self, message: &str) -> Result<(), ObserverError> {
        let body = format!(
            "Notification for {}: {}: {}",
            self.client.client_number(),
            self.client.full_name(),
            message
        );
        self.outbox
            .send(self.client.email_address(), &Self::subject(), &body)?;
        Ok(())
    }
}
