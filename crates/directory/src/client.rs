//! Client records
//!
//! A client owns accounts by number and is the usual observer of their alerts.

use crate::error::{DirectoryError, DirectoryResult};
use std::fmt;

/// Address substituted for a malformed email.
pub const DEFAULT_EMAIL: &str = "email@pixell-river.com";

/// A bank client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    client_number: u32,
    first_name: String,
    last_name: String,
    email_address: String,
}

impl Client {
    /// Create a client. Names are trimmed and must not be blank; a malformed
    /// email is replaced by [`DEFAULT_EMAIL`].
    pub fn new(
        client_number: u32,
        first_name: &str,
        last_name: &str,
        email_address: &str,
    ) -> DirectoryResult<Self> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(DirectoryError::ClientValidation(
                "First name cannot be blank.".to_string(),
            ));
        }

        let last_name = last_name.trim();
        if last_name.is_empty() {
            return Err(DirectoryError::ClientValidation(
                "Last name cannot be blank.".to_string(),
            ));
        }

        let email_address = normalize_email(email_address).unwrap_or_else(|| {
            tracing::warn!(
                client = client_number,
                email = email_address,
                "Invalid email address, using default"
            );
            DEFAULT_EMAIL.to_string()
        });

        Ok(Self {
            client_number,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email_address,
        })
    }

    pub fn client_number(&self) -> u32 {
        self.client_number
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} [{}] - {}",
            self.last_name, self.first_name, self.client_number, self.email_address
        )
    }
}

/// Structural email check: `local@domain.tld`, domain lowercased.
fn normalize_email(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let (local, domain) = raw.split_once('@')?;

    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return None;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return None;
    }
    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~.".contains(c));
    if !local_ok {
        return None;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return None;
    }
    let domain_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    if !domain_ok {
        return None;
    }

    Some(format!("{}@{}", local, domain.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_client() {
        let client = Client::new(1010, " Sukh ", "Warya", "sukh.warya@Example.COM").unwrap();

        assert_eq!(client.client_number(), 1010);
        assert_eq!(client.first_name(), "Sukh");
        assert_eq!(client.last_name(), "Warya");
        assert_eq!(client.email_address(), "sukh.warya@example.com");
        assert_eq!(client.full_name(), "Sukh Warya");
        assert_eq!(
            client.to_string(),
            "Warya, Sukh [1010] - sukh.warya@example.com"
        );
    }

    #[test]
    fn test_blank_names() {
        let err = Client::new(1010, " ", "Warya", "a@b.com").unwrap_err();
        assert_eq!(err.to_string(), "Invalid client: First name cannot be blank.");

        let err = Client::new(1010, "Sukh", "", "a@b.com").unwrap_err();
        assert_eq!(err.to_string(), "Invalid client: Last name cannot be blank.");
    }

    #[test]
    fn test_invalid_email_uses_default() {
        for raw in ["invalid-email", "a@b", "@b.com", "a@@b.com", "a b@c.com", "a@-b.com", ""] {
            let client = Client::new(1, "A", "B", raw).unwrap();
            assert_eq!(client.email_address(), DEFAULT_EMAIL, "input {:?}", raw);
        }
    }
}
