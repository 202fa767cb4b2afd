//! Simulated email outbox - append-only text file
//!
//! Nothing is sent; each message is appended to `<dir>/observer_emails.txt`.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const OUTBOX_FILE: &str = "observer_emails.txt";

/// Outbox writing simulated emails to disk.
#[derive(Debug, Clone)]
pub struct EmailOutbox {
    path: PathBuf,
}

impl EmailOutbox {
    /// Create the outbox directory if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        Ok(Self {
            path: dir.join(OUTBOX_FILE),
        })
    }

    /// Path of the outbox file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one message.
    pub fn send(&self, email_address: &str, subject: &str, message: &str) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);

        write!(
            writer,
            "---\nTo: {}\nSubject: {}\nMessage: {}\n---\n",
            email_address, subject, message
        )?;
        writer.flush()?;

        tracing::debug!(to = email_address, subject, "Simulated email written");
        Ok(())
    }
}
