//! Riverbank CLI - client lookup and account operations from the command line
//!
//! Usage:
//! ```bash
//! riverbank clients
//! riverbank client 1 --filter type=savings
//! riverbank show 9876
//! riverbank deposit 9876 250.00
//! riverbank withdraw 9876 80
//! riverbank charge 9876
//! riverbank --data-dir fixtures --config bank.json withdraw 6854 10
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use riverbank_core::BankConfig;
use riverbank_directory::AccountDirectory;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{lookup, transaction};

/// Riverbank - accounts, service charges and balance alerts over CSV files
#[derive(Parser)]
#[command(name = "riverbank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding clients.csv and accounts.csv
    #[arg(long, default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Directory receiving simulated alert emails
    #[arg(long, default_value = "output", global = true)]
    pub outbox_dir: PathBuf,

    /// JSON file overriding thresholds, charges and parameter defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every client with their accounts
    Clients,

    /// List one client's accounts (number, balance, date, type)
    Client {
        /// Client number (e.g., 12345)
        client: String,
        /// Keep rows whose column contains the text: <column>=<text>
        #[arg(long)]
        filter: Option<lookup::AccountFilter>,
    },

    /// Show one account
    Show {
        /// Account number (e.g., 9876)
        account: u32,
    },

    /// Deposit funds to an account
    Deposit {
        /// Account number
        account: u32,
        /// Amount to deposit
        amount: String,
    },

    /// Withdraw funds from an account
    Withdraw {
        /// Account number
        account: u32,
        /// Amount to withdraw
        amount: String,
    },

    /// Compute and apply the account's service charge
    Charge {
        /// Account number
        account: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "riverbank_cli=info,riverbank_core=info,riverbank_directory=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(data_dir = ?cli.data_dir, outbox_dir = ?cli.outbox_dir, "Configuration loaded");
    let mut directory = AccountDirectory::load(&cli.data_dir, config)
        .with_context(|| format!("Failed to load directory {:?}", cli.data_dir))?;

    match cli.command {
        Commands::Clients => {
            lookup::list_clients(&directory);
        }

        Commands::Client { client, filter } => {
            lookup::show_client(&directory, &client, filter.as_ref())?;
        }

        Commands::Show { account } => {
            lookup::show_account(&directory, account)?;
        }

        Commands::Deposit { account, amount } => {
            transaction::deposit(&mut directory, &cli.outbox_dir, account, &amount)?;
        }

        Commands::Withdraw { account, amount } => {
            transaction::withdraw(&mut directory, &cli.outbox_dir, account, &amount)?;
        }

        Commands::Charge { account } => {
            transaction::charge(&mut directory, &cli.outbox_dir, account)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<BankConfig> {
    match path {
        Some(path) => BankConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {:?}", path)),
        None => Ok(BankConfig::default()),
    }
}
