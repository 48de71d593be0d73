//! Bankist CLI - banking dashboard and landing page from the terminal
//!
//! Usage:
//! ```bash
//! bankist bank                          # interactive dashboard, demo accounts
//! bankist --config seeds.json bank --timeout 60 --loan-delay-ms 500
//! bankist landing --slides 3 --tabs 3   # drive the landing page controllers
//! bankist accounts --format markdown --no-summary
//! ```

use anyhow::{Context, Result};
use bankist_core::BankConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

mod commands;

use commands::{accounts, bank, landing};

/// Bankist - mock banking dashboard and landing page
#[derive(Parser)]
#[command(name = "bankist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON seed config (demo accounts when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive banking dashboard
    Bank {
        /// Seconds of inactivity before auto-logout
        #[arg(long)]
        timeout: Option<u32>,
        /// Delay before an approved loan lands, in milliseconds
        #[arg(long)]
        loan_delay_ms: Option<u64>,
    },

    /// Interactive landing page (slider, tabs, modal, nav)
    Landing {
        /// Number of slides in the testimonial slider
        #[arg(long, default_value_t = 3)]
        slides: usize,
        /// Number of operation tabs
        #[arg(long, default_value_t = 3)]
        tabs: usize,
    },

    /// List the seeded accounts
    Accounts {
        /// Output format
        #[arg(long, default_value = "text")]
        format: ListFormat,
        /// Leave out the summary block (text and markdown)
        #[arg(long)]
        no_summary: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListFormat {
    Text,
    Markdown,
    Json,
}

fn load_config(path: Option<&Path>) -> Result<BankConfig> {
    match path {
        Some(path) => BankConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {:?}", path)),
        None => Ok(BankConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never break the rendered dashboard
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bank {
            timeout,
            loan_delay_ms,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(timeout) = timeout {
                config.session_timeout_secs = timeout;
            }
            if let Some(delay) = loan_delay_ms {
                config.loan_delay_ms = delay;
            }
            config.validate().context("Invalid settings")?;
            bank::run(&config).await?;
        }

        Commands::Landing { slides, tabs } => {
            landing::run(slides, tabs).await?;
        }

        Commands::Accounts { format, no_summary } => {
            let config = load_config(cli.config.as_deref())?;
            accounts::list(&config, format, !no_summary)?;
        }
    }

    Ok(())
}
