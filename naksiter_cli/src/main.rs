//! Naksiter CLI - Check URLs against a Naksiter server
//!
//! Usage:
//!   naksiter check <URL>       Classify a URL
//!   naksiter preview <URL>     Summarize a page
//!   naksiter report <URL>      Report a URL as phishing
//!   naksiter logs              View recent reports

mod client;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "naksiter")]
#[command(author = "Naksiter Team")]
#[command(version)]
#[command(about = "Check suspicious URLs for phishing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Server URL
    #[arg(
        short,
        long,
        global = true,
        env = "NAKSITER_SERVER",
        default_value = "http://localhost:10000"
    )]
    server: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a URL
    Check {
        /// URL to check (scheme optional)
        url: String,

        /// Show the signals behind the verdict
        #[arg(short, long)]
        detail: bool,
    },

    /// Summarize the contents of a page
    Preview {
        /// URL of the page
        url: String,
    },

    /// Report a URL as phishing
    Report {
        /// URL to report
        url: String,
    },

    /// View recent reports
    Logs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},naksiter_cli=info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let client = client::ApiClient::new(&cli.server)?;
    tracing::debug!("Using server {}", client.base_url());

    // Handle commands
    match cli.command {
        Commands::Check { url, detail } => {
            commands::check::run(&client, &url, detail).await?;
        }

        Commands::Preview { url } => {
            commands::preview::run(&client, &url).await?;
        }

        Commands::Report { url } => {
            commands::report::submit(&client, &url).await?;
        }

        Commands::Logs => {
            commands::report::logs(&client).await?;
        }
    }

    Ok(())
}
