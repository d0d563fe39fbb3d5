//! Cardy terminal client
//!
//! Interactive chat with the banking assistant, plus one-shot commands for
//! scripting.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use cardy_client::BankApi;
use cardy_core::{store, BankAssistant, BankStore, Config};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod render;

#[derive(Parser)]
#[command(name = "cardy")]
#[command(about = "Cardy AI banking assistant")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides CARDY_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the assistant a single question
    Ask {
        /// Question text
        query: String,
    },

    /// Look up account details for a mobile number
    Lookup {
        /// 10-digit mobile number
        mobile_number: String,
    },

    /// Check the backend health endpoint
    Health,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so they never interleave with the chat transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,cardy_core=info,cardy_client=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    tracing::debug!(api_url = %config.api_base_url, "Configuration loaded");

    let api: Arc<dyn BankApi> = Arc::new(config.client());
    if store::install(Arc::new(BankStore::new())).is_err() {
        anyhow::bail!("Store already installed");
    }
    let shared = store::global().context("Store not installed")?;
    let assistant = BankAssistant::new(shared, api.clone());

    match cli.command {
        None => app::App::new(assistant, api, config.health_interval).run().await,
        Some(Commands::Ask { query }) => app::ask(&assistant, &query).await,
        Some(Commands::Lookup { mobile_number }) => app::lookup(&assistant, &mobile_number).await,
        Some(Commands::Health) => app::health(&assistant, api.as_ref()).await,
    }
}
