//! docdrop CLI
//!
//! A command-line interface for a docdrop document store endpoint.

mod commands;

use std::time::Duration;

use clap::{Parser, Subcommand};
use docdrop_ops::OpsConfig;
use tracing_subscriber::{EnvFilter, fmt};

/// docdrop CLI — list, upload, and download stored documents.
#[derive(Parser, Debug)]
#[command(name = "docdrop", version, about)]
struct Cli {
    /// Document store endpoint URL.
    #[arg(
        long,
        env = "DOCDROP_ENDPOINT",
        default_value = "http://localhost:8080",
        global = true
    )]
    endpoint: String,

    /// Request timeout in seconds.
    #[arg(long, env = "DOCDROP_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stored documents.
    List(commands::list::ListArgs),
    /// Upload a local file to the store.
    Upload(commands::upload::UploadArgs),
    /// Download a document by key.
    Download(commands::download::DownloadArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(endpoint = %cli.endpoint, "resolved endpoint");

    let config = OpsConfig::new(&cli.endpoint);
    let config = match cli.timeout_secs {
        Some(secs) => config.with_timeout(Duration::from_secs(secs)),
        None => config,
    };
    let client = config.client()?;

    match cli.command {
        Command::List(args) => commands::list::run(client, &args, &cli.format).await,
        Command::Upload(args) => commands::upload::run(client, &args, &cli.format).await,
        Command::Download(args) => commands::download::run(client, &args, &cli.format).await,
    }
}
