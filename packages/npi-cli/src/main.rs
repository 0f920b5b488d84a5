//! Operator CLI for state-wide NPI Registry searches.
//!
//! Talks to a running search proxy; see `npi --help`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cmd;
mod config;
mod output;

use config::Config;

#[derive(Parser)]
#[command(name = "npi")]
#[command(about = "Search the NPI Registry across every city of a state")]
#[command(version)]
struct Cli {
    /// Search proxy base URL (overrides NPI_PROXY_URL)
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Alternative city/state table (JSON, same shape as the bundled one)
    #[arg(long, global = true)]
    cities: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a state-wide search, one city at a time
    Search(cmd::search::SearchArgs),

    /// List the states in the city directory
    States,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().with_proxy_url(cli.proxy);
    let directory = cmd::load_directory(cli.cities.as_deref())?;

    match cli.command {
        Commands::Search(args) => cmd::search::run(&config, directory, args).await,
        Commands::States => cmd::states::run(&directory),
    }
}
