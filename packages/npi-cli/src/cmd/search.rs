//! `npi search`: fan a search out over a state's cities through the proxy.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use search_client::{
    write_csv, CityDirectory, ProxyClient, ResultTable, SearchCriteria, SearchOrchestrator,
    SearchView, SessionOutcome,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// State to search, by full name (e.g. "Wyoming")
    #[arg(long)]
    state: String,

    /// Taxonomy description (e.g. "Optometrist")
    #[arg(long)]
    taxonomy: Option<String>,

    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    /// Provider type: NPI-1 (individual) or NPI-2 (organization)
    #[arg(long, value_parser = ["NPI-1", "NPI-2"])]
    npi_type: Option<String>,

    /// Result page to print
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Sort by column name; repeat to toggle (first ascending, then descending)
    #[arg(long, value_name = "COL")]
    sort: Vec<String>,

    /// Write every result row to this CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Proxy password (overrides NPI_PASSWORD)
    #[arg(long)]
    password: Option<String>,
}

impl SearchArgs {
    fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            taxonomy: self.taxonomy.clone().unwrap_or_default(),
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            provider_type: self.npi_type.clone().unwrap_or_default(),
            state_name: self.state.clone(),
        }
    }
}

pub async fn run(config: &Config, directory: CityDirectory, args: SearchArgs) -> Result<()> {
    let sort_columns = args
        .sort
        .iter()
        .map(|name| output::column_index(name).with_context(|| format!("Unknown column: {}", name)))
        .collect::<Result<Vec<_>>>()?;

    let config = config.clone().with_password(args.password.clone());
    let client = Arc::new(ProxyClient::new(&config.proxy_url)?);

    if let Some(password) = &config.password {
        client.login(password).await.context("Login failed")?;
    }
    let authenticated = client
        .is_authenticated()
        .await
        .with_context(|| format!("Could not reach search proxy at {}", config.proxy_url))?;
    if !authenticated {
        bail!("Not authenticated. Pass --password or set NPI_PASSWORD.");
    }

    let orchestrator = SearchOrchestrator::new(client, Arc::new(directory));
    let view = run_session(&orchestrator, args.criteria()).await?;

    println!();
    println!("{}", view.message.bright_green().bold());
    if view.rows.is_empty() {
        return Ok(());
    }

    let mut table = ResultTable::new(view.rows);
    for column in sort_columns {
        table.sort_by_column(column);
    }
    table.set_page(args.page);
    output::print_page(&table);

    if let Some(path) = args.csv {
        write_csv(&path, table.rows())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} {}", "Wrote".bright_blue(), path.display());
    }

    Ok(())
}

/// Drive one session to its end, rendering progress. Ctrl-C stops the
/// session; rows gathered so far are kept.
async fn run_session(orchestrator: &SearchOrchestrator, criteria: SearchCriteria) -> Result<SearchView> {
    let handle = orchestrator.start(criteria)?;
    let mut updates = orchestrator.subscribe();
    let pb = create_progress_bar(orchestrator.snapshot().total_cities as u64);

    let wait = handle.wait();
    tokio::pin!(wait);
    let mut stopping = false;

    let outcome = loop {
        tokio::select! {
            outcome = &mut wait => break outcome?,
            Ok(()) = updates.changed() => {
                let view = updates.borrow_and_update().clone();
                render_progress(&pb, &view);
            }
            Ok(()) = tokio::signal::ctrl_c(), if !stopping => {
                stopping = true;
                orchestrator.cancel();
                pb.set_message("stopping...");
            }
        }
    };
    pb.finish_and_clear();

    let view = orchestrator.snapshot();
    match outcome {
        SessionOutcome::Completed { rows } => info!(rows, "Search completed"),
        SessionOutcome::Cancelled { rows } => info!(rows, "Search stopped"),
        SessionOutcome::NoCities => {}
        SessionOutcome::Superseded => bail!("Search was superseded by another session"),
    }
    Ok(view)
}

fn render_progress(pb: &ProgressBar, view: &SearchView) {
    pb.set_position(view.cities_done as u64);
    match &view.current_city {
        Some(city) => pb.set_message(format!("{} ({} rows)", city, view.rows.len())),
        None => pb.set_message(view.message.clone()),
    }
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.green} [{bar:40.green/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
