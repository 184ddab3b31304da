mod analyzer;
mod config;
mod fetcher;
mod model;
mod normalizer;
mod render;
mod snapshot;
mod utils;

use chrono::{Local, NaiveDate};
use config::{load_config, AppConfig};
use fetcher::{fetch_prices, BlsClient, SeriesSource};
use model::{AppError, RunReport};
use render::{grid_contents, replace_anchor_contents, BlogCards};
use snapshot::{build_snapshot, write_snapshot};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use utils::report_years;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.json"));

    // Load configuration from file
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let source = match BlsClient::new(config.endpoint.clone(), config.timeout()) {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let today = Local::now().date_naive();
    match run(&config, &source, today).await {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Update failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Fetches prices, rewrites the blog grid and refreshes the snapshot.
///
/// Nothing is written when the fetch fails outright. A rejected request still
/// produces the cards, with placeholder content in place of prices.
async fn run(
    config: &AppConfig,
    source: &dyn SeriesSource,
    today: NaiveDate,
) -> Result<RunReport, AppError> {
    let (start_year, end_year) = report_years(today);
    let catalog = config.catalog();
    info!("Fetching {} series for {}-{}...", catalog.len(), start_year, end_year);
    let prices = fetch_prices(source, &catalog, start_year, end_year).await?;
    if prices.is_none() {
        warn!("Prices unavailable, rendering placeholder content");
    }

    let cards = BlogCards::new(config, prices.as_deref(), today);
    info!("Trend: {:?}", cards.trend);

    let document_path = &config.blog_path;
    let document = fs::read_to_string(document_path).map_err(|source| AppError::Document {
        path: document_path.clone(),
        source,
    })?;
    let updated = replace_anchor_contents(
        &document,
        &config.anchor_selector,
        &grid_contents(&cards.render_html()),
    )?;
    fs::write(document_path, updated).map_err(|source| AppError::Document {
        path: document_path.clone(),
        source,
    })?;
    info!("Rewrote {}", document_path.display());

    let mut snapshot_path = None;
    match (&config.snapshot_path, build_snapshot(&cards)) {
        (Some(path), Some(snapshot)) => {
            write_snapshot(path, &snapshot)?;
            snapshot_path = Some(path.clone());
        }
        (Some(path), None) => info!("Keeping previous snapshot {}", path.display()),
        (None, _) => {}
    }

    Ok(RunReport {
        document_path: document_path.clone(),
        snapshot_path,
        card_titles: cards.titles(),
        prices_available: prices.is_some(),
    })
}

fn print_summary(report: &RunReport) {
    println!("Updated {}", report.document_path.display());
    for (i, title) in report.card_titles.iter().enumerate() {
        println!("  Box {}: {}", i + 1, title);
    }
    if let Some(path) = &report.snapshot_path {
        println!("Updated {}", path.display());
    }
    if !report.prices_available {
        println!("  (price data unavailable, placeholder shown)");
    }
}
