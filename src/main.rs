//! # Keyword Scrape
//!
//! Visits a fixed list of web pages, keeps the links whose anchor text
//! mentions one of a small set of keywords, and records each one as
//! `url, title, date, site`.
//!
//! ## Usage
//!
//! ```sh
//! keyword_scrape scrape --database sqlite://articles.db
//! keyword_scrape serve --bind 0.0.0.0:8000
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: one page at a time, with a fixed browser user agent
//! 2. **Classifying**: HTML, other text, or skipped
//! 3. **Extracting**: keyword-matching links plus a page-level date
//! 4. **Output**: CSV, SQLite, JSON snapshot, or an HTTP response

use clap::Parser;
use std::collections::BTreeMap;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod classify;
mod cli;
mod collector;
mod config;
mod error;
mod extract;
mod fetch;
mod keywords;
mod models;
mod outputs;
mod pipeline;
mod utils;

use cli::{Cli, Command};
use config::ScrapeConfig;
use models::ArticleRecord;
use outputs::{csv_file, database::ArticleRepository, json};
use pipeline::PipelineRunner;
use std::path::Path;
use utils::{ensure_parent_writable, truncate_for_log};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match &args.config {
        Some(path) => ScrapeConfig::from_yaml_file(path)?,
        None => {
            let config = ScrapeConfig::default();
            config.validate()?;
            config
        }
    };

    match args.command {
        Command::Scrape {
            output,
            database,
            json_output_dir,
        } => run_batch(&config, &output, database.as_deref(), json_output_dir.as_deref()).await,
        Command::Serve { bind } => api::serve(config, bind).await,
        Command::Import { input, database } => import_csv(&input, &database).await,
    }
}

/// One pass, then every requested output.
#[instrument(level = "info", skip_all)]
async fn run_batch(
    config: &ScrapeConfig,
    output: &Path,
    database: Option<&str>,
    json_output_dir: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();

    // Fail before the network pass rather than after it.
    ensure_parent_writable(output).await?;
    let repo = match database {
        Some(url) => Some(ArticleRepository::connect(url).await?),
        None => None,
    };

    let runner = PipelineRunner::new(config)?;
    let (articles, tally) = runner.run_with_tally().await;

    csv_file::write_file(output, &articles)?;
    if let Some(repo) = &repo {
        repo.insert_all(&articles).await?;
    }
    log_articles(&articles);
    if let Some(dir) = json_output_dir {
        json::write_snapshot(&json::snapshot(articles), dir).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        done = tally.done,
        skipped = tally.skipped,
        failed = tally.failed,
        csv = %output.display(),
        "Execution complete"
    );
    Ok(())
}

/// Load a CSV written by an earlier run into the database.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
async fn import_csv(input: &Path, database: &str) -> Result<(), Box<dyn Error>> {
    let articles = csv_file::read_file(input)?;
    let repo = ArticleRepository::connect(database).await?;
    let inserted = repo.insert_all(&articles).await?;
    let total = repo.all().await?.len();
    info!(inserted, total, "Import complete");
    Ok(())
}

fn log_articles(articles: &[ArticleRecord]) {
    let mut per_host: BTreeMap<String, usize> = BTreeMap::new();
    for article in articles {
        info!(
            site = %article.site,
            title = %truncate_for_log(&article.title, 120),
            url = %article.url,
            date = %article.date,
            "Extracted article"
        );
        let host = article.site_host().unwrap_or_else(|| article.site.clone());
        *per_host.entry(host).or_default() += 1;
    }
    info!(total = articles.len(), ?per_host, "Articles per site");
}
