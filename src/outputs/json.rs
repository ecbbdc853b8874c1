//! JSON snapshot of a run.
//!
//! Snapshots are grouped by day, one file per run:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 08-00-12.json
//!     └── 14-30-05.json
//! ```

use crate::error::Result;
use crate::models::{ArticleRecord, RunSnapshot};
use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Stamp `articles` with the current local date and time.
pub fn snapshot(articles: Vec<ArticleRecord>) -> RunSnapshot {
    let now = Local::now();
    RunSnapshot {
        local_date: now.date_naive().to_string(),
        local_time: now.time().format("%H:%M:%S").to_string(),
        articles,
    }
}

/// Write a [`RunSnapshot`] under `json_output_dir`, returning the file path.
///
/// The file lands at `{json_output_dir}/{local_date}/{HH-MM-SS}.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.as_ref().display()))]
pub async fn write_snapshot(
    snapshot: &RunSnapshot,
    json_output_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(snapshot)?;

    let day_dir = json_output_dir.as_ref().join(&snapshot.local_date);
    if let Err(e) = fs::create_dir_all(&day_dir).await {
        error!(dir = %day_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = day_dir.join(format!("{}.json", snapshot.local_time.replace(':', "-")));
    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = snapshot.articles.len(), "Wrote JSON snapshot");
    Ok(path)
}
