//! Output adapters for a run's records.
//!
//! # Submodules
//!
//! - [`csv_file`]: `url,title,date,site` CSV file, plus reading it back
//! - [`database`]: SQLite `articles` table
//! - [`json`]: dated JSON snapshot of a run
//!
//! The adapters take the records as produced; none of them filters,
//! reorders or deduplicates.

pub mod csv_file;
pub mod database;
pub mod json;
