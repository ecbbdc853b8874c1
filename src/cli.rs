//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. Most options can also be supplied through environment variables.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command-line arguments for the keyword scraper.
///
/// # Examples
///
/// ```sh
/// # One pass with the built-in sources, CSV only
/// keyword_scrape scrape
///
/// # Custom sources, CSV plus SQLite
/// keyword_scrape --config sources.yaml scrape --database sqlite://articles.db
///
/// # HTTP trigger on port 8000
/// keyword_scrape serve --bind 0.0.0.0:8000
///
/// # Load a previous CSV into the database
/// keyword_scrape import extracted_articles.csv --database sqlite://articles.db
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional YAML file with sources, keywords, user agent and delay
    #[arg(short, long, global = true, env = "SCRAPE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one scraping pass and write the results
    Scrape {
        /// CSV file to write
        #[arg(short, long, default_value = "extracted_articles.csv")]
        output: PathBuf,

        /// SQLite database URL to append the results to
        #[arg(short, long, env = "DATABASE_URL")]
        database: Option<String>,

        /// Directory for a dated JSON snapshot of the run
        #[arg(short, long)]
        json_output_dir: Option<PathBuf>,
    },

    /// Serve `GET /scrape/`, running a pass on every request
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "SCRAPE_BIND", default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
    },

    /// Insert the rows of an existing CSV file into the database
    Import {
        /// CSV file previously written by `scrape`
        #[arg(default_value = "extracted_articles.csv")]
        input: PathBuf,

        /// SQLite database URL
        #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite://articles.db")]
        database: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_defaults() {
        let cli = Cli::parse_from(["keyword_scrape", "scrape"]);
        match cli.command {
            Command::Scrape {
                output,
                json_output_dir,
                ..
            } => {
                assert_eq!(output, PathBuf::from("extracted_articles.csv"));
                assert!(json_output_dir.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from([
            "keyword_scrape",
            "scrape",
            "-o",
            "/tmp/out.csv",
            "--config",
            "sources.yaml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("sources.yaml")));
    }

    #[test]
    fn test_serve_bind() {
        let cli = Cli::parse_from(["keyword_scrape", "serve", "--bind", "127.0.0.1:9000"]);
        match cli.command {
            Command::Serve { bind } => assert_eq!(bind.port(), 9000),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_invalid_bind_is_rejected() {
        let result = Cli::try_parse_from(["keyword_scrape", "serve", "--bind", "not-an-addr"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_import_positional_input() {
        let cli = Cli::parse_from([
            "keyword_scrape",
            "import",
            "old.csv",
            "--database",
            "sqlite::memory:",
        ]);
        match cli.command {
            Command::Import { input, database } => {
                assert_eq!(input, PathBuf::from("old.csv"));
                assert_eq!(database, "sqlite::memory:");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
