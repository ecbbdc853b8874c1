//! SQLite persistence for extracted articles.
//!
//! One table, created on connect if it does not exist yet:
//!
//! ```sql
//! CREATE TABLE articles (
//!     id    INTEGER PRIMARY KEY AUTOINCREMENT,
//!     url   TEXT,
//!     title TEXT,
//!     date  TEXT,
//!     site  TEXT
//! )
//! ```
//!
//! Rows are only ever appended; runs are not deduplicated against each other.

use crate::error::Result;
use crate::models::ArticleRecord;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{info, instrument};

const CREATE_ARTICLES: &str = r"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT,
        title TEXT,
        date TEXT,
        site TEXT
    )
";

/// Repository over the `articles` table.
#[derive(Debug, Clone)]
pub struct ArticleRepository {
    pool: SqlitePool,
}

impl ArticleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the file if needed) the database at `database_url`
    /// and make sure the `articles` table exists.
    ///
    /// The pool holds one connection; each `sqlite::memory:` connection is
    /// its own database.
    #[instrument(level = "info")]
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let repo = Self::new(pool);
        repo.ensure_table().await?;
        Ok(repo)
    }

    pub async fn ensure_table(&self) -> Result<()> {
        sqlx::query(CREATE_ARTICLES).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert every record in one transaction. Returns the number of rows
    /// written.
    #[instrument(level = "info", skip_all, fields(count = records.len()))]
    pub async fn insert_all(&self, records: &[ArticleRecord]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;
        for record in records {
            inserted += sqlx::query(
                r"
                INSERT INTO articles (url, title, date, site)
                VALUES (?1, ?2, ?3, ?4)
                ",
            )
            .bind(&record.url)
            .bind(&record.title)
            .bind(&record.date)
            .bind(&record.site)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;

        info!(inserted, "Articles inserted into the database");
        Ok(inserted)
    }

    /// All stored articles, oldest first.
    pub async fn all(&self) -> Result<Vec<ArticleRecord>> {
        let rows = sqlx::query("SELECT url, title, date, site FROM articles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| -> Result<ArticleRecord> {
                Ok(ArticleRecord {
                    url: row.try_get("url")?,
                    title: row.try_get("title")?,
                    date: row.try_get("date")?,
                    site: row.try_get("site")?,
                })
            })
            .collect()
    }
}
