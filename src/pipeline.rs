//! The scraping pass.
//!
//! [`PipelineRunner`] visits every configured source in order, one at a
//! time:
//!
//! 1. **Fetching**: [`PageFetcher::fetch`] turns the request into a [`FetchResult`]
//! 2. **Classifying**: [`classify`] routes the body on its content type
//! 3. **Extracting**: markup goes through [`collector::collect`], plain text
//!    becomes one synthetic record, anything else is skipped
//!
//! Each source ends as [`UrlOutcome::Done`], [`UrlOutcome::Skipped`] or
//! [`UrlOutcome::Failed`]. None of them stops the run. After every source,
//! whatever its outcome, the runner sleeps for the configured delay before
//! moving on, so there is never more than one request in flight and
//! requests are spaced by at least that delay.

use crate::classify::{PageContent, classify};
use crate::collector;
use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::extract::extract_title;
use crate::fetch::PageFetcher;
use crate::keywords::KeywordMatcher;
use crate::models::{ArticleRecord, DATE_UNAVAILABLE, FetchResult};
use crate::utils::take_chars;
use scraper::Html;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Characters of a plain-text body used as its title.
pub const PLAIN_TEXT_TITLE_CHARS: usize = 50;

/// Terminal state of one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlOutcome {
    /// Page processed; may hold zero records if nothing matched.
    Done(Vec<ArticleRecord>),
    /// Content type not handled. Informational.
    Skipped(String),
    /// HTTP or transport failure.
    Failed(String),
}

/// Per-run count of source outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunTally {
    pub done: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Sequential scraper over a fixed source list.
#[derive(Debug)]
pub struct PipelineRunner {
    fetcher: PageFetcher,
    matcher: KeywordMatcher,
    sources: Vec<String>,
    delay: Duration,
}

impl PipelineRunner {
    /// Build a runner from a validated configuration.
    ///
    /// Everything that can go wrong before the first request goes wrong
    /// here; once built, [`PipelineRunner::run`] cannot fail.
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            fetcher: PageFetcher::new(&config.user_agent)?,
            matcher: KeywordMatcher::new(&config.keywords),
            sources: config.sources.clone(),
            delay: config.delay(),
        })
    }

    /// Visit every source and return all records, in source order.
    pub async fn run(&self) -> Vec<ArticleRecord> {
        self.run_with_tally().await.0
    }

    /// Like [`PipelineRunner::run`], also reporting how each source ended.
    #[instrument(level = "info", skip_all, fields(sources = self.sources.len()))]
    pub async fn run_with_tally(&self) -> (Vec<ArticleRecord>, RunTally) {
        let started = Instant::now();
        let mut records = Vec::new();
        let mut tally = RunTally::default();

        for (i, url) in self.sources.iter().enumerate() {
            match self.process_url(url).await {
                UrlOutcome::Done(found) => {
                    info!(index = i, %url, count = found.len(), "Source processed");
                    tally.done += 1;
                    records.extend(found);
                }
                UrlOutcome::Skipped(reason) => {
                    info!(index = i, %url, %reason, "Source skipped");
                    tally.skipped += 1;
                }
                UrlOutcome::Failed(reason) => {
                    warn!(index = i, %url, %reason, "Source failed");
                    tally.failed += 1;
                }
            }
            // Unconditional: every outcome above falls through to here.
            sleep(self.delay).await;
        }

        info!(
            records = records.len(),
            done = tally.done,
            skipped = tally.skipped,
            failed = tally.failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scraping pass complete"
        );
        (records, tally)
    }

    /// Fetch, classify and extract a single source.
    #[instrument(level = "info", skip(self))]
    pub async fn process_url(&self, url: &str) -> UrlOutcome {
        debug!("Fetching");
        let (body, content_type) = match self.fetcher.fetch(url).await {
            FetchResult::Success {
                body,
                content_type,
                status,
            } => {
                debug!(status, bytes = body.len(), "Fetched");
                (body, content_type)
            }
            FetchResult::HttpError { message, .. } | FetchResult::TransportError { message } => {
                return UrlOutcome::Failed(message);
            }
        };

        debug!(%content_type, "Classifying");
        match classify(&content_type, body) {
            PageContent::Markup(html) => {
                debug!("Extracting links");
                UrlOutcome::Done(self.extract_markup(&html, url))
            }
            PageContent::PlainText(text) => UrlOutcome::Done(vec![plain_text_record(&text, url)]),
            PageContent::Unsupported(content_type) => {
                UrlOutcome::Skipped(format!("unsupported content type {content_type:?}"))
            }
        }
    }

    /// Parse and collect in one synchronous step; the parsed document is not
    /// `Send` and must not outlive this call.
    fn extract_markup(&self, html: &str, url: &str) -> Vec<ArticleRecord> {
        let document = Html::parse_document(html);
        let records = collector::collect(&document, url, &self.matcher);
        debug!(page_title = %extract_title(&document), matches = records.len(), "Parsed page");
        records
    }
}

/// The single, unfiltered record a plain-text page produces.
pub fn plain_text_record(text: &str, url: &str) -> ArticleRecord {
    ArticleRecord {
        url: url.to_string(),
        title: take_chars(text, PLAIN_TEXT_TITLE_CHARS),
        date: DATE_UNAVAILABLE.to_string(),
        site: url.to_string(),
    }
}

/// Build a runner for `config` and run it once.
///
/// Only configuration or client construction problems are errors; per-source
/// failures are logged and skipped.
pub async fn scrape(config: &ScrapeConfig) -> Result<Vec<ArticleRecord>> {
    let runner = PipelineRunner::new(config)?;
    Ok(runner.run().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use httpmock::prelude::*;

    const HEALTH_PAGE: &str = r#"<html>
        <head><title>Health Report</title></head>
        <body>
            <time datetime="2023-05-01">1 May</time>
            <a href="/p1">Tunisia One Health Report</a>
            <a href="/contact">Contact us</a>
        </body>
    </html>"#;

    fn config_for(sources: Vec<String>) -> ScrapeConfig {
        ScrapeConfig {
            sources,
            delay_ms: 0,
            ..ScrapeConfig::default()
        }
    }

    async fn html_server() -> MockServer {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200)
                    .header("content-type", "text/html; charset=utf-8")
                    .body(HEALTH_PAGE);
            })
            .await;
        server
    }

    #[tokio::test]
    async fn test_markup_page_end_to_end() {
        let server = html_server().await;
        let base = server.base_url();

        let records = scrape(&config_for(vec![base.clone()])).await.unwrap();
        assert_eq!(
            records,
            vec![ArticleRecord {
                url: format!("{base}/p1"),
                title: "Tunisia One Health Report".to_string(),
                date: "2023-05-01".to_string(),
                site: base,
            }]
        );
    }

    #[tokio::test]
    async fn test_plain_text_page_is_not_filtered() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/notes.txt");
                then.status(200)
                    .header("content-type", "text/plain")
                    .body("Hello world");
            })
            .await;
        let url = server.url("/notes.txt");

        let records = scrape(&config_for(vec![url.clone()])).await.unwrap();
        assert_eq!(
            records,
            vec![ArticleRecord {
                url: url.clone(),
                title: "Hello world".to_string(),
                date: DATE_UNAVAILABLE.to_string(),
                site: url,
            }]
        );
    }

    #[test]
    fn test_plain_text_title_is_fifty_chars() {
        let text = "x".repeat(80);
        let record = plain_text_record(&text, "https://example.org/robots.txt");
        assert_eq!(record.title.len(), 50);
        assert_eq!(record.site, "https://example.org/robots.txt");
    }

    #[tokio::test]
    async fn test_pdf_is_skipped() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/report.pdf");
                then.status(200)
                    .header("content-type", "application/pdf")
                    .body("%PDF-1.4 Tunisia");
            })
            .await;

        let runner = PipelineRunner::new(&config_for(vec![])).unwrap();
        let outcome = runner.process_url(&server.url("/report.pdf")).await;
        assert!(matches!(outcome, UrlOutcome::Skipped(_)));

        let records = scrape(&config_for(vec![server.url("/report.pdf")])).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_batch() {
        let server = html_server().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/broken");
                then.status(500);
            })
            .await;

        let sources = vec![
            "http://127.0.0.1:1/".to_string(),
            server.url("/broken"),
            server.base_url(),
        ];
        let runner = PipelineRunner::new(&config_for(sources)).unwrap();
        let (records, tally) = runner.run_with_tally().await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Tunisia One Health Report");
        assert_eq!(
            tally,
            RunTally {
                done: 1,
                skipped: 0,
                failed: 2
            }
        );
    }

    #[tokio::test]
    async fn test_http_error_outcome_carries_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gone");
                then.status(404);
            })
            .await;

        let runner = PipelineRunner::new(&config_for(vec![])).unwrap();
        match runner.process_url(&server.url("/gone")).await {
            UrlOutcome::Failed(message) => assert!(message.starts_with("404 Client Error: Not Found")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_sources_are_visited_twice_in_order() {
        let server = html_server().await;
        let text = MockServer::start_async().await;
        text.mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).header("content-type", "text/plain").body("plain");
        })
        .await;

        let sources = vec![server.base_url(), text.base_url(), server.base_url()];
        let records = scrape(&config_for(sources)).await.unwrap();
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Tunisia One Health Report", "plain", "Tunisia One Health Report"]
        );
    }

    #[tokio::test]
    async fn test_delay_follows_every_source() {
        let server = html_server().await;
        let sources = vec![
            server.base_url(),
            "http://127.0.0.1:1/".to_string(),
            server.base_url(),
        ];
        let config = ScrapeConfig {
            delay_ms: 100,
            ..config_for(sources)
        };

        let runner = PipelineRunner::new(&config).unwrap();
        let started = Instant::now();
        runner.run().await;
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_invalid_config_is_fatal() {
        let config = ScrapeConfig {
            keywords: vec!["".to_string()],
            ..config_for(vec![])
        };
        assert!(matches!(scrape(&config).await, Err(ScrapeError::Config(_))));

        let config = ScrapeConfig {
            user_agent: "bad\nagent".to_string(),
            ..config_for(vec![])
        };
        assert!(matches!(scrape(&config).await, Err(ScrapeError::Client(_))));
    }
}
