//! Link collection for markup pages.
//!
//! Every `<a href>` on the page is a candidate. Its trimmed text is checked
//! against the keyword set and, on a match, becomes an [`ArticleRecord`]
//! pointing at the resolved absolute URL.

use crate::extract::{element_text, extract_date};
use crate::keywords::KeywordMatcher;
use crate::models::ArticleRecord;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

/// Collect matching links from `document`, in document order.
///
/// `base_url` is the configured source URL: it is used to resolve relative
/// hrefs and is copied verbatim into each record's `site`. The page date is
/// extracted once and shared by every record from this page. Anchors with
/// blank text or hrefs that do not resolve are skipped without a record.
pub fn collect(document: &Html, base_url: &str, matcher: &KeywordMatcher) -> Vec<ArticleRecord> {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            warn!(%base_url, error = %e, "Base URL does not parse; no links collected");
            return Vec::new();
        }
    };

    let mut date: Option<String> = None;
    let mut records = Vec::new();

    for anchor in document.select(&ANCHOR) {
        // A whitespace-only href counts as empty.
        let Some(href) = anchor.value().attr("href").filter(|h| !h.trim().is_empty()) else {
            continue;
        };
        let title = element_text(&anchor);
        if !matcher.matches(&title) {
            continue;
        }
        let url = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!(%href, error = %e, "Skipping unresolvable href");
                continue;
            }
        };

        let date = date.get_or_insert_with(|| extract_date(document)).clone();
        records.push(ArticleRecord {
            url: url.to_string(),
            title,
            date,
            site: base_url.to_string(),
        });
    }

    records
}
