//! Data models shared by the pipeline and the output adapters.
//!
//! - [`FetchResult`]: outcome of a single page request, consumed immediately
//! - [`ArticleRecord`]: one matched link (or one plain-text page)
//! - [`RunSnapshot`]: all records of one run, stamped with the local time
//!
//! [`ArticleRecord`] field order is the CSV column order, so keep
//! `url, title, date, site` as declared.

use serde::{Deserialize, Serialize};

/// Sentinel title used when a page yields no usable title.
pub const TITLE_NOT_FOUND: &str = "Title not found";
/// Sentinel date used when a markup page yields no usable date.
pub const DATE_NOT_FOUND: &str = "Date not found";
/// Date given to the synthetic record of a plain-text page.
pub const DATE_UNAVAILABLE: &str = "date unavailable";

/// Outcome of fetching one URL.
///
/// HTTP errors and transport errors are ordinary outcomes here, not
/// `Err` values: the pipeline branches on them and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// 2xx response with its decoded body.
    Success {
        body: String,
        /// Raw `Content-Type` header, empty if the server sent none.
        content_type: String,
        status: u16,
    },
    /// Non-2xx response.
    HttpError { status: u16, message: String },
    /// DNS, connect, TLS or body-read failure.
    TransportError { message: String },
}

/// A link whose anchor text matched a keyword.
///
/// # Fields
///
/// * `url` - Absolute URL of the link (relative hrefs already resolved)
/// * `title` - Trimmed anchor text
/// * `date` - Page-level publication date, or a sentinel
/// * `site` - The configured source URL the link was found on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub url: String,
    pub title: String,
    pub date: String,
    pub site: String,
}

/// All records produced by one run.
///
/// Written as the JSON snapshot; see [`crate::outputs::json`].
#[derive(Debug, Deserialize, Serialize)]
pub struct RunSnapshot {
    /// The date of the run in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The local time the snapshot was taken, `HH:MM:SS`.
    pub local_time: String,
    pub articles: Vec<ArticleRecord>,
}

impl ArticleRecord {
    /// Host of the originating site, e.g. `"www.who.int"`.
    pub fn site_host(&self) -> Option<String> {
        url::Url::parse(&self.site)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}
