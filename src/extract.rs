//! Best-effort page metadata: a general title and a publication date.
//!
//! Both extractors walk a fixed cascade of common markup conventions and
//! stop at the first usable (non-empty) value. Neither can fail; when the
//! cascade runs dry they return a sentinel string.
//!
//! # Title cascade
//!
//! 1. first `<title>`
//! 2. first `<h1>`
//! 3. `<meta name="description">`, cut to 50 characters
//! 4. [`TITLE_NOT_FOUND`]
//!
//! # Date cascade
//!
//! 1. `datetime` of the first `<time>`
//! 2. `<meta property="article:published_time">`
//! 3. `<meta name="date">`
//! 4. [`DATE_NOT_FOUND`]
//!
//! Dates are returned verbatim, without parsing.

use crate::models::{DATE_NOT_FOUND, TITLE_NOT_FOUND};
use crate::utils::take_chars;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Longest title taken from a meta description.
pub const DESCRIPTION_TITLE_CHARS: usize = 50;

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("static selector"));
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("static selector"));
static META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).expect("static selector"));
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").expect("static selector"));
static META_PUBLISHED: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="article:published_time"]"#).expect("static selector")
});
static META_DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="date"]"#).expect("static selector"));

/// Trimmed text of the first element matching `selector`, if non-empty.
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
}

/// Attribute `attr` of the first element matching `selector`, if non-empty.
fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Concatenated, trimmed text content of an element.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// General title of a page.
pub fn extract_title(document: &Html) -> String {
    first_text(document, &TITLE)
        .or_else(|| first_text(document, &H1))
        .or_else(|| {
            first_attr(document, &META_DESCRIPTION, "content")
                .map(|d| take_chars(&d, DESCRIPTION_TITLE_CHARS))
        })
        .unwrap_or_else(|| TITLE_NOT_FOUND.to_string())
}

/// Page-level publication date.
pub fn extract_date(document: &Html) -> String {
    first_attr(document, &TIME, "datetime")
        .or_else(|| first_attr(document, &META_PUBLISHED, "content"))
        .or_else(|| first_attr(document, &META_DATE, "content"))
        .unwrap_or_else(|| DATE_NOT_FOUND.to_string())
}
