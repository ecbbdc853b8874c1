//! Routing of fetched bodies by declared content type.

/// Which extraction path a fetched body takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// HTML or another markup flavour; goes through the link collector.
    Markup(String),
    /// Any other `text/*` body; becomes a single synthetic record.
    PlainText(String),
    /// Anything else. Carries the lower-cased content type for the log.
    Unsupported(String),
}

/// Route a body on its `Content-Type` header.
///
/// The header is lower-cased, then checked for `"html"` first and `"text"`
/// second. The body is never sniffed; an absent header arrives here as the
/// empty string and ends up [`PageContent::Unsupported`].
pub fn classify(content_type: &str, body: String) -> PageContent {
    let content_type = content_type.to_lowercase();
    if content_type.contains("html") {
        PageContent::Markup(body)
    } else if content_type.contains("text") {
        PageContent::PlainText(body)
    } else {
        PageContent::Unsupported(content_type)
    }
}
