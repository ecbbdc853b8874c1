//! Case-insensitive keyword matching.

/// Fixed keyword set, stored lower-cased.
///
/// Matching is plain substring containment: no tokenization and no word
/// boundaries, so `"Tunisian"` matches the keyword `"Tunisia"`.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
}

impl KeywordMatcher {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// True if `text` contains at least one keyword, ignoring case.
    /// Blank text never matches.
    pub fn matches(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}
