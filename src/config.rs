//! Run configuration: which pages to visit and which keywords to look for.
//!
//! A [`ScrapeConfig`] is built once at process start, either from the
//! built-in defaults or from a YAML file, and handed to the pipeline by
//! value. Nothing here is mutated after startup.
//!
//! # YAML layout
//!
//! ```yaml
//! sources:
//!   - https://www.who.int
//!   - https://inkyfada.com
//! keywords:
//!   - One Health
//!   - Tunisia
//! user_agent: "Mozilla/5.0 ..."
//! delay_ms: 1000
//! ```
//!
//! Every field is optional; omitted fields fall back to the defaults.

use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// Desktop browser identity sent with every request. Several of the default
/// sources reject the stock client identity.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Pause between two consecutive pages, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Default source list. `https://ftdes.net` appears twice on purpose: the
/// list is visited as written.
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://www.who.int",
    "https://www.undp.org",
    "https://www.worldbank.org",
    "http://www.ins.tn",
    "https://ftdes.net",
    "http://www.onm.nat.tn",
    "http://www.courdescomptes.nat.tn",
    "https://fr.slideshare.net",
    "https://inkyfada.com",
    "http://www.santetunisie.rns.tn",
    "https://www.tunisiaodd.tn",
    "http://www.comiteethique.rns.tn",
    "https://tunisia.unfpa.org",
    "https://frenchhealthcare-association.fr",
    "https://www.memoireonline.com",
    "https://www.april-international.com",
    "https://www.challenges.tn",
    "https://ftdes.net",
    "https://jamaity.org",
    "https://tunisia.iom.int",
    "https://www.persee.fr",
];

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "One Health",
    "Antibioresistance",
    "Maladies sexuelles et reproductives",
    "Mental health",
    "Maladies infectieuses",
    "Tunisia",
    "Tunisie",
];

/// Everything a scraping run needs to know up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Pages to visit, in order. Duplicates are kept.
    pub sources: Vec<String>,
    /// Keywords matched case-insensitively against anchor text.
    pub keywords: Vec<String>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Pause after every page, in milliseconds.
    pub delay_ms: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl ScrapeConfig {
    /// Load a configuration from a YAML file and validate it.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&raw)?;
        info!(
            sources = config.sources.len(),
            keywords = config.keywords.len(),
            delay_ms = config.delay_ms,
            "Loaded scrape configuration"
        );
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every run meaningless.
    ///
    /// An empty keyword would match every link, and an empty user agent
    /// defeats the point of sending one. An empty source list is allowed and
    /// simply produces an empty run.
    pub fn validate(&self) -> Result<()> {
        if let Some(pos) = self.keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(ScrapeError::Config(format!(
                "keyword #{} is empty",
                pos + 1
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ScrapeError::Config("user_agent is empty".to_string()));
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
