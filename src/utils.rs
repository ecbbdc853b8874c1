//! Small string and file system helpers.
//!
//! - Character-safe truncation for titles and log lines
//! - Output path validation before a run spends time on the network

use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// First `max` characters of `s`.
///
/// Counts `char`s, not bytes, so multi-byte text is never split.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(take_chars("Tunisie", 3), "Tun");
/// assert_eq!(take_chars("éé", 5), "éé");
/// ```
pub fn take_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count of
/// the dropped characters appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        format!("{}…(+{} chars)", take_chars(s, max), total - max)
    }
}

/// Ensure the parent directory of `path` exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn ensure_parent_writable(path: impl AsRef<Path>) -> std::io::Result<()> {
    let dir = match path.as_ref().parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    fs::create_dir_all(&dir).await?;

    let probe = dir.join("..__probe_write__");
    fs::write(&probe, b"").await?;
    let _ = fs::remove_file(&probe).await;
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("Hello world", 50), "Hello world");
        assert_eq!(take_chars("Tunisie", 3), "Tun");
        assert_eq!(take_chars("ééé", 2), "éé");
        assert_eq!(take_chars("", 5), "");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.ends_with("…(+400 chars)"));
    }

    #[tokio::test]
    async fn test_ensure_parent_writable_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out/articles.csv");
        ensure_parent_writable(&target).await.unwrap();
        assert!(dir.path().join("nested/out").is_dir());
        assert!(!dir.path().join("nested/out/..__probe_write__").exists());
    }
}
