//! Word-list providers.
//!
//! Every provider yields plain words, one per line of its text source.
//! [`load_words`] is the recovering entry point: a provider failure is logged
//! and turned into an empty list, never into a fatal error.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::core::errors::{NetworkError, Result};

/// Supplies the candidate words of a dictionary
#[async_trait]
pub trait WordSource: Send + Sync {
    /// Human-readable origin, used in logs and errors
    fn describe(&self) -> String;

    async fn fetch_words(&self) -> Result<Vec<String>>;
}

/// Split newline-delimited text into words.
///
/// Handles `\r\n` endings and drops blank lines, so a trailing newline
/// never produces an empty word.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Fetch from `source`, falling back to an empty list on failure
pub async fn load_words(source: &dyn WordSource) -> Vec<String> {
    let origin = source.describe();
    info!(source = %origin, "Loading word list");
    match source.fetch_words().await {
        Ok(words) => {
            info!(source = %origin, words = words.len(), "Retrieved word list");
            words
        }
        Err(e) => {
            let e = if e.is_source_failure() {
                e
            } else {
                NetworkError::source_unavailable(origin.clone(), e)
            };
            warn!(
                source = %origin,
                category = e.category(),
                error = %e,
                "Word source unavailable; continuing with an empty word list"
            );
            Vec::new()
        }
    }
}

/// Newline-delimited word file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WordSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch_words(&self) -> Result<Vec<String>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| NetworkError::io_path("read word list", &self.path, e))?;
        Ok(parse_word_list(&text))
    }
}

/// Newline-delimited word list served over HTTP(S)
#[derive(Debug, Clone)]
pub struct UrlSource {
    url: String,
    timeout: Duration,
}

impl UrlSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl WordSource for UrlSource {
    fn describe(&self) -> String {
        format!("url {}", self.url)
    }

    async fn fetch_words(&self) -> Result<Vec<String>> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| NetworkError::fetch(self.url.clone(), e))?;
        let body = client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| NetworkError::fetch(self.url.clone(), e))?
            .text()
            .await
            .map_err(|e| NetworkError::fetch(self.url.clone(), e))?;
        Ok(parse_word_list(&body))
    }
}

/// Words already in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    words: Vec<String>,
}

impl MemorySource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl WordSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} words)", self.words.len())
    }

    async fn fetch_words(&self) -> Result<Vec<String>> {
        Ok(self.words.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    struct FailingSource;

    #[async_trait]
    impl WordSource for FailingSource {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        async fn fetch_words(&self) -> Result<Vec<String>> {
            Err(NetworkError::internal("boom"))
        }
    }

    #[test]
    fn test_parse_word_list() {
        assert_eq!(parse_word_list("cat\ncot\ncog\n"), vec!["cat", "cot", "cog"]);
        assert_eq!(parse_word_list("cat\r\ncot\r\n\r\n"), vec!["cat", "cot"]);
        assert_eq!(parse_word_list("\n\ndog"), vec!["dog"]);
        assert!(parse_word_list("").is_empty());
    }

    #[tokio::test]
    async fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "cat\ncot\n\n").unwrap();

        let source = FileSource::new(file.path());
        assert!(source.describe().starts_with("file "));
        assert_eq!(source.fetch_words().await.unwrap(), vec!["cat", "cot"]);
        assert_eq!(load_words(&source).await, vec!["cat", "cot"]);
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("word.list"));

        let err = source.fetch_words().await.unwrap_err();
        assert!(err.is_source_failure());
        assert!(load_words(&source).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_url_yields_empty_list() {
        // port 9 (discard) on loopback refuses connections
        let source = UrlSource::new("http://127.0.0.1:9/word.list", Duration::from_secs(2));
        assert!(load_words(&source).await.is_empty());
    }

    #[tokio::test]
    async fn test_memory_and_failing_sources() {
        let source = MemorySource::new(["cat", "cot"]);
        assert_eq!(load_words(&source).await, vec!["cat", "cot"]);
        assert!(load_words(&FailingSource).await.is_empty());
    }
}
