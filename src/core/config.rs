use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{NetworkError, Result};
use crate::network::variants::Alphabet;
use crate::source::{FileSource, UrlSource, WordSource};

pub const DEFAULT_START_WORD: &str = "causes";
pub const DEFAULT_WORKER_COUNT: usize = 8;
pub const DEFAULT_WORD_LIST_PATH: &str = "word_friends/word.list";
pub const DEFAULT_WORD_LIST_URL: &str =
    "https://github.com/causes/puzzles/raw/master/word_friends/word.list";
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Where the dictionary comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WordSourceConfig {
    /// Newline-delimited file on disk
    File { path: PathBuf },
    /// Newline-delimited document fetched over HTTP(S)
    Url { url: String },
}

impl Default for WordSourceConfig {
    fn default() -> Self {
        Self::File {
            path: PathBuf::from(DEFAULT_WORD_LIST_PATH),
        }
    }
}

impl WordSourceConfig {
    pub fn default_url() -> Self {
        Self::Url {
            url: DEFAULT_WORD_LIST_URL.to_string(),
        }
    }

    /// Build the provider this config describes
    pub fn to_source(&self, fetch_timeout: Duration) -> Box<dyn WordSource> {
        match self {
            Self::File { path } => Box::new(FileSource::new(path.clone())),
            Self::Url { url } => Box::new(UrlSource::new(url.clone(), fetch_timeout)),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::File { path } if path.as_os_str().is_empty() => {
                Err(NetworkError::configuration_field(
                    "word list path cannot be empty",
                    "word_source.path",
                ))
            }
            Self::Url { url } if url.trim().is_empty() => {
                Err(NetworkError::configuration_field(
                    "word list URL cannot be empty",
                    "word_source.url",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Run configuration for a network exploration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Word whose network is measured
    pub start_word: String,
    /// Number of traversal worker threads
    pub worker_count: usize,
    /// Dictionary provider
    pub word_source: WordSourceConfig,
    /// Letters used to generate edit-distance-1 variants
    pub alphabet: String,
    /// Report progress every N claimed words (0 = never)
    pub progress_interval: usize,
    /// Timeout for URL word sources, in seconds
    pub fetch_timeout_secs: u64,
    /// Known network size to check the result against
    pub expected_size: Option<usize>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            start_word: DEFAULT_START_WORD.to_string(),
            worker_count: DEFAULT_WORKER_COUNT,
            word_source: WordSourceConfig::default(),
            alphabet: Alphabet::default().to_string(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            fetch_timeout_secs: 30,
            expected_size: None,
        }
    }
}

impl NetworkConfig {
    /// Create a new builder for NetworkConfig
    pub fn builder() -> NetworkConfigBuilder {
        NetworkConfigBuilder::new()
    }

    /// Load a configuration from a YAML file. Missing keys take their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| NetworkError::io_path("read config file", path, e))?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(NetworkError::configuration_field(
                "worker_count must be greater than 0",
                "worker_count",
            ));
        }
        if self.start_word.is_empty() {
            return Err(NetworkError::configuration_field(
                "start_word cannot be empty",
                "start_word",
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(NetworkError::configuration_field(
                "fetch_timeout_secs must be greater than 0",
                "fetch_timeout_secs",
            ));
        }
        self.alphabet()?;
        self.word_source.validate()
    }

    /// Parsed alphabet
    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::new(&self.alphabet)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Builder for NetworkConfig
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl Default for NetworkConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: NetworkConfig::default(),
        }
    }

    /// Start from an existing configuration, e.g. one loaded from YAML
    pub fn from_config(config: NetworkConfig) -> Self {
        Self { config }
    }

    pub fn start_word(mut self, word: impl Into<String>) -> Self {
        self.config.start_word = word.into();
        self
    }

    pub fn worker_count(mut self, workers: usize) -> Self {
        self.config.worker_count = workers;
        self
    }

    pub fn word_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.word_source = WordSourceConfig::File { path: path.into() };
        self
    }

    pub fn word_url(mut self, url: impl Into<String>) -> Self {
        self.config.word_source = WordSourceConfig::Url { url: url.into() };
        self
    }

    pub fn alphabet(mut self, letters: impl Into<String>) -> Self {
        self.config.alphabet = letters.into();
        self
    }

    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.config.progress_interval = interval;
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout_secs = timeout.as_secs();
        self
    }

    pub fn expected_size(mut self, expected: Option<usize>) -> Self {
        self.config.expected_size = expected;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<NetworkConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
