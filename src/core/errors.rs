use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for the word-friends library
#[derive(Debug, Error)]
pub enum NetworkError {
    /// A word source could not deliver its words
    #[error("Word source unavailable: {source_name} ({reason})")]
    SourceUnavailable {
        source_name: String,
        reason: String,
    },

    /// Filesystem errors
    #[error("IO operation failed: {operation}")]
    Io {
        operation: String,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// HTTP retrieval errors
    #[error("Fetching {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    /// YAML config parsing errors
    #[error("Invalid YAML configuration")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },

    /// A traversal worker panicked. Always a bug.
    #[error("Worker {worker} panicked during traversal")]
    WorkerPanicked { worker: usize },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl NetworkError {
    /// Create a source-unavailable error
    pub fn source_unavailable<S: Into<String>, R: ToString>(source_name: S, reason: R) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an IO error
    pub fn io<S: Into<String>>(operation: S, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: None,
            source,
        }
    }

    /// Create an IO error for an operation on a path
    pub fn io_path<S: Into<String>>(
        operation: S,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: Some(path.into()),
            source,
        }
    }

    /// Create a fetch error
    pub fn fetch<S: Into<String>>(url: S, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            field: None,
        }
    }

    /// Create a configuration error naming the offending field
    pub fn configuration_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Configuration {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Errors a word source recovers from by yielding an empty list
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. } | Self::Io { .. } | Self::Fetch { .. }
        )
    }

    /// Short category name, used as a structured log field
    pub fn category(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "source",
            Self::Io { .. } => "io",
            Self::Fetch { .. } => "fetch",
            Self::Configuration { .. } => "configuration",
            Self::Yaml { .. } => "yaml",
            Self::WorkerPanicked { .. } => "worker",
            Self::Internal { .. } => "internal",
        }
    }
}

/// Result type alias for word-friends operations
pub type Result<T> = std::result::Result<T, NetworkError>;
