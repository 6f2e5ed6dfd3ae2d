use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, StoreError>;

/// The two fetch sequences the manager can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Prefixes,
    VersionIndexes,
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchKind::Prefixes => write!(f, "prefixes"),
            FetchKind::VersionIndexes => write!(f, "version indexes"),
        }
    }
}

/// Failures of a single outbound request
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with HTTP {status}")]
    Status { status: u16 },

    #[error("request timed out")]
    Timeout,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to get '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("Invalid document: {0}")]
    Schema(String),

    #[error("Storage failure at {path:?}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("A {0} fetch is already in progress")]
    AlreadyInProgress(FetchKind),
}

impl StoreError {
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Transport { .. })
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, StoreError::Schema(_))
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Storage {
            path: path.into(),
            source,
        }
    }
}
