// crates/flagtable-core/src/error.rs

//! Error types for every stage of the pipeline.
//!
//! Each stage owns its own error so callers can decide locally what is
//! fatal: a [`DirectoryLoadError`] empties the table, a [`FlagError`] only
//! costs one row its artwork. [`FlagTableError`] covers setup: config
//! loading and HTTP client construction.

use crate::common::FlagSummary;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause carried by [`NetworkError`], so fakes and real transports
/// can both report failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Timeout,
    Connect,
    Other,
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NetworkErrorKind::Timeout => "timeout",
            NetworkErrorKind::Connect => "connection failure",
            NetworkErrorKind::Other => "request failure",
        };
        f.write_str(label)
    }
}

/// A single HTTP request that did not produce a body.
#[derive(Debug, Error)]
#[error("{kind} while fetching {url}")]
pub struct NetworkError {
    pub url: String,
    pub kind: NetworkErrorKind,
    #[source]
    pub source: BoxError,
}

impl NetworkError {
    pub fn new(url: impl Into<String>, kind: NetworkErrorKind, source: impl Into<BoxError>) -> Self {
        Self {
            url: url.into(),
            kind,
            source: source.into(),
        }
    }

    pub fn timeout(url: impl Into<String>) -> Self {
        Self::new(url, NetworkErrorKind::Timeout, "request timed out")
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == NetworkErrorKind::Timeout
    }
}

/// Failure to produce a directory. Fatal for the rest of the pipeline.
#[derive(Debug, Error)]
pub enum DirectoryLoadError {
    #[error("directory request failed: {0}")]
    Network(#[from] NetworkError),

    #[error("directory body is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("directory JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("directory payload must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("name for code '{code}' is not a string")]
    NonStringName { code: String },

    #[error("directory contains an empty country code")]
    EmptyCode,

    #[error("country '{code}' has an empty name")]
    EmptyName { code: String },
}

/// Failure to attach a flag to one country.
#[derive(Debug, Error)]
pub enum FlagError {
    #[error("flag request for '{code}' failed")]
    Fetch {
        code: String,
        #[source]
        source: NetworkError,
    },

    #[error("flag for '{code}' could not be decoded")]
    Decode {
        code: String,
        #[source]
        source: image::ImageError,
    },

    #[error("flag for '{code}' decoded to an empty image")]
    EmptyImage { code: String },
}

impl FlagError {
    /// Country code of the row that lost its flag.
    pub fn code(&self) -> &str {
        match self {
            FlagError::Fetch { code, .. }
            | FlagError::Decode { code, .. }
            | FlagError::EmptyImage { code } => code,
        }
    }
}

/// A flag batch stopped by [`FailurePolicy::AbortBatch`](crate::loader::FailurePolicy),
/// with the counts of what it did before stopping.
#[derive(Debug, Error)]
#[error("flag batch aborted: {error}")]
pub struct FlagBatchError {
    pub summary: FlagSummary,
    #[source]
    pub error: FlagError,
}

impl FlagBatchError {
    /// Code of the first country that failed.
    pub fn code(&self) -> &str {
        self.error.code()
    }
}

#[derive(Debug, Error)]
pub enum FlagTableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file {path} is invalid: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP client could not be built: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, FlagTableError>;
