//! Error types for s3cp-core
//!
//! Provides a unified error type whose kind decides how the CLI reports it.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for s3cp-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad arguments: wrong URL usage, missing key, no remote side
    Usage,
    /// Local file could not be opened, read, created or written
    LocalIo,
    /// The storage service rejected or failed the request
    Service,
    /// Configuration file problem
    Config,
}

/// Error types for s3cp-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic usage error
    #[error("{0}")]
    Usage(String),

    /// A download source URL carries no object key
    #[error("Key missing in s3 URL: {0}")]
    MissingKey(String),

    /// Neither argument is a remote URL
    #[error("Either source or destination must be an s3:// URL")]
    NoRemote,

    /// Both arguments are remote URLs
    #[error("Only one of source or destination may be an s3:// URL (got {source_url} and {destination_url})")]
    AmbiguousRemote {
        source_url: String,
        destination_url: String,
    },

    /// Local filesystem error
    #[error("{}: {source}", path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Object or bucket does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication or permission failure
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Transport failure talking to the service
    #[error("Network error: {0}")]
    Network(String),

    /// Any other error reported by the service
    #[error("Service error: {0}")]
    Service(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Wrap an I/O error with the local path it happened on
    pub fn local_io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::LocalIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Usage(_)
            | Error::MissingKey(_)
            | Error::NoRemote
            | Error::AmbiguousRemote { .. } => ErrorKind::Usage,
            Error::LocalIo { .. } => ErrorKind::LocalIo,
            Error::NotFound(_)
            | Error::AccessDenied(_)
            | Error::Network(_)
            | Error::Service(_) => ErrorKind::Service,
            Error::Config(_) | Error::TomlParse(_) => ErrorKind::Config,
        }
    }

    /// Whether the user should be shown the usage line alongside the message
    pub const fn is_usage(&self) -> bool {
        matches!(self.kind(), ErrorKind::Usage)
    }
}
