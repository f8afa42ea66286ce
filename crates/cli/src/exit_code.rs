//! Exit code definitions for the s3cp CLI
//!
//! Scripts rely on a single convention: 0 on success, 1 on any failure.
//! The variants exist so the failure category can be logged and described.

use s3cp_core::{Error, ErrorKind};

/// Exit codes for the s3cp CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Operation completed successfully
    Success,

    /// Invalid arguments: wrong count, no remote URL, missing key
    UsageError,

    /// Local file could not be opened, read, created or written
    IoError,

    /// Storage service failure: auth, permission, network, not found
    ServiceError,

    /// Configuration file could not be loaded
    ConfigError,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::UsageError | Self::IoError | Self::ServiceError | Self::ConfigError => 1,
        }
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::UsageError => "Invalid arguments",
            Self::IoError => "Local file error",
            Self::ServiceError => "Storage service error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err.kind() {
            ErrorKind::Usage => Self::UsageError,
            ErrorKind::LocalIo => Self::IoError,
            ErrorKind::Service => Self::ServiceError,
            ErrorKind::Config => Self::ConfigError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
