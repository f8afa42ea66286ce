//! Path parsing and transfer direction resolution
//!
//! Remote locations have the format: s3://bucket[/key]
//! Anything else is treated as a local filesystem path.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// URL scheme identifying a remote location
pub const SCHEME: &str = "s3";

/// Canned ACL applied to uploads when none is given
pub const DEFAULT_ACL: &str = "private";

static REMOTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    // bucket: one or more non-'/' chars; key: everything after an optional '/'
    Regex::new(r"^s3://([^/]+)/?(.*)").expect("remote URL pattern is valid")
});

/// A bucket/key pair parsed from an s3:// URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteLocation {
    /// Bucket name (never empty)
    pub bucket: String,
    /// Object key (empty for bucket root)
    pub key: String,
}

impl RemoteLocation {
    /// Create a new RemoteLocation
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Whether the key denotes a "directory" that needs a file name appended
    pub fn is_dir(&self) -> bool {
        self.key.is_empty() || self.key.ends_with('/')
    }

    /// Get the full URL (s3://bucket/key)
    pub fn to_url(&self) -> String {
        format!("{SCHEME}://{}/{}", self.bucket, self.key)
    }
}

impl std::fmt::Display for RemoteLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_url())
    }
}

/// Parse a remote URL, returning None for anything that is a local path
pub fn parse_remote(path: &str) -> Option<RemoteLocation> {
    let caps = REMOTE_URL.captures(path)?;
    Some(RemoteLocation::new(&caps[1], &caps[2]))
}

/// Raw command line input for a single transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub source: String,
    pub destination: String,
    pub acl: String,
}

impl TransferRequest {
    /// Create a request using the default ACL
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            acl: DEFAULT_ACL.to_string(),
        }
    }

    /// Set the canned ACL used for uploads
    pub fn with_acl(mut self, acl: impl Into<String>) -> Self {
        self.acl = acl.into();
        self
    }
}

/// A resolved transfer, ready to be executed against an object store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    /// Local file to remote object
    Upload {
        local_path: PathBuf,
        remote: RemoteLocation,
        acl: String,
    },
    /// Remote object to local file
    Download {
        remote: RemoteLocation,
        local_path: PathBuf,
    },
}

impl Transfer {
    /// The remote side of the transfer
    pub fn remote(&self) -> &RemoteLocation {
        match self {
            Transfer::Upload { remote, .. } | Transfer::Download { remote, .. } => remote,
        }
    }

    /// The local side of the transfer
    pub fn local_path(&self) -> &Path {
        match self {
            Transfer::Upload { local_path, .. } | Transfer::Download { local_path, .. } => {
                local_path
            }
        }
    }

    /// Short direction label ("upload" or "download")
    pub fn direction(&self) -> &'static str {
        match self {
            Transfer::Upload { .. } => "upload",
            Transfer::Download { .. } => "download",
        }
    }
}

/// Decide the direction of a transfer and complete the destination key
///
/// Pure: performs no filesystem or network access.
pub fn resolve(request: &TransferRequest) -> Result<Transfer> {
    let source = parse_remote(&request.source);
    let destination = parse_remote(&request.destination);

    match (source, destination) {
        (Some(_), Some(_)) => Err(Error::AmbiguousRemote {
            source_url: request.source.clone(),
            destination_url: request.destination.clone(),
        }),
        (Some(remote), None) => {
            if remote.key.is_empty() {
                return Err(Error::MissingKey(request.source.clone()));
            }
            Ok(Transfer::Download {
                remote,
                local_path: PathBuf::from(&request.destination),
            })
        }
        (None, Some(mut remote)) => {
            let local_path = PathBuf::from(&request.source);
            if remote.is_dir() {
                let name = local_path.file_name().ok_or_else(|| {
                    Error::Usage(format!(
                        "Cannot derive an object name from '{}'",
                        request.source
                    ))
                })?;
                remote.key.push_str(&name.to_string_lossy());
            }
            Ok(Transfer::Upload {
                local_path,
                remote,
                acl: request.acl.clone(),
            })
        }
        (None, None) => Err(Error::NoRemote),
    }
}
