//! ObjectStore trait definition
//!
//! This trait defines the two storage operations a transfer needs.
//! It allows the CLI to be decoupled from the specific S3 SDK implementation.

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::Result;
use crate::path::RemoteLocation;

/// Content-Disposition sent with every upload
pub const CONTENT_DISPOSITION_ATTACHMENT: &str = "attachment";

/// Everything a single put-object call carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectRequest {
    /// Destination bucket and key
    pub location: RemoteLocation,

    /// Object body
    pub body: Vec<u8>,

    /// MIME type of the body
    pub content_type: String,

    /// Canned ACL, passed through unvalidated
    pub acl: String,

    /// Content-Disposition header value
    pub content_disposition: String,
}

impl PutObjectRequest {
    /// Size of the body in bytes
    pub fn content_length(&self) -> i64 {
        self.body.len() as i64
    }
}

/// Result of a completed put-object call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutObjectOutput {
    /// ETag returned by the service, quotes stripped
    pub etag: Option<String>,
}

/// Object body as returned by [`ObjectStore::get_object`]
pub type ObjectReader = Box<dyn AsyncRead + Unpin + Send>;

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and by an in-memory store for testing.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store one object
    async fn put_object(&self, request: PutObjectRequest) -> Result<PutObjectOutput>;

    /// Open one object for reading
    ///
    /// Read errors on the returned body are transport failures; the caller
    /// owns the local side of the copy.
    async fn get_object(&self, location: &RemoteLocation) -> Result<ObjectReader>;
}
