//! Single-object upload and download
//!
//! Both operations own exactly one local file handle for their whole
//! duration; it is released when the function returns, on every path.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::{Error, Result};
use crate::path::{RemoteLocation, Transfer};
use crate::sniff::content_type_for;
use crate::traits::{CONTENT_DISPOSITION_ATTACHMENT, ObjectStore, PutObjectRequest};

/// Chunk size for copying a downloaded body to disk
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Outcome of a completed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSummary {
    /// Bytes moved
    pub size_bytes: u64,

    /// Content type sent with an upload
    pub content_type: Option<String>,

    /// ETag returned by an upload
    pub etag: Option<String>,
}

/// Execute a resolved transfer against `store`
pub async fn execute<S>(store: &S, transfer: &Transfer) -> Result<TransferSummary>
where
    S: ObjectStore + ?Sized,
{
    match transfer {
        Transfer::Upload {
            local_path,
            remote,
            acl,
        } => upload(store, local_path, remote, acl).await,
        Transfer::Download { remote, local_path } => download(store, remote, local_path).await,
    }
}

/// Upload a local file as a single object
pub async fn upload<S>(
    store: &S,
    local_path: &Path,
    remote: &RemoteLocation,
    acl: &str,
) -> Result<TransferSummary>
where
    S: ObjectStore + ?Sized,
{
    let body = {
        let mut file = File::open(local_path)
            .await
            .map_err(|e| Error::local_io(local_path, e))?;
        let mut body = Vec::new();
        file.read_to_end(&mut body)
            .await
            .map_err(|e| Error::local_io(local_path, e))?;
        body
    };

    let content_type = content_type_for(&body, local_path);
    let size_bytes = body.len() as u64;

    tracing::debug!(
        bucket = %remote.bucket,
        key = %remote.key,
        size_bytes,
        content_type = %content_type,
        acl,
        "uploading object"
    );

    let output = store
        .put_object(PutObjectRequest {
            location: remote.clone(),
            body,
            content_type: content_type.clone(),
            acl: acl.to_string(),
            content_disposition: CONTENT_DISPOSITION_ATTACHMENT.to_string(),
        })
        .await?;

    tracing::info!(bucket = %remote.bucket, key = %remote.key, size_bytes, "upload complete");

    Ok(TransferSummary {
        size_bytes,
        content_type: Some(content_type),
        etag: output.etag,
    })
}

/// Download a single object into a local file, creating or truncating it
///
/// Failures reading the object body are reported as network errors and
/// failures writing the file as local I/O errors on `local_path`.
pub async fn download<S>(
    store: &S,
    remote: &RemoteLocation,
    local_path: &Path,
) -> Result<TransferSummary>
where
    S: ObjectStore + ?Sized,
{
    let mut file = File::create(local_path)
        .await
        .map_err(|e| Error::local_io(local_path, e))?;

    tracing::debug!(bucket = %remote.bucket, key = %remote.key, path = %local_path.display(), "downloading object");

    let mut body = store.get_object(remote).await?;
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut size_bytes = 0u64;
    loop {
        let n = body
            .read(&mut buf)
            .await
            .map_err(|e| Error::Network(format!("{remote}: {e}")))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n])
            .await
            .map_err(|e| Error::local_io(local_path, e))?;
        size_bytes += n as u64;
    }
    file.flush()
        .await
        .map_err(|e| Error::local_io(local_path, e))?;

    tracing::info!(bucket = %remote.bucket, key = %remote.key, size_bytes, "download complete");

    Ok(TransferSummary {
        size_bytes,
        content_type: None,
        etag: None,
    })
}
