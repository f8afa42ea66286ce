//! In-memory object store
//!
//! Implements [`ObjectStore`] over a map so transfers can be exercised
//! without a real endpoint.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::path::RemoteLocation;
use crate::traits::{ObjectReader, ObjectStore, PutObjectOutput, PutObjectRequest};

/// An object as stored by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
    pub acl: String,
    pub content_disposition: String,
}

/// Object store backed by a HashMap
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<RemoteLocation, StoredObject>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object with default attributes
    pub fn insert(&self, location: RemoteLocation, body: Vec<u8>) {
        self.lock().insert(
            location,
            StoredObject {
                body,
                content_type: crate::sniff::OCTET_STREAM.to_string(),
                acl: crate::path::DEFAULT_ACL.to_string(),
                content_disposition: String::new(),
            },
        );
    }

    /// Get a copy of a stored object
    pub fn object(&self, location: &RemoteLocation) -> Option<StoredObject> {
        self.lock().get(location).cloned()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RemoteLocation, StoredObject>> {
        // A poisoned map is still structurally valid
        self.objects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(&self, request: PutObjectRequest) -> Result<PutObjectOutput> {
        let etag = format!("{:x}", request.body.len());
        self.lock().insert(
            request.location,
            StoredObject {
                body: request.body,
                content_type: request.content_type,
                acl: request.acl,
                content_disposition: request.content_disposition,
            },
        );
        Ok(PutObjectOutput { etag: Some(etag) })
    }

    async fn get_object(&self, location: &RemoteLocation) -> Result<ObjectReader> {
        let body = self
            .object(location)
            .ok_or_else(|| Error::NotFound(location.to_string()))?
            .body;
        Ok(Box::new(std::io::Cursor::new(body)))
    }
}
