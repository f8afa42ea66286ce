//! s3cp-core: Core library for the s3cp single-file transfer tool
//!
//! This crate provides:
//! - Transfer direction resolution for `s3://bucket[/key]` URLs
//! - The ObjectStore trait and an in-memory implementation
//! - Upload and download of a single object
//! - Content type sniffing
//! - Configuration management
//!
//! This crate is designed to be independent of any specific S3 SDK.

pub mod config;
pub mod error;
pub mod memory;
pub mod path;
pub mod sniff;
pub mod traits;
pub mod transfer;

pub use config::{Config, ConfigManager, Defaults, EndpointConfig};
pub use error::{Error, ErrorKind, Result};
pub use memory::MemoryStore;
pub use path::{RemoteLocation, Transfer, TransferRequest, parse_remote, resolve};
pub use traits::{ObjectReader, ObjectStore, PutObjectOutput, PutObjectRequest};
pub use transfer::TransferSummary;
