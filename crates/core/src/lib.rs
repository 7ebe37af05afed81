//! bk-core: Core library for the bk storage utilities
//!
//! This crate provides the storage-agnostic functionality for bucketkit:
//! - Configuration management
//! - Object addressing and path parsing
//! - StorageClient trait for object-storage operations
//! - Listing, bucket-to-bucket transfer, name grouping, JSON document
//!   writing and downloads
//!
//! This crate is designed to be independent of any specific storage SDK,
//! allowing for easy testing and potential future support for other
//! backends.

pub mod config;
pub mod download;
pub mod error;
pub mod grouping;
pub mod lister;
pub mod object;
pub mod traits;
pub mod transfer;
pub mod writer;

pub use config::{Config, ConfigManager, Settings};
pub use download::Downloader;
pub use error::{Error, Result};
pub use grouping::{group_json, GroupedNames};
pub use lister::ObjectLister;
pub use object::{parse_bucket_path, ObjectHandle};
pub use traits::{CopyOperation, CopyResponse, ListOptions, ListResponse, StorageClient};
pub use transfer::{TransferEngine, TransferOutcome};
pub use writer::DocumentWriter;
