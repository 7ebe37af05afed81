//! Object addressing
//!
//! Handles addressing of stored objects as bucket/key pairs and parsing
//! of path arguments in the format: bucket[/key].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A handle to an individually addressable object within a bucket.
///
/// The bucket field is a back-reference used to address the object at
/// its storage location; it does not imply ownership of the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectHandle {
    /// Name of the bucket holding the object
    pub bucket: String,
    /// Object key within the bucket
    pub key: String,
}

impl ObjectHandle {
    /// Create a new ObjectHandle
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Address the same key in a different bucket
    pub fn in_bucket(&self, bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: self.key.clone(),
        }
    }
}

impl std::fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Parse a path string into a bucket name and an optional key or prefix.
///
/// Accepted formats:
/// - `bucket` (empty key)
/// - `bucket/key/or/prefix`
pub fn parse_bucket_path(path: &str) -> Result<(String, String)> {
    if path.is_empty() {
        return Err(Error::InvalidPath("Path cannot be empty".into()));
    }

    let (bucket, key) = match path.split_once('/') {
        Some((bucket, key)) => (bucket, key),
        None => (path, ""),
    };

    if bucket.is_empty() {
        return Err(Error::InvalidPath("Bucket name cannot be empty".into()));
    }

    if !is_valid_bucket_name(bucket) {
        return Err(Error::InvalidPath(format!(
            "Invalid bucket name: {bucket}"
        )));
    }

    Ok((bucket.to_string(), key.to_string()))
}

/// Check if a string is a plausible bucket name
fn is_valid_bucket_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_handle_display() {
        let object = ObjectHandle::new("exports", "sales-1.json");
        assert_eq!(object.to_string(), "exports/sales-1.json");
    }

    #[test]
    fn test_object_handle_in_bucket() {
        let object = ObjectHandle::new("exports", "sales-1.json");
        let moved = object.in_bucket("archive");
        assert_eq!(moved.bucket, "archive");
        assert_eq!(moved.key, "sales-1.json");
        // Source handle is untouched
        assert_eq!(object.bucket, "exports");
    }

    #[test]
    fn test_parse_bucket_only() {
        let (bucket, key) = parse_bucket_path("exports").unwrap();
        assert_eq!(bucket, "exports");
        assert_eq!(key, "");
    }

    #[test]
    fn test_parse_bucket_and_key() {
        let (bucket, key) = parse_bucket_path("exports/2024/sales-1.json").unwrap();
        assert_eq!(bucket, "exports");
        assert_eq!(key, "2024/sales-1.json");
    }

    #[test]
    fn test_parse_empty_path() {
        assert!(parse_bucket_path("").is_err());
    }

    #[test]
    fn test_parse_empty_bucket() {
        assert!(parse_bucket_path("/key").is_err());
    }

    #[test]
    fn test_parse_invalid_bucket_name() {
        assert!(parse_bucket_path("bad bucket/key").is_err());
    }
}
