//! StorageClient trait definition
//!
//! This trait defines the interface for object-storage operations.
//! It decouples the utility layer from the specific storage SDK and
//! can be mocked for testing.

use async_trait::async_trait;

use crate::error::Result;
use crate::object::ObjectHandle;

/// Options for list operations
///
/// The default requests a single page of results: continuation tokens
/// are surfaced in the response but never followed automatically.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Prefix to filter keys by
    pub prefix: Option<String>,

    /// Delimiter for virtual-folder grouping (usually "/"); when set,
    /// the backend reports common prefixes instead of matching keys
    pub delimiter: Option<String>,

    /// Response payload projection hint (e.g. "name"). An optimization
    /// only; adapters without server-side support ignore it.
    pub fields: Option<String>,

    /// Follow continuation tokens transparently. Off by default so the
    /// caller controls batch semantics.
    pub paginate: bool,
}

/// Result of a list operation
#[derive(Debug, Clone, Default)]
pub struct ListResponse {
    /// Listed objects
    pub objects: Vec<ObjectHandle>,

    /// Common prefixes (virtual folders), exactly as reported by the
    /// backend, trailing delimiter included
    pub prefixes: Vec<String>,

    /// Whether the backend reported more results beyond this page
    pub truncated: bool,
}

/// Progress metadata attached to a copy response.
///
/// Backends that implement copy as a long-running operation report
/// completion through `done`; synchronous backends report `done: true`
/// as soon as the call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOperation {
    /// Whether the copy operation has completed
    pub done: bool,
}

/// Raw result of a copy operation
#[derive(Debug, Clone)]
pub struct CopyResponse {
    /// Handle to the object at its destination
    pub object: ObjectHandle,

    /// Operation metadata; absent when the backend returned a malformed
    /// or incomplete response
    pub operation: Option<CopyOperation>,
}

impl CopyResponse {
    /// The resulting object, only when the backend explicitly reported
    /// the copy as complete. `None` signals "still in progress" or a
    /// malformed response, and callers must treat it as such.
    pub fn copied_object(&self) -> Option<&ObjectHandle> {
        match &self.operation {
            Some(op) if op.done => Some(&self.object),
            _ => None,
        }
    }
}

/// Trait for object-storage operations
///
/// Implemented by the S3 adapter and mocked in unit tests. The handle
/// may be shared read-only across concurrent operations; the backend
/// handles its own internal locking.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// List objects in a bucket, subject to the given options
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResponse>;

    /// Server-side copy of one object into another bucket, preserving
    /// its key
    async fn copy_object(
        &self,
        source: &ObjectHandle,
        destination_bucket: &str,
    ) -> Result<CopyResponse>;

    /// Delete one object, returning the backend HTTP status code
    async fn delete_object(&self, object: &ObjectHandle) -> Result<u16>;

    /// Write an object body with the given content type
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;

    /// Get object content as bytes
    async fn get_object(&self, object: &ObjectHandle) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_options_default_is_single_page() {
        let options = ListOptions::default();
        assert!(!options.paginate);
        assert!(options.prefix.is_none());
        assert!(options.delimiter.is_none());
    }

    #[test]
    fn test_copied_object_done() {
        let response = CopyResponse {
            object: ObjectHandle::new("archive", "sales-1.json"),
            operation: Some(CopyOperation { done: true }),
        };
        assert_eq!(
            response.copied_object(),
            Some(&ObjectHandle::new("archive", "sales-1.json"))
        );
    }

    #[test]
    fn test_copied_object_not_done() {
        let response = CopyResponse {
            object: ObjectHandle::new("archive", "sales-1.json"),
            operation: Some(CopyOperation { done: false }),
        };
        assert!(response.copied_object().is_none());
    }

    #[test]
    fn test_copied_object_missing_operation() {
        let response = CopyResponse {
            object: ObjectHandle::new("archive", "sales-1.json"),
            operation: None,
        };
        assert!(response.copied_object().is_none());
    }
}
