//! Bucket-to-bucket object transfer
//!
//! Moves and copies objects between buckets with per-object failure
//! isolation. A batch move is a best-effort job: every object's transfer
//! is launched independently, nothing is retried at this layer, and the
//! only observable outcome of the batch is the log stream. A single
//! object's move follows strict sequencing: the source is deleted only
//! after its copy has completed.

use std::sync::Arc;

use crate::lister::ObjectLister;
use crate::object::ObjectHandle;
use crate::traits::{CopyResponse, StorageClient};

/// Per-object result of a transfer step.
///
/// Produced and consumed within one transfer operation; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Copy completed
    Copied,
    /// Copy failed or did not complete; the object was left unmigrated
    CopyFailed,
    /// Copy and delete both completed
    Deleted,
    /// Copy completed but the source delete failed; the object now
    /// exists in both buckets
    DeleteFailed,
}

/// Copies and moves objects between buckets
#[derive(Clone)]
pub struct TransferEngine {
    client: Arc<dyn StorageClient>,
}

impl TransferEngine {
    /// Create a transfer engine over a shared storage client handle
    pub fn new(client: Arc<dyn StorageClient>) -> Self {
        Self { client }
    }

    /// Copy one object, preserving its key, into the destination bucket.
    ///
    /// Returns the raw copy response; not auto-retried. Use
    /// [`CopyResponse::copied_object`] to distinguish a completed copy
    /// from one still in progress.
    pub async fn copy_file(
        &self,
        source: &ObjectHandle,
        destination_bucket: &str,
    ) -> crate::error::Result<CopyResponse> {
        self.client.copy_object(source, destination_bucket).await
    }

    /// Delete one object.
    ///
    /// Returns true only if the backend reports a 2xx status; any error
    /// or other status yields false. Never returns an error.
    pub async fn delete_file(&self, object: &ObjectHandle) -> bool {
        match self.client.delete_object(object).await {
            Ok(status) => (200..300).contains(&status),
            Err(_) => false,
        }
    }

    /// Move one object: copy, await completion, then delete the source.
    ///
    /// If the copy fails the delete is never attempted. If the copy
    /// succeeds and the delete fails, the object is left duplicated
    /// across both buckets; this is logged as a distinct inconsistency,
    /// not treated as an overall failure. Failures are logged, never
    /// propagated.
    pub async fn move_file(
        &self,
        object: &ObjectHandle,
        destination_bucket: &str,
    ) -> TransferOutcome {
        let ObjectHandle { bucket: source, key } = object;
        tracing::info!("Moving \"{key}\" from \"{source}\" to \"{destination_bucket}\"");

        let response = match self.copy_file(object, destination_bucket).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    "Failed moving \"{key}\" from \"{source}\" to \"{destination_bucket}\": {e}"
                );
                return TransferOutcome::CopyFailed;
            }
        };

        if response.copied_object().is_none() {
            tracing::error!(
                "Copy of \"{key}\" to \"{destination_bucket}\" did not complete; leaving source in place"
            );
            return TransferOutcome::CopyFailed;
        }

        if self.delete_file(object).await {
            tracing::info!("Moved \"{key}\" from \"{source}\" to \"{destination_bucket}\"");
            TransferOutcome::Deleted
        } else {
            tracing::error!(
                "Copied \"{key}\" to \"{destination_bucket}\" but failed deleting it in \"{source}\""
            );
            TransferOutcome::DeleteFailed
        }
    }

    /// Move every object from one bucket to another.
    ///
    /// Lists the source bucket (a single listing page) and launches one
    /// independent task per object. One object's failure neither aborts
    /// nor delays any other object's transfer, and no aggregate result
    /// is returned; outcomes surface only through log events.
    pub async fn move_files(&self, source_bucket: &str, destination_bucket: &str) {
        let lister = ObjectLister::new(self.client.clone());

        let page = match lister.get_files_page(source_bucket, "").await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Failed listing files in \"{source_bucket}\": {e}");
                return;
            }
        };

        if page.truncated {
            tracing::warn!(
                "Listing of \"{source_bucket}\" is truncated; only the first page of objects will be moved"
            );
        }

        for object in page.objects {
            let engine = self.clone();
            let destination = destination_bucket.to_string();
            tokio::spawn(async move {
                engine.move_file(&object, &destination).await;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::traits::{CopyOperation, ListResponse, MockStorageClient};

    fn completed_copy(destination: &str, key: &str) -> CopyResponse {
        CopyResponse {
            object: ObjectHandle::new(destination, key),
            operation: Some(CopyOperation { done: true }),
        }
    }

    #[tokio::test]
    async fn test_delete_file_true_only_for_2xx() {
        for (status, expected) in [(200, true), (204, true), (299, true), (404, false), (500, false)]
        {
            let mut client = MockStorageClient::new();
            client.expect_delete_object().returning(move |_| Ok(status));

            let engine = TransferEngine::new(Arc::new(client));
            let object = ObjectHandle::new("exports", "sales-1.json");
            assert_eq!(engine.delete_file(&object).await, expected, "status {status}");
        }
    }

    #[tokio::test]
    async fn test_delete_file_false_on_transport_error() {
        let mut client = MockStorageClient::new();
        client
            .expect_delete_object()
            .returning(|_| Err(Error::Network("timed out".into())));

        let engine = TransferEngine::new(Arc::new(client));
        let object = ObjectHandle::new("exports", "sales-1.json");
        assert!(!engine.delete_file(&object).await);
    }

    #[tokio::test]
    async fn test_move_file_copy_failure_never_deletes() {
        let mut client = MockStorageClient::new();
        client
            .expect_copy_object()
            .returning(|_, _| Err(Error::Network("connection reset".into())));
        client.expect_delete_object().times(0);

        let engine = TransferEngine::new(Arc::new(client));
        let object = ObjectHandle::new("exports", "sales-1.json");
        let outcome = engine.move_file(&object, "archive").await;

        assert_eq!(outcome, TransferOutcome::CopyFailed);
    }

    #[tokio::test]
    async fn test_move_file_incomplete_copy_never_deletes() {
        let mut client = MockStorageClient::new();
        client.expect_copy_object().returning(|_, destination| {
            Ok(CopyResponse {
                object: ObjectHandle::new(destination, "sales-1.json"),
                operation: Some(CopyOperation { done: false }),
            })
        });
        client.expect_delete_object().times(0);

        let engine = TransferEngine::new(Arc::new(client));
        let object = ObjectHandle::new("exports", "sales-1.json");
        let outcome = engine.move_file(&object, "archive").await;

        assert_eq!(outcome, TransferOutcome::CopyFailed);
    }

    #[tokio::test]
    async fn test_move_file_success() {
        let mut client = MockStorageClient::new();
        client
            .expect_copy_object()
            .withf(|source, destination| {
                source == &ObjectHandle::new("exports", "sales-1.json") && destination == "archive"
            })
            .returning(|_, destination| Ok(completed_copy(destination, "sales-1.json")));
        client
            .expect_delete_object()
            .withf(|object| object == &ObjectHandle::new("exports", "sales-1.json"))
            .returning(|_| Ok(204));

        let engine = TransferEngine::new(Arc::new(client));
        let object = ObjectHandle::new("exports", "sales-1.json");
        let outcome = engine.move_file(&object, "archive").await;

        assert_eq!(outcome, TransferOutcome::Deleted);
    }

    #[tokio::test]
    async fn test_move_file_delete_failure_is_distinct() {
        let mut client = MockStorageClient::new();
        client
            .expect_copy_object()
            .returning(|_, destination| Ok(completed_copy(destination, "sales-1.json")));
        client.expect_delete_object().returning(|_| Ok(500));

        let engine = TransferEngine::new(Arc::new(client));
        let object = ObjectHandle::new("exports", "sales-1.json");
        let outcome = engine.move_file(&object, "archive").await;

        // Copied but not removed from source: accepted, logged, distinct
        assert_eq!(outcome, TransferOutcome::DeleteFailed);
    }

    #[tokio::test]
    async fn test_move_files_empty_source_makes_no_attempts() {
        let mut client = MockStorageClient::new();
        client
            .expect_list_objects()
            .times(2)
            .returning(|_, _| Ok(ListResponse::default()));
        client.expect_copy_object().times(0);
        client.expect_delete_object().times(0);

        let engine = TransferEngine::new(Arc::new(client));
        // Running twice against an already-empty source is idempotent
        engine.move_files("exports", "archive").await;
        engine.move_files("exports", "archive").await;
    }

    #[tokio::test]
    async fn test_move_files_listing_failure_makes_no_attempts() {
        let mut client = MockStorageClient::new();
        client
            .expect_list_objects()
            .returning(|_, _| Err(Error::Auth("access denied".into())));
        client.expect_copy_object().times(0);
        client.expect_delete_object().times(0);

        let engine = TransferEngine::new(Arc::new(client));
        engine.move_files("exports", "archive").await;
    }
}
