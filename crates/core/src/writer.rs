//! JSON document persistence
//!
//! Streams a serializable payload to storage as a single
//! `application/json` object. Writes are logged but never retried.

use std::sync::Arc;

use serde::Serialize;

use crate::traits::StorageClient;

/// Writes structured documents to storage
#[derive(Clone)]
pub struct DocumentWriter {
    client: Arc<dyn StorageClient>,
}

impl DocumentWriter {
    /// Create a writer over a shared storage client handle
    pub fn new(client: Arc<dyn StorageClient>) -> Self {
        Self { client }
    }

    /// Serialize `body` and write it as the entire object body under
    /// `bucket`/`key`, tagged with content type `application/json`.
    ///
    /// Success or error is logged; nothing is retried. Returns whether
    /// the write succeeded.
    pub async fn write_json<T>(&self, bucket: &str, key: &str, body: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        let payload = match serde_json::to_vec(body) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed serializing document for \"{key}\": {e}");
                return false;
            }
        };

        match self
            .client
            .put_object(bucket, key, payload, "application/json")
            .await
        {
            Ok(()) => {
                tracing::info!("\"{key}\" has been written.");
                true
            }
            Err(e) => {
                tracing::error!("Failed writing \"{key}\" to \"{bucket}\": {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::traits::MockStorageClient;

    #[tokio::test]
    async fn test_write_json_serializes_payload() {
        let mut client = MockStorageClient::new();
        client
            .expect_put_object()
            .withf(|bucket, key, body, content_type| {
                bucket == "exports"
                    && key == "manifest.json"
                    && body == br#"{"tables":2}"#
                    && content_type == "application/json"
            })
            .returning(|_, _, _, _| Ok(()));

        let writer = DocumentWriter::new(Arc::new(client));
        let body = serde_json::json!({ "tables": 2 });
        assert!(writer.write_json("exports", "manifest.json", &body).await);
    }

    #[tokio::test]
    async fn test_write_json_reports_failure() {
        let mut client = MockStorageClient::new();
        client
            .expect_put_object()
            .returning(|_, _, _, _| Err(Error::Network("broken pipe".into())));

        let writer = DocumentWriter::new(Arc::new(client));
        let body = serde_json::json!([1, 2, 3]);
        assert!(!writer.write_json("exports", "manifest.json", &body).await);
    }
}
