//! Object downloads to the local filesystem
//!
//! Unlike the batch transfer path, downloads are interactive-use
//! operations: errors propagate to the caller instead of degrading
//! silently.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::lister::ObjectLister;
use crate::object::ObjectHandle;
use crate::traits::StorageClient;

/// Downloads objects, folders and whole buckets
#[derive(Clone)]
pub struct Downloader {
    client: Arc<dyn StorageClient>,
}

impl Downloader {
    /// Create a downloader over a shared storage client handle
    pub fn new(client: Arc<dyn StorageClient>) -> Self {
        Self { client }
    }

    /// Fetch one object and write it under `local_dir`, recreating the
    /// key's folder structure. Returns the written path.
    pub async fn download_file(&self, object: &ObjectHandle, local_dir: &Path) -> Result<PathBuf> {
        let target = destination_path(local_dir, &object.key)?;

        let data = self.client.get_object(object).await?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, data).await?;

        tracing::info!("Downloaded \"{object}\" to \"{}\"", target.display());
        Ok(target)
    }

    /// Download every object under a prefix (single listing page, as
    /// elsewhere). Returns the number of objects written.
    pub async fn download_folder(
        &self,
        bucket: &str,
        prefix: &str,
        local_dir: &Path,
    ) -> Result<usize> {
        let lister = ObjectLister::new(self.client.clone());
        let objects = lister.get_files(bucket, prefix).await;

        let mut count = 0;
        for object in &objects {
            self.download_file(object, local_dir).await?;
            count += 1;
        }
        Ok(count)
    }

    /// Download every object in a bucket
    pub async fn download_bucket(&self, bucket: &str, local_dir: &Path) -> Result<usize> {
        self.download_folder(bucket, "", local_dir).await
    }
}

/// Resolve a key to a path under `local_dir`, rejecting traversal
fn destination_path(local_dir: &Path, key: &str) -> Result<PathBuf> {
    if key.is_empty() {
        return Err(Error::InvalidPath("Object key cannot be empty".into()));
    }
    if key.split('/').any(|part| part == "..") {
        return Err(Error::InvalidPath(format!(
            "Object key escapes the target directory: {key}"
        )));
    }
    Ok(local_dir.join(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ListResponse, MockStorageClient};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_download_file_writes_under_key_path() {
        let mut client = MockStorageClient::new();
        client
            .expect_get_object()
            .returning(|_| Ok(b"{\"rows\":[]}".to_vec()));

        let temp_dir = TempDir::new().unwrap();
        let downloader = Downloader::new(Arc::new(client));
        let object = ObjectHandle::new("exports", "2024/sales-1.json");

        let written = downloader
            .download_file(&object, temp_dir.path())
            .await
            .unwrap();

        assert_eq!(written, temp_dir.path().join("2024/sales-1.json"));
        let content = std::fs::read(&written).unwrap();
        assert_eq!(content, b"{\"rows\":[]}");
    }

    #[tokio::test]
    async fn test_download_file_rejects_traversal() {
        let client = MockStorageClient::new();
        let temp_dir = TempDir::new().unwrap();
        let downloader = Downloader::new(Arc::new(client));
        let object = ObjectHandle::new("exports", "../escape.json");

        let result = downloader.download_file(&object, temp_dir.path()).await;
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_download_folder_counts_objects() {
        let mut client = MockStorageClient::new();
        client.expect_list_objects().returning(|bucket, _| {
            Ok(ListResponse {
                objects: vec![
                    ObjectHandle::new(bucket, "a.json"),
                    ObjectHandle::new(bucket, "b.json"),
                ],
                prefixes: Vec::new(),
                truncated: false,
            })
        });
        client.expect_get_object().returning(|_| Ok(b"{}".to_vec()));

        let temp_dir = TempDir::new().unwrap();
        let downloader = Downloader::new(Arc::new(client));

        let count = downloader
            .download_folder("exports", "", temp_dir.path())
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert!(temp_dir.path().join("a.json").exists());
        assert!(temp_dir.path().join("b.json").exists());
    }

    #[tokio::test]
    async fn test_download_bucket_empty_listing() {
        let mut client = MockStorageClient::new();
        client
            .expect_list_objects()
            .returning(|_, _| Ok(ListResponse::default()));

        let temp_dir = TempDir::new().unwrap();
        let downloader = Downloader::new(Arc::new(client));

        let count = downloader
            .download_bucket("exports", temp_dir.path())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
