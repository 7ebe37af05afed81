//! Object and virtual-folder enumeration
//!
//! Object storage has no native directories; folder structure is derived
//! from flat key listings and backend-reported common prefixes. Listing
//! here is best-effort by design: these calls feed fire-and-forget batch
//! jobs where a crash is worse than an empty result, so any failure
//! degrades to "nothing found" and is only logged.

use std::sync::Arc;

use crate::object::ObjectHandle;
use crate::traits::{ListOptions, ListResponse, StorageClient};

/// Lists objects and virtual folders under a bucket
#[derive(Clone)]
pub struct ObjectLister {
    client: Arc<dyn StorageClient>,
}

impl ObjectLister {
    /// Create a lister over a shared storage client handle
    pub fn new(client: Arc<dyn StorageClient>) -> Self {
        Self { client }
    }

    /// Names of all objects whose key starts with `prefix`.
    ///
    /// Returns exactly one listing page; continuation tokens are not
    /// followed. On failure, returns an empty vec.
    pub async fn list_files(&self, bucket: &str, prefix: &str) -> Vec<String> {
        let options = ListOptions {
            prefix: non_empty(prefix),
            fields: Some("name".to_string()),
            ..Default::default()
        };

        match self.client.list_objects(bucket, options).await {
            Ok(response) => response.objects.into_iter().map(|o| o.key).collect(),
            Err(e) => {
                tracing::error!("Failed listing files in \"{bucket}\": {e}");
                Vec::new()
            }
        }
    }

    /// Virtual folders under `prefix`, with trailing delimiters stripped.
    ///
    /// Issues a delimited listing and returns only the common prefixes
    /// the backend reports. On failure, returns an empty vec.
    pub async fn list_folders(&self, bucket: &str, prefix: &str) -> Vec<String> {
        let options = ListOptions {
            prefix: non_empty(prefix),
            delimiter: Some("/".to_string()),
            ..Default::default()
        };

        match self.client.list_objects(bucket, options).await {
            Ok(response) => response
                .prefixes
                .into_iter()
                .map(|p| p.trim_end_matches('/').to_string())
                .collect(),
            Err(e) => {
                tracing::error!("Failed listing folders in \"{bucket}\": {e}");
                Vec::new()
            }
        }
    }

    /// Full descriptors for all objects whose key starts with `prefix`,
    /// for callers that need to act on the objects. On failure, returns
    /// an empty vec.
    pub async fn get_files(&self, bucket: &str, prefix: &str) -> Vec<ObjectHandle> {
        match self.get_files_page(bucket, prefix).await {
            Ok(response) => response.objects,
            Err(e) => {
                tracing::error!("Failed listing files in \"{bucket}\": {e}");
                Vec::new()
            }
        }
    }

    /// Single listing page with truncation flag, for callers that care
    /// whether the backend had more to say
    pub(crate) async fn get_files_page(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> crate::error::Result<ListResponse> {
        let options = ListOptions {
            prefix: non_empty(prefix),
            ..Default::default()
        };
        self.client.list_objects(bucket, options).await
    }
}

fn non_empty(prefix: &str) -> Option<String> {
    if prefix.is_empty() {
        None
    } else {
        Some(prefix.to_string())
    }
}
