//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the StorageClient trait from bk-core.
//! Transport-level retry and timeout policy is the SDK's concern; this
//! layer adds none of its own.

use async_trait::async_trait;

use bk_core::{
    CopyOperation, CopyResponse, Error, ListOptions, ListResponse, ObjectHandle, Result, Settings,
    StorageClient,
};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from connection settings.
    ///
    /// When access keys are configured they are used as static
    /// credentials; otherwise the SDK's default provider chain applies.
    pub async fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(settings.region.clone()));

        if let (Some(access_key), Some(secret_key)) =
            (settings.access_key.clone(), settings.secret_key.clone())
        {
            let credentials = aws_credential_types::Credentials::new(
                access_key,
                secret_key,
                None, // session token
                None, // expiry
                "bk-static-credentials",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &settings.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(settings.force_path_style)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl StorageClient for S3Client {
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResponse> {
        // The `fields` projection hint has no server-side equivalent in
        // the S3 API; responses always carry full object metadata.
        let mut objects = Vec::new();
        let mut prefixes = Vec::new();
        let mut continuation_token: Option<String> = None;
        let truncated;

        loop {
            let mut request = self.inner.list_objects_v2().bucket(bucket);

            if let Some(prefix) = &options.prefix {
                request = request.prefix(prefix);
            }

            if let Some(delimiter) = &options.delimiter {
                request = request.delimiter(delimiter);
            }

            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("NotFound") || err_str.contains("NoSuchBucket") {
                    Error::NotFound(format!("Bucket not found: {bucket}"))
                } else {
                    Error::Network(err_str)
                }
            })?;

            for prefix in response.common_prefixes() {
                if let Some(p) = prefix.prefix() {
                    prefixes.push(p.to_string());
                }
            }

            for object in response.contents() {
                if let Some(key) = object.key() {
                    objects.push(ObjectHandle::new(bucket, key));
                }
            }

            let is_truncated = response.is_truncated().unwrap_or(false);

            if options.paginate && is_truncated {
                continuation_token = response.next_continuation_token().map(|s| s.to_string());
                if continuation_token.is_some() {
                    continue;
                }
            }

            // Without paginate, the first page is surfaced as-is and the
            // caller sees whether the backend had more
            truncated = is_truncated && !options.paginate;
            break;
        }

        Ok(ListResponse {
            objects,
            prefixes,
            truncated,
        })
    }

    async fn copy_object(
        &self,
        source: &ObjectHandle,
        destination_bucket: &str,
    ) -> Result<CopyResponse> {
        // Copy source format: bucket/key
        let copy_source = format!("{}/{}", source.bucket, source.key);

        let response = self
            .inner
            .copy_object()
            .copy_source(&copy_source)
            .bucket(destination_bucket)
            .key(&source.key)
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("NotFound") || err_str.contains("NoSuchKey") {
                    Error::NotFound(source.to_string())
                } else {
                    Error::Network(err_str)
                }
            })?;

        // S3 copies complete synchronously; the result metadata is the
        // completion marker. A response without it is treated as not done.
        let operation = response
            .copy_object_result()
            .map(|_| CopyOperation { done: true });

        Ok(CopyResponse {
            object: source.in_bucket(destination_bucket),
            operation,
        })
    }

    async fn delete_object(&self, object: &ObjectHandle) -> Result<u16> {
        match self
            .inner
            .delete_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .send()
            .await
        {
            // S3 reports a successful delete as 204 No Content
            Ok(_) => Ok(204),
            Err(e) => match e.raw_response() {
                Some(raw) => Ok(raw.status().as_u16()),
                None => Err(Error::Network(e.to_string())),
            },
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let body = aws_sdk_s3::primitives::ByteStream::from(body);

        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(())
    }

    async fn get_object(&self, object: &ObjectHandle) -> Result<Vec<u8>> {
        let response = self
            .inner
            .get_object()
            .bucket(&object.bucket)
            .key(&object.key)
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("NotFound") || err_str.contains("NoSuchKey") {
                    Error::NotFound(object.to_string())
                } else {
                    Error::Network(err_str)
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(data)
    }
}
