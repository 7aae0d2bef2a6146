//! `aws-sdk-s3` implementation of the object store capability.

use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use bytes::Bytes;
use sa_error::{Result, StoreError, StoreResult};
use sa_traits::{ListingPage, ObjectStore, ObjectSummary};
use tracing::trace;

use super::client::{S3Config, create_s3_client};

/// Object store backed by an S3 client.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Wrap an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build the client from configuration.
    pub async fn from_config(config: &S3Config) -> Result<Self> {
        Ok(Self::new(create_s3_client(config).await?))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<&str>,
    ) -> StoreResult<ListingPage> {
        let mut req = self.client.list_objects_v2().bucket(bucket).prefix(prefix);

        if let Some(token) = continuation {
            req = req.continuation_token(token);
        }

        let resp = req.send().await.map_err(store_error)?;

        let objects: Vec<ObjectSummary> = resp
            .contents
            .unwrap_or_default()
            .into_iter()
            .filter_map(|obj| obj.key.map(ObjectSummary::new))
            .collect();

        let next_token = if resp.is_truncated == Some(true) {
            resp.next_continuation_token
        } else {
            None
        };

        trace!(
            bucket = bucket,
            prefix = prefix,
            objects = objects.len(),
            truncated = next_token.is_some(),
            "Listed page"
        );

        Ok(ListingPage {
            objects,
            next_token,
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Bytes> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(store_error)?;

        let body = resp.body.collect().await.map_err(|e| {
            StoreError::transport(format!("Failed to read body for s3://{bucket}/{key}: {e}"))
        })?;

        Ok(body.into_bytes())
    }
}

/// Convert an SDK error into a [`StoreError`].
///
/// Errors carrying an S3 error code become [`StoreError::Service`];
/// dispatch failures, timeouts and unparseable responses become
/// [`StoreError::Transport`] with the full error chain.
pub fn store_error<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug,
{
    if let Some(code) = err.code() {
        return StoreError::service(code, err.message().unwrap_or_default());
    }

    StoreError::transport(DisplayErrorContext(err).to_string())
}
