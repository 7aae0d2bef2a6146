//! Key fetcher: one object in, one record out.

use std::sync::Arc;

use sa_error::StoreError;
use sa_traits::ObjectStore;
use tracing::{debug, info};

use crate::channel::ResultSlot;
use crate::record::KeyRecord;

/// Fetches single key objects and turns them into [`KeyRecord`]s.
///
/// Store errors never escape: a key that cannot be read becomes an empty
/// record so the remaining keys are still delivered.
pub struct KeyFetcher {
    store: Arc<dyn ObjectStore>,
    authlog: Option<String>,
}

impl KeyFetcher {
    /// Create a fetcher reading from `store`.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            authlog: None,
        }
    }

    /// Wrap every record with a `command=` option running `wrapper`.
    pub fn with_authlog(mut self, wrapper: impl Into<String>) -> Self {
        self.authlog = Some(wrapper.into());
        self
    }

    /// Fetch one key and normalize it into a record.
    pub async fn fetch(&self, bucket: &str, key: &str) -> KeyRecord {
        debug!(bucket = %bucket, key = %key, "Reading authorized key");

        let body = match self.store.get_object(bucket, key).await {
            Ok(body) => body,
            Err(e) => {
                log_fetch_error(key, &e);
                return KeyRecord::empty();
            }
        };

        let record = KeyRecord::from_body(body);
        match &self.authlog {
            Some(wrapper) => record.with_command_header(wrapper, bucket, key),
            None => record,
        }
    }

    /// Fetch one key and deliver the record into `slot`.
    pub async fn fetch_into(&self, bucket: &str, key: &str, slot: ResultSlot) {
        slot.send(self.fetch(bucket, key).await);
    }
}

fn log_fetch_error(key: &str, error: &StoreError) {
    match error {
        StoreError::Service { code, message } => {
            info!(key = %key, "Unable to get authorized key from S3: {}: {}", code, message)
        }
        StoreError::Transport(detail) => {
            info!(key = %key, "Unable to get authorized key from S3: {}", detail)
        }
    }
}
