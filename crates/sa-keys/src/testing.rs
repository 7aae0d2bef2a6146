//! In-memory object store for unit tests.

use async_trait::async_trait;
use bytes::Bytes;
use sa_error::{StoreError, StoreResult};
use sa_traits::{ListingPage, ObjectStore, ObjectSummary};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;

/// Store with scripted pages and per-key bodies, delays and failures.
#[derive(Default)]
pub struct MockStore {
    pages: Vec<Vec<String>>,
    listing_error: Option<(usize, StoreError)>,
    bodies: HashMap<String, Bytes>,
    delays: HashMap<String, Duration>,
    failures: HashMap<String, StoreError>,
    gets: Mutex<Vec<String>>,
    list_calls: Mutex<usize>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listing page.
    pub fn page(mut self, keys: &[&str]) -> Self {
        self.pages.push(keys.iter().map(|k| k.to_string()).collect());
        self
    }

    /// Serve `body` for `key`.
    pub fn object(mut self, key: &str, body: &str) -> Self {
        self.bodies
            .insert(key.to_string(), Bytes::copy_from_slice(body.as_bytes()));
        self
    }

    /// Delay the fetch of `key`.
    pub fn delay(mut self, key: &str, millis: u64) -> Self {
        self.delays.insert(key.to_string(), Duration::from_millis(millis));
        self
    }

    /// Fail the fetch of `key`.
    pub fn fail(mut self, key: &str, error: StoreError) -> Self {
        self.failures.insert(key.to_string(), error);
        self
    }

    /// Fail the listing request for page `index`.
    pub fn fail_listing_at(mut self, index: usize, error: StoreError) -> Self {
        self.listing_error = Some((index, error));
        self
    }

    /// Keys fetched so far, in call order.
    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    /// Number of listing requests served.
    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn list_page(
        &self,
        _bucket: &str,
        _prefix: &str,
        continuation: Option<&str>,
    ) -> StoreResult<ListingPage> {
        let index = match continuation {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| StoreError::service("InvalidArgument", "bad continuation token"))?,
            None => 0,
        };
        *self.list_calls.lock().unwrap() += 1;

        if let Some((fail_at, error)) = &self.listing_error {
            if *fail_at == index {
                return Err(error.clone());
            }
        }

        let objects: Vec<ObjectSummary> = self
            .pages
            .get(index)
            .map(|keys| keys.iter().map(|k| ObjectSummary::new(k.as_str())).collect())
            .unwrap_or_default();

        if index + 1 < self.pages.len() {
            Ok(ListingPage::with_next(objects, (index + 1).to_string()))
        } else {
            Ok(ListingPage::last(objects))
        }
    }

    async fn get_object(&self, _bucket: &str, key: &str) -> StoreResult<Bytes> {
        self.gets.lock().unwrap().push(key.to_string());

        if let Some(delay) = self.delays.get(key) {
            sleep(*delay).await;
        }

        if let Some(error) = self.failures.get(key) {
            return Err(error.clone());
        }

        self.bodies
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::service("NoSuchKey", "The specified key does not exist."))
    }
}
