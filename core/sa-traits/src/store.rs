//! Object store capability and listing types.

use async_trait::async_trait;
use bytes::Bytes;
use sa_error::StoreResult;

/// One object returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    /// The object key (full path within the bucket)
    pub key: String,
}

impl ObjectSummary {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// One page of a paginated listing.
///
/// Objects are kept in the order the store returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Objects on this page, in listing order
    pub objects: Vec<ObjectSummary>,

    /// Token for the next page; `None` on the last page
    pub next_token: Option<String>,
}

impl ListingPage {
    /// Create a final page (no continuation).
    pub fn last(objects: Vec<ObjectSummary>) -> Self {
        Self {
            objects,
            next_token: None,
        }
    }

    /// Create a page followed by another one.
    pub fn with_next(objects: Vec<ObjectSummary>, next_token: impl Into<String>) -> Self {
        Self {
            objects,
            next_token: Some(next_token.into()),
        }
    }

    /// Whether this is the last page of the listing.
    pub fn is_last(&self) -> bool {
        self.next_token.is_none()
    }

    /// Number of objects on this page.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the page holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Capability for reading a bucket.
///
/// Implementations include:
/// - S3 via `aws-sdk-s3` (production)
/// - In-memory stores (tests)
///
/// Both operations report [`StoreError`](sa_error::StoreError), which
/// separates service-level errors (with a code) from transport failures.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Lists one page of objects under `prefix`.
    ///
    /// `continuation` is the `next_token` of the previous page, or `None`
    /// for the first request.
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<&str>,
    ) -> StoreResult<ListingPage>;

    /// Fetches the full body of one object.
    async fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Bytes>;
}
