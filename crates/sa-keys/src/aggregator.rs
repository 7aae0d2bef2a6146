//! Aggregator: lists a user's key objects and writes them out in order.

use std::io;
use std::sync::Arc;

use futures::{StreamExt, pin_mut};
use sa_error::{Result, SaError, StoreError, is_broken_pipe};
use sa_traits::{ObjectStore, list_pages};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::channel::ResultChannel;
use crate::fetcher::KeyFetcher;
use crate::record::KeyRecord;
use crate::stats::AggregationStats;

/// Coordinates listing, concurrent fetching and ordered output.
///
/// For every listing page, one fetch task is launched per object, then
/// exactly one result is drained per object in listing order. The next
/// page is only requested after the current page has been written, so at
/// most one page of fetches is ever in flight.
pub struct Aggregator {
    store: Arc<dyn ObjectStore>,
    fetcher: Arc<KeyFetcher>,
}

impl Aggregator {
    /// Create an aggregator reading from `store`.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        let fetcher = Arc::new(KeyFetcher::new(Arc::clone(&store)));
        Self { store, fetcher }
    }

    /// Create an aggregator with a preconfigured fetcher.
    pub fn with_fetcher(store: Arc<dyn ObjectStore>, fetcher: KeyFetcher) -> Self {
        Self {
            store,
            fetcher: Arc::new(fetcher),
        }
    }

    /// Wrap every emitted key with a `command=` option running `wrapper`.
    pub fn with_authlog(self, wrapper: impl Into<String>) -> Self {
        let fetcher = KeyFetcher::new(Arc::clone(&self.store)).with_authlog(wrapper);
        Self::with_fetcher(self.store, fetcher)
    }

    /// Write every key stored under `prefix/user` in `bucket` to `out`.
    ///
    /// Keys that cannot be fetched are skipped. A closed reader
    /// ([`io::ErrorKind::BrokenPipe`]) ends the run successfully; other
    /// write errors are logged and the run continues.
    ///
    /// # Errors
    ///
    /// Returns [`SaError::Listing`] if any listing request fails, and
    /// [`SaError::Config`] for an empty bucket or user.
    pub async fn print_authorized_keys<W>(
        &self,
        bucket: &str,
        prefix: &str,
        user: &str,
        out: &mut W,
    ) -> Result<AggregationStats>
    where
        W: AsyncWrite + Unpin + Send,
    {
        if bucket.is_empty() {
            return Err(SaError::Config("bucket name is empty".to_string()));
        }
        if user.is_empty() {
            return Err(SaError::Config("user name is empty".to_string()));
        }

        let mut stats = AggregationStats::new();
        let listing_prefix = listing_prefix(prefix, user);

        debug!(bucket = %bucket, prefix = %listing_prefix, "Listing authorized keys");

        let pages = list_pages(self.store.as_ref(), bucket, &listing_prefix);
        pin_mut!(pages);

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                log_listing_error(&e);
                SaError::Listing(e)
            })?;

            stats.record_page(page.len());
            let mut channel = ResultChannel::with_capacity(page.len());
            // Dropping the set aborts fetches still running after an early stop
            let mut tasks = JoinSet::new();

            for obj in page.objects {
                // Stricter than a plain string-prefix match: `keys/alicebob/k1`
                // shares the prefix `keys/alice` but is skipped unfetched.
                if !belongs_to(&listing_prefix, &obj.key) || obj.key == listing_prefix {
                    debug!(key = %obj.key, "Skipping object");
                    stats.record_skipped();
                    channel.push_ready(KeyRecord::empty());
                    continue;
                }

                let slot = channel.reserve();
                let fetcher = Arc::clone(&self.fetcher);
                let bucket = bucket.to_string();
                stats.record_fetch_launched();
                tasks.spawn(async move {
                    fetcher.fetch_into(&bucket, &obj.key, slot).await;
                });
            }

            while let Some(record) = channel.drain().await {
                if record.is_empty() {
                    stats.record_empty();
                    continue;
                }

                match write_record(out, &record).await {
                    Ok(()) => stats.record_written(record.len()),
                    Err(e) if is_broken_pipe(&e) => {
                        debug!("Output closed by reader, stopping");
                        stats.mark_closed_early();
                        return Ok(finish(stats));
                    }
                    Err(e) => {
                        info!(error = %e, "Unable to copy authorized key to stdout");
                        stats.record_output_error();
                    }
                }
            }
        }

        Ok(finish(stats))
    }
}

/// Stamp the end time and log the run summary.
fn finish(mut stats: AggregationStats) -> AggregationStats {
    stats.complete();

    debug!(
        pages = stats.pages,
        objects = stats.objects_listed,
        written = stats.records_written,
        empty = stats.records_empty,
        bytes = stats.bytes_written,
        closed_early = stats.closed_early,
        "Authorized keys listed"
    );

    stats
}

/// Join the key prefix and the user name with exactly one separator.
///
/// Empty and `.` path segments are dropped; a leading slash is kept.
pub fn listing_prefix(prefix: &str, user: &str) -> String {
    let rooted = prefix.starts_with('/');
    let segments: Vec<&str> = prefix
        .split('/')
        .chain(user.split('/'))
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    let joined = segments.join("/");
    if rooted { format!("/{joined}") } else { joined }
}

/// Whether `key` is the prefix itself or lives below it.
///
/// A plain string prefix also matches other users whose name starts with
/// the same characters (`alice` vs `alicebob`); those keys are not ours.
fn belongs_to(listing_prefix: &str, key: &str) -> bool {
    match key.strip_prefix(listing_prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

async fn write_record<W>(out: &mut W, record: &KeyRecord) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(record.as_bytes()).await?;
    out.flush().await
}

fn log_listing_error(e: &StoreError) {
    match e {
        StoreError::Service { code, message } => {
            error!("Unable to list authorized keys: {}, message: {}", code, message)
        }
        StoreError::Transport(detail) => error!("Error listing authorized keys: {}", detail),
    }
}
