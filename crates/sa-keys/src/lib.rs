//! sa-keys - authorized-key aggregation from S3.
//!
//! This crate collects every SSH public key stored under
//! `s3://bucket/prefix/user/` and writes them as one `authorized_keys`
//! stream, the way sshd's `AuthorizedKeysCommand` expects:
//!
//! - Paginated listing, one page in flight at a time
//! - One concurrent fetch per listed object
//! - Output in listing order regardless of fetch completion order
//! - Unreadable keys are skipped, a closed reader ends the run cleanly
//! - Optional `command="..."` wrapping for per-key session logging
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sa_keys::{Aggregator, S3Config, S3Store};
//!
//! let config = S3Config::new().with_region("eu-west-1");
//! let store = S3Store::from_config(&config).await?;
//!
//! let aggregator = Aggregator::new(Arc::new(store))
//!     .with_authlog("/usr/local/bin/sshlogger.sh");
//!
//! let mut stdout = tokio::io::stdout();
//! let stats = aggregator
//!     .print_authorized_keys("my-bucket", "keys", "alice", &mut stdout)
//!     .await?;
//! eprintln!("wrote {} keys", stats.records_written);
//! ```

pub mod aggregator;
pub mod channel;
pub mod fetcher;
pub mod record;
pub mod s3;
pub mod stats;

#[cfg(test)]
mod testing;

pub use aggregator::{Aggregator, listing_prefix};
pub use channel::{ResultChannel, ResultSlot};
pub use fetcher::KeyFetcher;
pub use record::{KeyRecord, command_header, key_basename};
pub use s3::{S3Config, S3Store, create_s3_client, store_error};
pub use stats::AggregationStats;
