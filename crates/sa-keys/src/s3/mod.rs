//! S3 access for key aggregation.
//!
//! This module provides:
//! - Client configuration with S3-compatible endpoint support
//! - [`S3Store`], the `aws-sdk-s3` implementation of [`ObjectStore`](sa_traits::ObjectStore)

mod client;
mod store;

pub use client::{DEFAULT_MAX_ATTEMPTS, S3Config, create_s3_client};
pub use store::{S3Store, store_error};
