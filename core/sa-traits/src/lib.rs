//! Core traits for sshauth.
//!
//! This crate defines the seam between key aggregation and the storage
//! backend:
//! - [`ObjectStore`] - Narrow capability for listing and fetching objects
//! - [`ListingPage`] / [`ObjectSummary`] - One page of a paginated listing
//! - [`list_pages`] - Drives pagination as a lazy stream of pages

pub mod listing;
pub mod store;

pub use listing::list_pages;
pub use store::{ListingPage, ObjectStore, ObjectSummary};
