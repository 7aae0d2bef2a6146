//! Common utilities for integration tests.
//!
//! This module provides shared test infrastructure for LocalStack-based
//! integration testing: client setup and key object uploads.

pub mod localstack;

pub use localstack::LocalStackTestContext;
