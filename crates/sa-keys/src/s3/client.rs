//! S3 client configuration and creation.

use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_sdk_s3::Client;
use sa_error::Result;
use tracing::debug;

/// Attempts per request once a region is configured explicitly.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Configuration for S3 access.
///
/// Bucket and key prefix are per-request inputs of the aggregator, not
/// client settings.
#[derive(Debug, Clone, Default)]
pub struct S3Config {
    /// AWS region
    pub region: Option<String>,

    /// Custom endpoint URL (S3-compatible stores, LocalStack)
    pub endpoint: Option<String>,

    /// Maximum attempts per request, including the first one
    pub max_attempts: Option<u32>,
}

impl S3Config {
    /// Create an S3Config that uses the SDK's defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region.
    ///
    /// Also raises the retry budget to [`DEFAULT_MAX_ATTEMPTS`] unless one
    /// was set explicitly.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self.max_attempts.get_or_insert(DEFAULT_MAX_ATTEMPTS);
        self
    }

    /// Set a custom endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the maximum attempts per request.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Create an S3 client from configuration.
pub async fn create_s3_client(config: &S3Config) -> Result<Client> {
    use aws_config::Region;

    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        debug!(region = %region, "Setting region");
        loader = loader.region(Region::new(region.clone()));
    }

    if let Some(max_attempts) = config.max_attempts {
        loader = loader.retry_config(RetryConfig::standard().with_max_attempts(max_attempts));
    }

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let aws_config = loader.load().await;

    let s3_config_builder = aws_sdk_s3::config::Builder::from(&aws_config);

    // Custom endpoints rarely support virtual-hosted buckets
    let s3_config = if config.endpoint.is_some() {
        s3_config_builder.force_path_style(true).build()
    } else {
        s3_config_builder.build()
    };

    Ok(Client::from_conf(s3_config))
}
