//! Main execution logic for the sshauth CLI.

use std::sync::Arc;

use sa_error::Result;
use sa_keys::{AggregationStats, Aggregator, S3Config, S3Store};

use crate::args::{Cli, Target};

/// Build the S3 configuration from CLI arguments.
pub fn s3_config(args: &Cli) -> S3Config {
    let mut config = S3Config::new();

    if let Some(region) = &args.region {
        config = config.with_region(region);
    }

    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint);
    }

    config
}

/// Print the target user's authorized keys to stdout.
pub async fn execute(args: &Cli, target: &Target) -> Result<AggregationStats> {
    let config = s3_config(args);
    let store = S3Store::from_config(&config).await?;

    let mut aggregator = Aggregator::new(Arc::new(store));
    if let Some(authlog) = &target.authlog {
        aggregator = aggregator.with_authlog(authlog);
    }

    let mut stdout = tokio::io::stdout();
    aggregator
        .print_authorized_keys(&target.bucket, &target.prefix, &target.user, &mut stdout)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_s3_config_from_args() {
        let args = Cli::try_parse_from([
            "sshauth",
            "--bucket",
            "b",
            "--key",
            "keys",
            "--region",
            "eu-west-1",
            "--endpoint",
            "http://localhost:4566",
            "alice",
        ])
        .unwrap();

        let config = s3_config(&args);

        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.max_attempts, Some(sa_keys::s3::DEFAULT_MAX_ATTEMPTS));
    }
}
