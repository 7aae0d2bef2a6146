//! Key aggregation tests against LocalStack S3.

use crate::common::LocalStackTestContext;
use sa_error::SaError;
use sa_keys::{Aggregator, S3Store};
use std::sync::Arc;

async fn aggregator(ctx: &LocalStackTestContext) -> Aggregator {
    let store = S3Store::from_config(&ctx.s3_config()).await.unwrap();
    Aggregator::new(Arc::new(store))
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_prints_user_keys_in_listing_order() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "sshauth-keys-order";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.upload_key(bucket, "keys/alice/k1", "AAA").await.unwrap();
    ctx.upload_key(bucket, "keys/alice/k2", "BBB\n").await.unwrap();
    ctx.upload_key(bucket, "keys/bob/k1", "CCC\n").await.unwrap();

    let mut out = Vec::new();
    let stats = aggregator(&ctx)
        .await
        .print_authorized_keys(bucket, "keys", "alice", &mut out)
        .await
        .unwrap();

    assert_eq!(out, b"AAA\nBBB\n");
    assert_eq!(stats.records_written, 2);
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_marker_object_contributes_nothing() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "sshauth-keys-marker";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.upload_key(bucket, "keys/carol", "").await.unwrap();
    ctx.upload_key(bucket, "keys/carol/laptop", "ssh-ed25519 KEY carol@laptop")
        .await
        .unwrap();

    let mut out = Vec::new();
    aggregator(&ctx)
        .await
        .print_authorized_keys(bucket, "keys", "carol", &mut out)
        .await
        .unwrap();

    assert_eq!(out, b"ssh-ed25519 KEY carol@laptop\n");
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_authlog_wrapping() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "sshauth-keys-authlog";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.upload_key(bucket, "keys/dave/k1", "ssh-rsa AAA").await.unwrap();

    let mut out = Vec::new();
    aggregator(&ctx)
        .await
        .with_authlog("/usr/local/bin/sshlogger.sh")
        .print_authorized_keys(bucket, "keys", "dave", &mut out)
        .await
        .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("command=\"/usr/local/bin/sshlogger.sh k1 {bucket} keys/dave/k1\" ssh-rsa AAA\n")
    );
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_missing_bucket_is_listing_error() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "sshauth-keys-does-not-exist";

    let mut out = Vec::new();
    let err = aggregator(&ctx)
        .await
        .print_authorized_keys(bucket, "keys", "erin", &mut out)
        .await
        .unwrap_err();

    match err {
        SaError::Listing(e) => assert_eq!(e.code(), Some("NoSuchBucket")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(out.is_empty());
}
