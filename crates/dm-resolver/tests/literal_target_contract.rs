//! Contract Test: Literal Targets
//!
//! Constraints verified:
//! - An IP literal is its own single endpoint
//! - No lookup ever happens for a literal
//! - No watch task is spawned, even when watching was requested
//! - The sink receives the endpoint exactly once

mod common;

use common::*;
use dm_resolver::{DomainResolver, ResolverConfig};
use std::sync::Arc;

#[tokio::test]
async fn ipv4_literal_resolves_to_itself() {
    let lookup = Arc::new(ScriptedLookup::new(vec![ips(&["9.9.9.9"])]));
    let config = ResolverConfig::new("10.0.0.1", "9000");

    let mut resolver =
        DomainResolver::new(config, lookup.clone()).expect("resolver construction succeeds");
    tokio_test::assert_ok!(resolver.start().await);

    assert_eq!(resolver.current_endpoints(), ["10.0.0.1:9000"]);
    assert_eq!(lookup.call_count(), 0, "literal targets are never looked up");
}

#[tokio::test]
async fn ipv6_literal_is_bracketed() {
    let lookup = Arc::new(ScriptedLookup::new(vec![]));
    let config = ResolverConfig::new("fe80::1", "53");

    let mut resolver = DomainResolver::new(config, lookup).expect("resolver construction succeeds");
    tokio_test::assert_ok!(resolver.start().await);

    assert_eq!(resolver.current_endpoints(), ["[fe80::1]:53"]);
}

#[tokio::test(start_paused = true)]
async fn literal_is_never_watched() {
    let lookup = Arc::new(ScriptedLookup::new(vec![ips(&["9.9.9.9"])]));
    let sink = Arc::new(RecordingSink::new());
    let (listener_tx, mut listener_rx) = tokio::sync::mpsc::channel(8);

    let config = ResolverConfig::new("10.0.0.1", "9000").with_watch(INTERVAL);
    let mut resolver = DomainResolver::new(config, lookup.clone())
        .expect("resolver construction succeeds")
        .with_sink(sink.clone())
        .with_change_listener(listener_tx);

    tokio_test::assert_ok!(resolver.start().await);
    assert!(!resolver.is_watching(), "no watch task for a literal");

    wait_ticks(5).await;

    assert_eq!(resolver.current_endpoints(), ["10.0.0.1:9000"]);
    assert_eq!(lookup.call_count(), 0);
    assert_eq!(sink.publish_count(), 1, "sink receives the literal once");
    assert_eq!(sink.last().unwrap(), ["10.0.0.1:9000"]);
    assert!(listener_rx.try_recv().is_err(), "no change is ever signaled");
}

#[tokio::test]
async fn stop_without_watch_task_is_a_no_op() {
    let config = ResolverConfig::new("10.0.0.1", "9000").with_watch(INTERVAL);
    let mut resolver = DomainResolver::new(config, Arc::new(ScriptedLookup::new(vec![])))
        .expect("resolver construction succeeds");

    // Before start, after start, and twice
    resolver.stop();
    tokio_test::assert_ok!(resolver.start().await);
    resolver.stop();
    resolver.stop();
    resolver.shutdown().await;

    assert_eq!(resolver.current_endpoints(), ["10.0.0.1:9000"]);
}
