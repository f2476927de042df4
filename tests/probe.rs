// ABOUTME: Integration tests for the concurrent prober.
// ABOUTME: Exercises failure absorption and bounded waits without a live honeypot.

use apiary::probe::{ProbePolicy, Prober};
use apiary::ssh::KnownHosts;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

fn prober(timeout: Duration) -> Prober {
    Prober::new(ProbePolicy {
        user: "richard".to_string(),
        password: "hunter2".to_string(),
        known_hosts: Arc::new(KnownHosts::default()),
        timeout,
    })
}

/// Bind and immediately release an ephemeral port, leaving it closed.
async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn empty_host_list_yields_an_empty_result_set() {
    let results = prober(Duration::from_secs(1)).run(&[], 22).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn refused_connection_is_recorded_unreachable() {
    let port = closed_port().await;
    let hosts = vec!["127.0.0.1".to_string()];

    let results = prober(Duration::from_secs(2)).run(&hosts, port).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results["127.0.0.1"], false);
}

#[tokio::test]
async fn server_closing_mid_handshake_does_not_abort_the_batch() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    // accept and immediately drop every connection
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });

    let hosts = vec!["127.0.0.1".to_string()];
    let results = prober(Duration::from_secs(2)).run(&hosts, port).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results["127.0.0.1"], false);
}

#[tokio::test]
async fn every_host_gets_exactly_one_entry() {
    let port = closed_port().await;
    let hosts = vec![
        "127.0.0.1".to_string(),
        "127.0.0.2".to_string(),
        "127.0.0.3".to_string(),
    ];

    let results = prober(Duration::from_secs(2)).run(&hosts, port).await;

    assert_eq!(results.len(), 3);
    for host in &hosts {
        assert_eq!(results[host], false);
    }
}

#[tokio::test]
async fn duplicate_hosts_collapse_to_one_entry() {
    let port = closed_port().await;
    let hosts = vec!["127.0.0.1".to_string(), "127.0.0.1".to_string()];

    let results = prober(Duration::from_secs(2)).run(&hosts, port).await;

    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn silent_server_is_cut_off_by_the_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    // accept the connection but never speak SSH
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let hosts = vec!["127.0.0.1".to_string()];
    let started = Instant::now();
    let results = prober(Duration::from_secs(1)).run(&hosts, port).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(results["127.0.0.1"], false);
}
