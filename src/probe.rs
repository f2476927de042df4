// ABOUTME: Concurrent liveness probing of the honeypot fleet.
// ABOUTME: Fans out one task per host, fans results back in over a channel.

use crate::config::Config;
use crate::error::Result;
use crate::ssh::{self, KnownHosts, Session, SessionConfig};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Reachability per probed host.
pub type ResultSet = HashMap<String, bool>;

/// Shared connection policy for one probe run.
///
/// Built once from configuration and shared read-only by every
/// concurrent probe task.
#[derive(Debug, Clone)]
pub struct ProbePolicy {
    pub user: String,
    pub password: String,
    pub known_hosts: Arc<KnownHosts>,
    pub timeout: Duration,
}

impl ProbePolicy {
    /// Build the policy, loading the known hosts store from disk.
    ///
    /// A store that cannot be read or parsed fails the whole run before
    /// a single probe is attempted.
    pub fn from_config(config: &Config) -> Result<Self> {
        let known_hosts = KnownHosts::load(&config.known_hosts_path)?;
        tracing::debug!("loaded {} known host entries", known_hosts.len());

        Ok(Self {
            user: config.cowrie.user.clone(),
            password: config.cowrie.password.clone(),
            known_hosts: Arc::new(known_hosts),
            timeout: config.cowrie.timeout,
        })
    }
}

/// Probes every configured host concurrently.
pub struct Prober {
    policy: Arc<ProbePolicy>,
}

impl Prober {
    pub fn new(policy: ProbePolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    /// Attempt an authenticated handshake against each host on `port`.
    ///
    /// One task per host; a failing host is recorded as unreachable and
    /// never aborts the batch. Returns once every host has reported.
    /// Duplicate hosts collapse to a single entry.
    pub async fn run(&self, hosts: &[String], port: u16) -> ResultSet {
        let (tx, mut rx) = mpsc::channel(hosts.len().max(1));

        for host in hosts {
            let host = host.clone();
            let policy = Arc::clone(&self.policy);
            let tx = tx.clone();

            tokio::spawn(async move {
                let up = probe_host(&host, port, &policy).await;
                // the collector outlives every sender, so a send only
                // fails if the whole run was dropped
                let _ = tx.send((host, up)).await;
            });
        }
        drop(tx);

        let mut results = ResultSet::new();
        while let Some((host, up)) = rx.recv().await {
            results.insert(host, up);
        }
        results
    }
}

/// Probe one host, absorbing any failure into the boolean.
async fn probe_host(host: &str, port: u16, policy: &ProbePolicy) -> bool {
    match try_handshake(host, port, policy).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("couldn't connect to host {}:{}: {}", host, port, e);
            false
        }
    }
}

async fn try_handshake(host: &str, port: u16, policy: &ProbePolicy) -> ssh::Result<()> {
    let config = SessionConfig::new(
        host,
        policy.user.as_str(),
        policy.password.as_str(),
        Arc::clone(&policy.known_hosts),
    )
    .port(port)
    .timeout(policy.timeout);

    let session = Session::connect(config).await?;

    // reachable as soon as the handshake completes; the session itself
    // is of no further use
    if let Err(e) = session.disconnect().await {
        tracing::debug!("disconnect from {}:{} failed: {}", host, port, e);
    }
    Ok(())
}
