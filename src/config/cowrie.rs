// ABOUTME: Cowrie fleet configuration: target hosts and shared credentials.
// ABOUTME: One credential set is reused across every honeypot in the fleet.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct CowrieConfig {
    /// Honeypots to probe. An empty list is a valid (if quiet) run.
    #[serde(default)]
    pub hosts: Vec<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    pub user: String,
    pub password: String,

    /// Upper bound for dial plus handshake, per host.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_port() -> u16 {
    22
}

fn default_timeout() -> Duration {
    Duration::from_secs(7)
}
