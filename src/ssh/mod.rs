// ABOUTME: SSH client module for honeypot liveness probes.
// ABOUTME: Password authentication with strict known_hosts verification.

mod client;
mod error;
pub mod known_hosts;

pub use client::{Session, SessionConfig};
pub use error::{Error, Result};
pub use known_hosts::KnownHosts;
