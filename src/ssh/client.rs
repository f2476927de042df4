// ABOUTME: SSH session management using russh.
// ABOUTME: Handles connection, password authentication, and teardown.

use super::error::{Error, Result};
use super::known_hosts::KnownHosts;
use russh::client::{self, Config, Handle};
use russh::keys::ssh_key;
use russh::{Disconnect, Preferred};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for establishing an SSH session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Remote host to connect to.
    pub host: String,
    /// SSH port (default: 22).
    pub port: u16,
    /// Username for password authentication.
    pub user: String,
    pub password: String,
    /// Server identities accepted during the handshake.
    pub known_hosts: Arc<KnownHosts>,
    /// Upper bound for dial, handshake, and authentication combined.
    pub timeout: Duration,
}

impl SessionConfig {
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        known_hosts: Arc<KnownHosts>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 22,
            user: user.into(),
            password: password.into(),
            known_hosts,
            timeout: Duration::from_secs(7),
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The fleet records only ed25519 identities, so nothing else is negotiated.
const HOST_KEY_ALGORITHMS: &[ssh_key::Algorithm] = &[ssh_key::Algorithm::Ed25519];

/// SSH client handler for russh.
pub(crate) struct SshHandler {
    host: String,
    port: u16,
    known_hosts: Arc<KnownHosts>,
}

impl client::Handler for SshHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &ssh_key::PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        let known = self
            .known_hosts
            .verify(&self.host, self.port, server_public_key);
        if !known {
            tracing::debug!(
                "rejecting unrecognized host key for {}:{}",
                self.host,
                self.port
            );
        }
        Ok(known)
    }
}

/// An established, authenticated SSH session.
pub struct Session {
    handle: Handle<SshHandler>,
}

impl Session {
    /// Connect and authenticate, bounded by `config.timeout`.
    pub async fn connect(config: SessionConfig) -> Result<Self> {
        let timeout = config.timeout;
        match tokio::time::timeout(timeout, Self::connect_inner(config)).await {
            Ok(result) => result,
            Err(_) => Err(Error::HandshakeTimeout(timeout)),
        }
    }

    async fn connect_inner(config: SessionConfig) -> Result<Self> {
        let russh_config = Config {
            inactivity_timeout: Some(Duration::from_secs(30)),
            preferred: Preferred {
                key: Cow::Borrowed(HOST_KEY_ALGORITHMS),
                ..Preferred::default()
            },
            ..Default::default()
        };

        let handler = SshHandler {
            host: config.host.clone(),
            port: config.port,
            known_hosts: Arc::clone(&config.known_hosts),
        };

        let mut session = client::connect(
            Arc::new(russh_config),
            (config.host.as_str(), config.port),
            handler,
        )
        .await
        .map_err(|e| match e {
            russh::Error::UnknownKey => Error::HostKeyRejected,
            e if e.to_string().contains("Connection refused") => Error::Connection(format!(
                "connection refused to {}:{}",
                config.host, config.port
            )),
            e => Error::Connection(e.to_string()),
        })?;

        let auth = session
            .authenticate_password(config.user, config.password)
            .await
            .map_err(Error::Protocol)?;
        if !auth.success() {
            return Err(Error::AuthenticationFailed);
        }

        Ok(Self { handle: session })
    }

    /// Disconnect the session.
    pub async fn disconnect(self) -> Result<()> {
        self.handle
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
            .map_err(Error::Protocol)?;
        Ok(())
    }
}
