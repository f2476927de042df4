// ABOUTME: SSH-specific error types.
// ABOUTME: Covers connection, authentication, and host key verification failures.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("authentication failed: server rejected password")]
    AuthenticationFailed,

    #[error("server key rejected by known hosts store")]
    HostKeyRejected,

    #[error("handshake did not complete within {0:?}")]
    HandshakeTimeout(Duration),

    #[error("SSH protocol error: {0}")]
    Protocol(#[from] russh::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
