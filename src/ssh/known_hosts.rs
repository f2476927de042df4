// ABOUTME: Pre-loaded known_hosts store for server identity verification.
// ABOUTME: Parses the standard OpenSSH line format once per run.

use russh::keys::ssh_key::PublicKey;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read known hosts file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed known hosts entry at {path}:{line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// One known_hosts line: the hosts it names and the key they present.
#[derive(Debug, Clone)]
struct Entry {
    hosts: Vec<String>,
    key: PublicKey,
}

/// An in-memory snapshot of a known_hosts file.
///
/// Loaded once per run and shared read-only by every probe task.
#[derive(Debug, Clone, Default)]
pub struct KnownHosts {
    entries: Vec<Entry>,
}

impl KnownHosts {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut entries = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // @cert-authority / @revoked markers and hashed hostnames can
            // never match a plain hostname lookup.
            if line.starts_with('@') || line.starts_with("|1|") {
                tracing::debug!(
                    "skipping unsupported known_hosts entry at {}:{}",
                    path.display(),
                    idx + 1
                );
                continue;
            }

            let (hosts_field, key_text) =
                line.split_once(char::is_whitespace)
                    .ok_or_else(|| Error::Parse {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        reason: "expected `hostnames key-type base64-key`".to_string(),
                    })?;

            let key = PublicKey::from_openssh(key_text.trim()).map_err(|e| Error::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                reason: e.to_string(),
            })?;

            entries.push(Entry {
                hosts: hosts_field.split(',').map(str::to_string).collect(),
                key,
            });
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check a server key presented by `host:port` against the store.
    ///
    /// Keys are compared on key data, so a differing comment still matches.
    pub fn verify(&self, host: &str, port: u16, key: &PublicKey) -> bool {
        let wanted = lookup_name(host, port);
        self.entries
            .iter()
            .filter(|entry| entry.hosts.iter().any(|h| h == &wanted))
            .any(|entry| entry.key.key_data() == key.key_data())
    }
}

/// OpenSSH records non-standard ports as `[host]:port`.
fn lookup_name(host: &str, port: u16) -> String {
    if port == 22 {
        host.to_string()
    } else {
        format!("[{host}]:{port}")
    }
}
