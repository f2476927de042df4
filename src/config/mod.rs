// ABOUTME: Configuration types and parsing for apiary.yml.
// ABOUTME: Handles YAML parsing and config file discovery.

mod cowrie;

pub use cowrie::CowrieConfig;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "apiary.yml";
pub const CONFIG_FILENAME_ALT: &str = "apiary.yaml";
pub const CONFIG_FILENAME_HOME: &str = ".apiary/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// SSH known_hosts file the probes verify server identities against.
    pub known_hosts_path: PathBuf,

    /// Append-only log file for diagnostics and the final summary.
    pub log_file: PathBuf,

    pub cowrie: CowrieConfig,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Look for a config file in `dir`, then under the invoking user's home.
    pub fn discover(dir: &Path) -> Result<Self> {
        let mut candidates = vec![dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];
        if let Ok(home) = env::var("HOME") {
            candidates.push(Path::new(&home).join(CONFIG_FILENAME_HOME));
        }

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }
}
