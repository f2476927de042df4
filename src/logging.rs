// ABOUTME: File-backed log sink and tracing subscriber setup.
// ABOUTME: One owned sink is shared between tracing and the reporter.

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Clonable append-only handle on the run's log file.
///
/// Diagnostic output goes through a sink that is handed explicitly to
/// whoever writes, rather than living in hidden global state.
#[derive(Debug, Clone)]
pub struct LogSink {
    file: Arc<File>,
}

impl LogSink {
    /// Open (or create) the log file in append mode.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| Error::LogFile {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            file: Arc::new(file),
        })
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self.file).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self.file).flush()
    }
}

/// Install the global tracing subscriber writing through `sink`.
pub fn init(sink: LogSink, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .init();
}
