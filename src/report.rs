// ABOUTME: Result aggregation and summary reporting.
// ABOUTME: Turns a sealed result set into counts plus per-host status lines.

use crate::probe::ResultSet;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

pub const STATUS_ACTIVE: &str = "cowrie active";
pub const STATUS_INACTIVE: &str = "cowrie not active";

/// Counts and per-host status derived from one probe run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    #[serde(rename = "Active")]
    pub active: usize,
    #[serde(rename = "Total")]
    pub total: usize,
    #[serde(rename = "Info")]
    pub info: BTreeMap<String, String>,
}

/// Derive counts and status strings from a sealed result set.
pub fn summarize(results: &ResultSet) -> Summary {
    let active = results.values().filter(|up| **up).count();

    let info = results
        .iter()
        .map(|(host, up)| {
            let status = if *up { STATUS_ACTIVE } else { STATUS_INACTIVE };
            (host.clone(), status.to_string())
        })
        .collect();

    Summary {
        active,
        total: results.len(),
        info,
    }
}

/// Writes the end-of-run summary to an owned sink.
pub struct Reporter {
    sink: Box<dyn Write + Send>,
}

impl Reporter {
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self { sink }
    }

    /// Emit the summary as a single JSON line.
    pub fn emit(&mut self, summary: &Summary) -> io::Result<()> {
        let line = serde_json::to_string(summary)?;
        writeln!(self.sink, "{line}")?;
        self.sink.flush()
    }
}
