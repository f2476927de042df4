// ABOUTME: Integration tests for result aggregation and the reporter.
// ABOUTME: Covers counts, status strings, JSON shape, and invariants.

use apiary::probe::ResultSet;
use apiary::report::{self, Reporter, STATUS_ACTIVE, STATUS_INACTIVE};
use proptest::prelude::*;
use serde_json::json;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[test]
fn empty_results_yield_an_empty_summary() {
    let summary = report::summarize(&ResultSet::new());
    assert_eq!(summary.active, 0);
    assert_eq!(summary.total, 0);
    assert!(summary.info.is_empty());
}

#[test]
fn mixed_batch_counts_only_reachable_hosts() {
    let results = ResultSet::from([
        ("a".to_string(), true),
        ("b".to_string(), false),
        ("c".to_string(), true),
    ]);

    let summary = report::summarize(&results);

    assert_eq!(summary.active, 2);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.info["a"], STATUS_ACTIVE);
    assert_eq!(summary.info["b"], STATUS_INACTIVE);
    assert_eq!(summary.info["c"], STATUS_ACTIVE);
}

#[test]
fn summary_serializes_to_the_reporting_shape() {
    let results = ResultSet::from([("hp1".to_string(), true), ("hp2".to_string(), false)]);

    let value = serde_json::to_value(report::summarize(&results)).unwrap();

    assert_eq!(
        value,
        json!({
            "Active": 1,
            "Total": 2,
            "Info": {
                "hp1": "cowrie active",
                "hp2": "cowrie not active",
            }
        })
    );
}

/// Write half of a shared buffer, so the test can read back what the
/// reporter emitted after handing over ownership.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn reporter_emits_one_json_line() {
    let buf = SharedBuf::default();
    let mut reporter = Reporter::new(Box::new(buf.clone()));

    let summary = report::summarize(&ResultSet::from([("hp1".to_string(), true)]));
    reporter.emit(&summary).unwrap();

    let written = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    assert!(written.ends_with('\n'));
    assert_eq!(written.lines().count(), 1);

    let value: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
    assert_eq!(value["Active"], 1);
    assert_eq!(value["Total"], 1);
}

proptest! {
    #[test]
    fn summary_invariants_hold(
        results in proptest::collection::hash_map("[a-z0-9.]{1,12}", any::<bool>(), 0..24)
    ) {
        let summary = report::summarize(&results);

        prop_assert_eq!(summary.total, results.len());
        prop_assert!(summary.active <= summary.total);
        prop_assert_eq!(summary.info.len(), results.len());

        for (host, up) in &results {
            let expected = if *up { STATUS_ACTIVE } else { STATUS_INACTIVE };
            prop_assert_eq!(&summary.info[host], expected);
        }
    }
}
