//! Run history: a bounded record of completed invocations and the
//! plain-text session report built from them.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::exec::sink::RunOutcome;


/// One completed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub command: String,
    /// Exit code; `None` when the invocation died on an error event.
    pub exit_code: Option<i32>,
    pub started_ms: u64,
    pub finished_ms: u64,
    pub line_count: usize,
}

impl RunRecord {
    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        RunRecord {
            command: outcome.command.clone(),
            exit_code: Some(outcome.exit_code),
            started_ms: outcome.started_ms,
            finished_ms: outcome.finished_ms,
            line_count: outcome.line_count,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.finished_ms.saturating_sub(self.started_ms)
    }

    /// One-line summary for listings.
    pub fn summary(&self) -> String {
        let status = match self.exit_code {
            Some(0) => "ok".to_string(),
            Some(code) => format!("exit {}", code),
            None => "error".to_string(),
        };
        format!(
            "{} ({}, {} lines, {} ms)",
            self.command,
            status,
            self.line_count,
            self.duration_ms(),
        )
    }
}


/// Bounded history of run records, oldest evicted first.
pub struct RunHistory {
    records: Vec<RunRecord>,
    max_entries: usize,
}

impl RunHistory {
    pub fn new(max_entries: usize) -> Self {
        RunHistory {
            records: Vec::new(),
            max_entries,
        }
    }

    pub fn push(&mut self, record: RunRecord) {
        self.records.push(record);
        while self.records.len() > self.max_entries {
            self.records.remove(0);
        }
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&RunRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Plain-text session report, one line per run.
    pub fn report_text(&self) -> String {
        let mut text = format!("arsenal session report ({} runs)\n\n", self.records.len());
        for (index, record) in self.records.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", index + 1, record.summary()));
        }
        text
    }

    /// Write the session report to a file. Failures go to the caller.
    pub fn save_report(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.report_text())
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(command: &str, code: i32) -> RunRecord {
        RunRecord {
            command: command.into(),
            exit_code: Some(code),
            started_ms: 1000,
            finished_ms: 1400,
            line_count: 3,
        }
    }

    #[test]
    fn push_and_last() {
        let mut history = RunHistory::new(10);
        assert!(history.is_empty());
        history.push(record("echo one", 0));
        history.push(record("echo two", 1));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().command, "echo two");
    }

    #[test]
    fn bounded_eviction_drops_oldest() {
        let mut history = RunHistory::new(2);
        history.push(record("a", 0));
        history.push(record("b", 0));
        history.push(record("c", 0));
        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].command, "b");
        assert_eq!(history.records()[1].command, "c");
    }

    #[test]
    fn summary_formats_by_status() {
        assert!(record("x", 0).summary().contains("(ok,"));
        assert!(record("x", 3).summary().contains("(exit 3,"));
        let errored = RunRecord {
            exit_code: None,
            ..record("x", 0)
        };
        assert!(errored.summary().contains("(error,"));
    }

    #[test]
    fn from_outcome_copies_fields() {
        let outcome = RunOutcome {
            command: "printf x".into(),
            exit_code: -15,
            started_ms: 10,
            finished_ms: 250,
            line_count: 1,
            log: String::new(),
        };
        let record = RunRecord::from_outcome(&outcome);
        assert_eq!(record.command, "printf x");
        assert_eq!(record.exit_code, Some(-15));
        assert_eq!(record.duration_ms(), 240);
        assert_eq!(record.line_count, 1);
    }

    #[test]
    fn report_text_numbers_runs() {
        let mut history = RunHistory::new(10);
        history.push(record("echo one", 0));
        history.push(record("false", 1));
        let report = history.report_text();
        assert!(report.starts_with("arsenal session report (2 runs)"));
        assert!(report.contains("1. echo one"));
        assert!(report.contains("2. false (exit 1"));
    }

    #[test]
    fn save_report_round_trips() {
        let mut history = RunHistory::new(10);
        history.push(record("echo hi", 0));
        let path = std::env::temp_dir().join("arsenal-history-report-test.txt");
        history.save_report(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, history.report_text());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn record_serde_round_trip() {
        let original = record("nmap -F host", 0);
        let json = serde_json::to_string(&original).unwrap();
        let back: RunRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
