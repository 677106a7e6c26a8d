//! Output sink: buffered hand-off between the execution thread and the
//! UI thread, plus the rendered log.
//!
//! The sink owns the consumer end of the event channel and the visible
//! log buffer. `drain` is called on a fixed cadence from the UI thread;
//! it pops everything currently available without blocking and applies
//! it to the log. The channel is the only structure shared across the
//! thread boundary; the log buffer is touched by the UI thread alone.

use std::io;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::exec::event::{LineStyle, OutputEvent, RunStatus, StyledLine};
use crate::exec::runner::EventSender;


// ---------------------------------------------------------------------------
// RunOutcome
// ---------------------------------------------------------------------------

/// What a finished invocation amounted to. Handed to finished-subscribers
/// and returned from the drain that processed the terminal event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// The command string as started.
    pub command: String,
    /// Exit code of the process (negative for signal deaths on Unix).
    pub exit_code: i32,
    /// When the invocation started (ms since epoch, caller-supplied).
    pub started_ms: u64,
    /// When the terminal event was drained (ms since epoch).
    pub finished_ms: u64,
    /// Number of output lines drained for this invocation.
    pub line_count: usize,
    /// The full rendered log text at completion time.
    pub log: String,
}

impl RunOutcome {
    /// Plain-text report for the save-report collaborator.
    pub fn report_text(&self) -> String {
        format!(
            "command: {}\nexit code: {}\nduration: {} ms\n\n{}",
            self.command,
            self.exit_code,
            self.finished_ms.saturating_sub(self.started_ms),
            self.log,
        )
    }
}


// ---------------------------------------------------------------------------
// DrainOutcome
// ---------------------------------------------------------------------------

/// Summary of one drain cycle.
#[derive(Debug, Default)]
pub struct DrainOutcome {
    /// Number of events processed.
    pub handled: usize,
    /// Present when this cycle drained a `Completed` event.
    pub finished: Option<RunOutcome>,
    /// Present when this cycle drained an `Error` event.
    pub error: Option<String>,
}


// ---------------------------------------------------------------------------
// OutputSink
// ---------------------------------------------------------------------------

type FinishedHook = Box<dyn FnMut(&RunOutcome) + Send>;

/// Owns the event queue consumer and the displayed log buffer.
pub struct OutputSink {
    tx: Sender<OutputEvent>,
    rx: Receiver<OutputEvent>,
    lines: Vec<StyledLine>,
    status: RunStatus,
    /// Command and start time of the invocation being displayed.
    current: Option<(String, u64)>,
    /// Output lines drained for the current invocation.
    current_line_count: usize,
    last_exit: Option<i32>,
    finished_hooks: Vec<FinishedHook>,
}

impl OutputSink {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        OutputSink {
            tx,
            rx,
            lines: Vec::new(),
            status: RunStatus::Idle,
            current: None,
            current_line_count: 0,
            last_exit: None,
            finished_hooks: Vec::new(),
        }
    }

    /// Producer handle for a runner. May be cloned freely; sends are
    /// non-blocking.
    pub fn sender(&self) -> EventSender {
        EventSender::new(self.tx.clone())
    }

    /// Register a callback invoked with the outcome of every completed
    /// invocation (exit code and full log text included).
    pub fn subscribe_finished(&mut self, hook: impl FnMut(&RunOutcome) + Send + 'static) {
        self.finished_hooks.push(Box::new(hook));
    }

    /// Mark the start of an invocation: status goes `Running` and the
    /// command is echoed into the log with `Command` styling.
    pub fn begin(&mut self, command: &str, now_ms: u64) {
        self.status = RunStatus::Running;
        self.current = Some((command.to_string(), now_ms));
        self.current_line_count = 0;
        self.last_exit = None;
        self.push(LineStyle::Command, format!("$ {}\n", command));
    }

    /// Drain all currently available events and apply them to the log.
    /// Non-blocking; a call with an empty queue changes nothing.
    pub fn drain(&mut self, now_ms: u64) -> DrainOutcome {
        let mut outcome = DrainOutcome::default();
        while let Ok(event) = self.rx.try_recv() {
            outcome.handled += 1;
            match event {
                OutputEvent::Line { text } => {
                    self.current_line_count += 1;
                    self.push(LineStyle::Output, text);
                }
                OutputEvent::Completed { code } => {
                    self.status = RunStatus::Idle;
                    self.last_exit = Some(code);
                    if code == 0 {
                        self.push(
                            LineStyle::Success,
                            "\u{2713} Command completed successfully\n",
                        );
                    } else {
                        self.push(
                            LineStyle::Error,
                            format!("\u{2717} Command failed (exit code {})\n", code),
                        );
                    }
                    let (command, started_ms) =
                        self.current.take().unwrap_or((String::new(), now_ms));
                    let run = RunOutcome {
                        command,
                        exit_code: code,
                        started_ms,
                        finished_ms: now_ms,
                        line_count: self.current_line_count,
                        log: self.log_text(),
                    };
                    for hook in &mut self.finished_hooks {
                        hook(&run);
                    }
                    outcome.finished = Some(run);
                }
                OutputEvent::Error { message } => {
                    self.status = RunStatus::Idle;
                    self.current = None;
                    self.push(LineStyle::Error, format!("Error: {}\n", message));
                    outcome.error = Some(message);
                }
            }
        }
        outcome
    }

    /// Append a line directly (command echoes, termination warnings).
    pub fn push(&mut self, style: LineStyle, text: impl Into<String>) {
        self.lines.push(StyledLine::new(style, text));
    }

    /// Discard the rendered log. Does not affect an in-flight invocation.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Write the full log text verbatim to `path`. I/O failures are the
    /// caller's to handle.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.log_text())
    }

    /// The exact concatenation of all rendered line texts.
    pub fn log_text(&self) -> String {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Exit code of the most recently completed invocation.
    pub fn last_exit_code(&self) -> Option<i32> {
        self.last_exit
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::new()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn drain_on_empty_queue_changes_nothing() {
        let mut sink = OutputSink::new();
        sink.push(LineStyle::Output, "existing\n");
        let before = sink.log_text();

        let outcome = sink.drain(1000);
        assert_eq!(outcome.handled, 0);
        assert!(outcome.finished.is_none());
        assert!(outcome.error.is_none());
        assert_eq!(sink.log_text(), before);
        assert_eq!(sink.status(), RunStatus::Idle);
    }

    #[test]
    fn begin_echoes_command_and_sets_running() {
        let mut sink = OutputSink::new();
        sink.begin("nmap -F 10.0.0.1", 500);

        assert_eq!(sink.status(), RunStatus::Running);
        assert_eq!(sink.lines().len(), 1);
        assert_eq!(sink.lines()[0].style, LineStyle::Command);
        assert_eq!(sink.lines()[0].text, "$ nmap -F 10.0.0.1\n");
    }

    #[test]
    fn lines_drain_in_order_with_output_style() {
        let mut sink = OutputSink::new();
        let sender = sink.sender();
        sender.line("first\n".into());
        sender.line("second\n".into());

        let outcome = sink.drain(1000);
        assert_eq!(outcome.handled, 2);
        assert_eq!(sink.lines()[0].text, "first\n");
        assert_eq!(sink.lines()[1].text, "second\n");
        assert!(sink
            .lines()
            .iter()
            .all(|line| line.style == LineStyle::Output));
    }

    #[test]
    fn zero_exit_appends_success_marker() {
        let mut sink = OutputSink::new();
        sink.begin("true", 100);
        sink.sender().completed(0);

        sink.drain(200);
        let last = sink.lines().last().unwrap();
        assert_eq!(last.style, LineStyle::Success);
        assert!(last.text.contains("completed successfully"));
        assert_eq!(sink.status(), RunStatus::Idle);
        assert_eq!(sink.last_exit_code(), Some(0));
    }

    #[test]
    fn nonzero_exit_appends_failure_marker_with_code() {
        let mut sink = OutputSink::new();
        sink.begin("false", 100);
        sink.sender().completed(3);

        sink.drain(200);
        let last = sink.lines().last().unwrap();
        assert_eq!(last.style, LineStyle::Error);
        assert!(last.text.contains("exit code 3"));
    }

    #[test]
    fn error_event_appends_error_line_and_goes_idle() {
        let mut sink = OutputSink::new();
        sink.begin("broken", 100);
        sink.sender().error("no such binary".into());

        let outcome = sink.drain(200);
        assert_eq!(outcome.error.as_deref(), Some("no such binary"));
        let last = sink.lines().last().unwrap();
        assert_eq!(last.style, LineStyle::Error);
        assert_eq!(last.text, "Error: no such binary\n");
        assert_eq!(sink.status(), RunStatus::Idle);
        assert_eq!(sink.last_exit_code(), None);
    }

    #[test]
    fn finished_outcome_carries_command_and_counts() {
        let mut sink = OutputSink::new();
        sink.begin("printf x", 1000);
        let sender = sink.sender();
        sender.line("x\n".into());
        sender.completed(0);

        let outcome = sink.drain(1500);
        let run = outcome.finished.unwrap();
        assert_eq!(run.command, "printf x");
        assert_eq!(run.exit_code, 0);
        assert_eq!(run.started_ms, 1000);
        assert_eq!(run.finished_ms, 1500);
        assert_eq!(run.line_count, 1);
        assert!(run.log.contains("$ printf x\n"));
        assert!(run.log.contains("x\n"));
    }

    #[test]
    fn finished_subscribers_are_invoked() {
        let seen: Arc<Mutex<Vec<i32>>> = Arc::new(Mutex::new(Vec::new()));
        let mut sink = OutputSink::new();
        let hook_seen = Arc::clone(&seen);
        sink.subscribe_finished(move |run| {
            hook_seen.lock().unwrap().push(run.exit_code);
        });

        sink.begin("exit 2", 100);
        sink.sender().completed(2);
        sink.drain(200);

        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn clear_discards_log_only() {
        let mut sink = OutputSink::new();
        sink.begin("sleep 5", 100);
        sink.clear();

        assert!(sink.lines().is_empty());
        assert_eq!(sink.status(), RunStatus::Running);
    }

    #[test]
    fn save_writes_exact_log_text() {
        let mut sink = OutputSink::new();
        sink.push(LineStyle::Command, "$ echo hi\n");
        sink.push(LineStyle::Output, "hi\n");
        sink.push(LineStyle::Success, "\u{2713} done\n");

        let path = std::env::temp_dir().join("arsenal-sink-save-test.txt");
        sink.save(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "$ echo hi\nhi\n\u{2713} done\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_to_bad_path_reports_error() {
        let sink = OutputSink::new();
        let result = sink.save(Path::new("/nonexistent-dir/out.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn report_text_includes_command_and_log() {
        let run = RunOutcome {
            command: "echo hi".into(),
            exit_code: 0,
            started_ms: 1000,
            finished_ms: 1250,
            line_count: 1,
            log: "$ echo hi\nhi\n".into(),
        };
        let report = run.report_text();
        assert!(report.contains("command: echo hi"));
        assert!(report.contains("exit code: 0"));
        assert!(report.contains("duration: 250 ms"));
        assert!(report.ends_with("$ echo hi\nhi\n"));
    }
}
