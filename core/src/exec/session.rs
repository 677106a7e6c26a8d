//! Run session: a runner and a sink wired together.
//!
//! This is the handle the front-ends hold. Starting a command echoes it
//! into the log and flips the status; stopping appends the termination
//! warning. Everything else passes through to the two halves.

use std::io;
use std::path::Path;

use crate::config::AppConfig;
use crate::exec::event::{LineStyle, RunStatus, StyledLine};
use crate::exec::runner::{CommandRunner, StartError};
use crate::exec::sink::{DrainOutcome, OutputSink, RunOutcome};


/// One command invocation at a time: runner plus sink.
pub struct RunSession {
    runner: CommandRunner,
    sink: OutputSink,
}

impl RunSession {
    pub fn new() -> Self {
        let sink = OutputSink::new();
        let runner = CommandRunner::new(sink.sender());
        RunSession { runner, sink }
    }

    /// Build a session honoring the configured shell and stop grace.
    pub fn configured(config: &AppConfig) -> Self {
        let sink = OutputSink::new();
        let runner = CommandRunner::new(sink.sender())
            .with_shell(&config.shell)
            .with_stop_grace(config.stop_grace());
        RunSession { runner, sink }
    }

    /// Start a command. Rejects if an invocation is already active;
    /// nothing is echoed in that case.
    pub fn start(
        &mut self,
        command: &str,
        working_dir: Option<&Path>,
        now_ms: u64,
    ) -> Result<(), StartError> {
        self.runner.start(command, working_dir)?;
        self.sink.begin(command, now_ms);
        Ok(())
    }

    /// Request termination of the active invocation and append the
    /// warning marker. Returns whether a signal was delivered. The
    /// terminal event still arrives through the normal drain path.
    pub fn stop(&mut self) -> bool {
        if !self.runner.is_active() {
            return false;
        }
        let signalled = self.runner.stop();
        if signalled {
            self.sink
                .push(LineStyle::Warning, "\u{26a0} Command terminated by user\n");
        }
        signalled
    }

    pub fn drain(&mut self, now_ms: u64) -> DrainOutcome {
        self.sink.drain(now_ms)
    }

    pub fn is_active(&self) -> bool {
        self.runner.is_active()
    }

    pub fn status(&self) -> RunStatus {
        self.sink.status()
    }

    pub fn lines(&self) -> &[StyledLine] {
        self.sink.lines()
    }

    pub fn log_text(&self) -> String {
        self.sink.log_text()
    }

    pub fn clear(&mut self) {
        self.sink.clear();
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        self.sink.save(path)
    }

    pub fn subscribe_finished(&mut self, hook: impl FnMut(&RunOutcome) + Send + 'static) {
        self.sink.subscribe_finished(hook);
    }

    pub fn last_exit_code(&self) -> Option<i32> {
        self.sink.last_exit_code()
    }
}

impl Default for RunSession {
    fn default() -> Self {
        Self::new()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
