//! Command runner: child-process lifecycle and output streaming.
//!
//! [`CommandRunner`] executes one shell command at a time. `start` spawns
//! `sh -c <command>` and a dedicated background thread that reads the
//! combined stdout/stderr line-by-line, pushing one event per line onto
//! the channel, then a single terminal event after end-of-stream and
//! process exit. All blocking I/O happens on the background thread; the
//! UI thread only ever signals or polls.
//!
//! Failures inside the background thread are converted into `Error`
//! events at the boundary. They never propagate as panics or raw errors
//! into the caller's thread.

use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::exec::event::OutputEvent;


/// Default grace period between SIGTERM and the SIGKILL escalation.
pub const DEFAULT_STOP_GRACE: Duration = Duration::from_millis(5000);


// ---------------------------------------------------------------------------
// EventSender
// ---------------------------------------------------------------------------

/// Producer handle for the event channel. Cloneable; sends never block.
///
/// Send failures (the sink was dropped) are ignored: a producer with no
/// consumer has nothing useful left to report.
#[derive(Clone)]
pub struct EventSender {
    tx: Sender<OutputEvent>,
}

impl EventSender {
    pub(crate) fn new(tx: Sender<OutputEvent>) -> Self {
        EventSender { tx }
    }

    pub fn line(&self, text: String) {
        let _ = self.tx.send(OutputEvent::Line { text });
    }

    pub fn completed(&self, code: i32) {
        let _ = self.tx.send(OutputEvent::Completed { code });
    }

    pub fn error(&self, message: String) {
        let _ = self.tx.send(OutputEvent::Error { message });
    }
}


// ---------------------------------------------------------------------------
// StartError
// ---------------------------------------------------------------------------

/// Why `start` refused to launch a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    /// An invocation is already active on this runner. One command at a
    /// time; the caller must wait for the terminal event.
    AlreadyRunning,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::AlreadyRunning => {
                write!(f, "a command is already running")
            }
        }
    }
}

impl std::error::Error for StartError {}


// ---------------------------------------------------------------------------
// CommandRunner
// ---------------------------------------------------------------------------

/// Executes one shell command at a time, streaming output as events.
pub struct CommandRunner {
    events: EventSender,
    shell: String,
    stop_grace: Duration,
    /// True from `start` until the background thread has enqueued the
    /// terminal event. Guards against concurrent invocations.
    active: Arc<AtomicBool>,
    /// Pid of the current child, 0 when none. Written by the background
    /// thread after spawn, read by `stop`.
    current_pid: Arc<AtomicU32>,
    reader: Option<thread::JoinHandle<()>>,
}

impl CommandRunner {
    /// Create a runner producing into `events`, with the default shell
    /// and stop grace period.
    pub fn new(events: EventSender) -> Self {
        CommandRunner {
            events,
            shell: "sh".to_string(),
            stop_grace: DEFAULT_STOP_GRACE,
            active: Arc::new(AtomicBool::new(false)),
            current_pid: Arc::new(AtomicU32::new(0)),
            reader: None,
        }
    }

    /// Override the shell binary used for `sh -c` invocation.
    pub fn with_shell(mut self, shell: &str) -> Self {
        self.shell = shell.to_string();
        self
    }

    /// Override the SIGTERM-to-SIGKILL grace period.
    pub fn with_stop_grace(mut self, grace: Duration) -> Self {
        self.stop_grace = grace;
        self
    }

    /// Whether an invocation is currently active.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Start `command` as a child process, streaming its combined output.
    ///
    /// Rejects with [`StartError::AlreadyRunning`] if an invocation is
    /// active; the existing invocation and its event stream are left
    /// untouched. Spawn failures are reported asynchronously as an
    /// `Error` event, not as a return value.
    pub fn start(
        &mut self,
        command: &str,
        working_dir: Option<&Path>,
    ) -> Result<(), StartError> {
        // The swap is the admission gate: exactly one caller can flip
        // false -> true.
        if self.active.swap(true, Ordering::SeqCst) {
            return Err(StartError::AlreadyRunning);
        }

        // The previous thread (if any) has finished: active was false,
        // and the flag is only cleared after the thread's last event.
        if let Some(handle) = self.reader.take() {
            let _ = handle.join();
        }

        let events = self.events.clone();
        let active = Arc::clone(&self.active);
        let pid_slot = Arc::clone(&self.current_pid);
        let shell = self.shell.clone();
        let command = command.to_string();
        let cwd: Option<PathBuf> = working_dir.map(Path::to_path_buf);

        let handle = thread::spawn(move || {
            run_invocation(&shell, &command, cwd.as_deref(), &events, &pid_slot);
            pid_slot.store(0, Ordering::SeqCst);
            active.store(false, Ordering::SeqCst);
        });
        self.reader = Some(handle);
        Ok(())
    }

    /// Request termination of the active invocation. Best-effort and
    /// non-blocking: sends SIGTERM, then a detached watchdog sends
    /// SIGKILL if the same process is still alive after the grace
    /// period. Returns whether a signal was delivered.
    ///
    /// Does not emit a terminal event and does not change status; the
    /// `Completed`/`Error` event still arrives from the background
    /// thread once the process actually exits.
    pub fn stop(&self) -> bool {
        if !self.active.load(Ordering::SeqCst) {
            return false;
        }
        let pid = self.current_pid.load(Ordering::SeqCst);
        if pid == 0 {
            // Spawn still in flight; nothing to signal yet.
            return false;
        }
        terminate(pid);

        let active = Arc::clone(&self.active);
        let pid_slot = Arc::clone(&self.current_pid);
        let grace = self.stop_grace;
        thread::spawn(move || {
            thread::sleep(grace);
            // Only escalate while the same invocation is still alive.
            if active.load(Ordering::SeqCst) && pid_slot.load(Ordering::SeqCst) == pid {
                force_kill(pid);
            }
        });
        true
    }
}

impl Drop for CommandRunner {
    fn drop(&mut self) {
        // Best-effort: do not leave the child running past the runner.
        if self.is_active() {
            let pid = self.current_pid.load(Ordering::SeqCst);
            if pid != 0 {
                force_kill(pid);
            }
        }
    }
}


// ---------------------------------------------------------------------------
// Background invocation
// ---------------------------------------------------------------------------

/// The body of the background execution thread: spawn, stream, wait.
/// Every failure path funnels into exactly one `Error` event; every
/// success path into exactly one `Completed` event.
fn run_invocation(
    shell: &str,
    command: &str,
    cwd: Option<&Path>,
    events: &EventSender,
    pid_slot: &Arc<AtomicU32>,
) {
    let mut cmd = Command::new(shell);
    cmd.arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            events.error(format!("failed to spawn '{}': {}", command, e));
            return;
        }
    };
    pid_slot.store(child.id(), Ordering::SeqCst);

    // Stderr is read on a helper thread so neither pipe can fill up and
    // stall the other. Per-stream line order is preserved.
    let stderr_reader = child.stderr.take().map(|pipe| {
        let events = events.clone();
        thread::spawn(move || read_lines(pipe, &events))
    });

    let stdout_result = match child.stdout.take() {
        Some(pipe) => read_lines(pipe, events),
        None => Ok(()),
    };
    let stderr_result = match stderr_reader {
        Some(handle) => handle
            .join()
            .unwrap_or_else(|_| Err("stderr reader thread panicked".to_string())),
        None => Ok(()),
    };

    if let Err(message) = stdout_result.and(stderr_result) {
        // The invocation is considered terminated without an exit code.
        // Reap the child so no zombie outlives the error report.
        let _ = child.kill();
        let _ = child.wait();
        events.error(message);
        return;
    }

    match child.wait() {
        Ok(status) => events.completed(exit_code_of(status)),
        Err(e) => events.error(format!("failed to wait for process: {}", e)),
    }
}

/// Read a pipe line-by-line until end-of-stream, emitting one `Line`
/// event per line. Invalid UTF-8 is replaced, not fatal.
fn read_lines(pipe: impl Read, events: &EventSender) -> Result<(), String> {
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return Ok(()),
            Ok(_) => events.line(String::from_utf8_lossy(&buf).into_owned()),
            Err(e) => return Err(format!("output read failed: {}", e)),
        }
    }
}

/// Map an exit status to the reported code: the real code when there is
/// one, `-(signal)` for signal deaths on Unix, `-1` otherwise.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}


// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

#[cfg(unix)]
fn terminate(pid: u32) {
    unsafe {
        libc::kill(pid as libc::pid_t, libc::SIGTERM);
    }
}

#[cfg(unix)]
fn force_kill(pid: u32) {
    unsafe {
        libc::kill(pid as libc::pid_t, libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn terminate(pid: u32) {
    let _ = Command::new("taskkill")
        .args(["/PID", &pid.to_string()])
        .status();
}

#[cfg(not(unix))]
fn force_kill(pid: u32) {
    let _ = Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/F"])
        .status();
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
