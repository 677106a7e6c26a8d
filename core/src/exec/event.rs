//! Event and status types for the execution pipeline.
//!
//! An [`OutputEvent`] is the unit of hand-off between the background
//! execution thread (producer) and the UI-side drain step (consumer).
//! Events cross the thread boundary exactly once, in production order,
//! and the terminal `Completed`/`Error` event is always last for a
//! given invocation.

use serde::{Deserialize, Serialize};


// ---------------------------------------------------------------------------
// OutputEvent
// ---------------------------------------------------------------------------

/// One unit of captured output or a lifecycle signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputEvent {
    /// A single line of combined stdout/stderr, trailing newline included.
    Line { text: String },
    /// The process exited. Negative codes are signal deaths on Unix
    /// (`-15` for SIGTERM).
    Completed { code: i32 },
    /// Spawn or read failure. No `Completed` event follows.
    Error { message: String },
}

impl OutputEvent {
    /// Whether this event ends the invocation.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OutputEvent::Completed { .. } | OutputEvent::Error { .. }
        )
    }
}


// ---------------------------------------------------------------------------
// LineStyle / StyledLine
// ---------------------------------------------------------------------------

/// Categorical styling for a rendered log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    /// The echoed command line, emphasized.
    Command,
    /// Plain process output.
    Output,
    /// Errors and failure markers.
    Error,
    /// The success marker.
    Success,
    /// User-initiated termination notices.
    Warning,
}

/// A line of the visible log with its style. Text is stored verbatim,
/// newline included, so that saving the log reproduces it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledLine {
    pub style: LineStyle,
    pub text: String,
}

impl StyledLine {
    pub fn new(style: LineStyle, text: impl Into<String>) -> Self {
        StyledLine {
            style,
            text: text.into(),
        }
    }
}


// ---------------------------------------------------------------------------
// RunStatus
// ---------------------------------------------------------------------------

/// The execution status shown by the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Idle,
    Running,
}

impl RunStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, RunStatus::Running)
    }

    /// Short label for display.
    pub fn label(&self) -> &str {
        match self {
            RunStatus::Idle => "Idle",
            RunStatus::Running => "Running",
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
