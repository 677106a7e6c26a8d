//! The typed CLI command model.

/// A parsed invocation of the `arsenal` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the terminal UI (the default).
    Tui,
    /// Run one shell command headless, streaming output to stdout.
    Run {
        command: String,
        cwd: Option<String>,
        /// Write a completion report to this path when the run finishes.
        report: Option<String>,
    },
    /// List the tool catalog, optionally one category, optionally as JSON.
    ToolList {
        category: Option<String>,
        format: Option<String>,
    },
    /// Print the generated documentation for one tool.
    ToolDoc { name: String },
    Help { topic: Option<String> },
    Version,
}
