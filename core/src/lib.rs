//! Arsenal core: everything that does not touch a terminal.
//!
//! The centerpiece is [`exec`], the command-execution and
//! output-streaming pipeline: a runner that owns the child-process
//! lifecycle, a sink that owns the event queue and the rendered log,
//! and the session that wires them together. Around it sit the tool
//! catalog ([`tools`]), configuration ([`config`]), run history
//! ([`history`]), and the CLI command model ([`command`], [`cli`]).

pub mod cli;
pub mod command;
pub mod config;
pub mod exec;
pub mod help;
pub mod history;
pub mod tools;
