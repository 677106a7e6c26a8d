//! The `arsenal` binary.
//!
//! # Usage
//!
//! ```text
//! arsenal                      launch the terminal UI
//! arsenal run -- nmap -F host  run one command headless
//! arsenal tools scanning       list the catalog
//! arsenal doc sqlmap           print a tool's documentation
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use arsenal_core::cli::parse_args;
use arsenal_core::command::Command;
use arsenal_core::config::AppConfig;
use arsenal_core::exec::RunSession;
use arsenal_core::help::help_text;
use arsenal_core::tools::{documentation, Category, ToolRegistry};
use arsenal_tui::tui::{now_ms, Tui};


fn main() {
    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    let cmd = match parse_args(&arg_refs) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("arsenal: {}", e);
            process::exit(1);
        }
    };

    match cmd {
        Command::Tui => run_tui(),
        Command::Run {
            command,
            cwd,
            report,
        } => {
            let code = run_headless(&command, cwd.as_deref(), report.as_deref());
            process::exit(code);
        }
        Command::ToolList { category, format } => {
            if let Err(e) = list_tools(category.as_deref(), format.as_deref()) {
                eprintln!("arsenal: {}", e);
                process::exit(1);
            }
        }
        Command::ToolDoc { name } => {
            let registry = ToolRegistry::standard();
            match registry.find(&name) {
                Some(tool) => println!("{}", documentation(tool)),
                None => {
                    eprintln!("arsenal: no tool named '{}'", name);
                    process::exit(1);
                }
            }
        }
        Command::Help { topic } => print!("{}", help_text(topic.as_deref())),
        Command::Version => println!("arsenal {}", env!("CARGO_PKG_VERSION")),
    }
}


fn load_config() -> AppConfig {
    match AppConfig::load_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("arsenal: {}", e);
            process::exit(1);
        }
    }
}

fn run_tui() {
    let config = load_config();
    match Tui::new(&config) {
        Ok(mut tui) => {
            if let Err(e) = tui.run() {
                eprintln!("arsenal tui: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("arsenal tui: failed to start: {}", e);
            process::exit(1);
        }
    }
}


// ---------------------------------------------------------------------------
// Headless run
// ---------------------------------------------------------------------------

/// Drive the streaming pipeline without a UI: drain on the configured
/// cadence, print new lines as they land, exit with the child's code.
fn run_headless(command: &str, cwd: Option<&str>, report: Option<&str>) -> i32 {
    let config = load_config();
    let mut session = RunSession::configured(&config);

    if let Some(path) = report {
        let path = PathBuf::from(path);
        session.subscribe_finished(move |outcome| {
            if let Err(e) = std::fs::write(&path, outcome.report_text()) {
                eprintln!("arsenal: failed to write report: {}", e);
            }
        });
    }

    if let Err(e) = session.start(command, cwd.map(Path::new), now_ms()) {
        eprintln!("arsenal: {}", e);
        return 1;
    }

    let mut printed = 0;
    loop {
        std::thread::sleep(config.tick());
        let outcome = session.drain(now_ms());

        let lines = session.lines();
        for line in &lines[printed..] {
            print!("{}", line.text);
        }
        printed = lines.len();
        let _ = std::io::stdout().flush();

        if let Some(run) = outcome.finished {
            return exit_status(run.exit_code);
        }
        if outcome.error.is_some() {
            return 1;
        }
    }
}

/// Shell convention: signal deaths map to 128 + signal.
fn exit_status(code: i32) -> i32 {
    if code >= 0 {
        code
    } else {
        128 - code
    }
}


// ---------------------------------------------------------------------------
// Tool listing
// ---------------------------------------------------------------------------

fn list_tools(category: Option<&str>, format: Option<&str>) -> Result<(), String> {
    let registry = ToolRegistry::standard();
    let filter = match category {
        Some(text) => Some(
            Category::parse(text).ok_or_else(|| format!("unknown category '{}'", text))?,
        ),
        None => None,
    };

    if format == Some("json") {
        let meta = registry.meta(filter);
        let json = serde_json::to_string_pretty(&meta).map_err(|e| e.to_string())?;
        println!("{}", json);
        return Ok(());
    }
    if let Some(other) = format {
        if other != "text" {
            return Err(format!("unknown format '{}'", other));
        }
    }

    for cat in registry.categories() {
        if filter.is_some() && filter != Some(cat) {
            continue;
        }
        println!("{}", cat.label());
        for tool in registry.by_category(cat) {
            let mut tags = vec![tool.risk_level().label().to_string()];
            if tool.requires_root() {
                tags.push("root".to_string());
            }
            println!(
                "  {:<14} {} [{}]",
                tool.name(),
                tool.description(),
                tags.join(", "),
            );
        }
        println!();
    }
    Ok(())
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_status_passthrough_for_real_codes() {
        assert_eq!(exit_status(0), 0);
        assert_eq!(exit_status(3), 3);
        assert_eq!(exit_status(255), 255);
    }

    #[test]
    fn exit_status_maps_signals() {
        assert_eq!(exit_status(-15), 143); // SIGTERM
        assert_eq!(exit_status(-9), 137); // SIGKILL
    }

    #[test]
    fn headless_run_exits_with_child_code() {
        std::env::set_var("ARSENAL_CONFIG", "/nonexistent/arsenal.yaml");
        assert_eq!(run_headless("exit 5", None, None), 5);
        assert_eq!(run_headless("true", None, None), 0);
        std::env::remove_var("ARSENAL_CONFIG");
    }

    #[test]
    fn headless_run_writes_report() {
        std::env::set_var("ARSENAL_CONFIG", "/nonexistent/arsenal.yaml");
        let path = std::env::temp_dir().join("arsenal-cli-report-test.txt");
        let _ = std::fs::remove_file(&path);

        let code = run_headless("printf 'hi\\n'", None, Some(path.to_str().unwrap()));
        assert_eq!(code, 0);
        let report = std::fs::read_to_string(&path).unwrap();
        assert!(report.contains("command: printf 'hi\\n'"));
        assert!(report.contains("exit code: 0"));
        assert!(report.contains("hi\n"));
        let _ = std::fs::remove_file(&path);
        std::env::remove_var("ARSENAL_CONFIG");
    }

    #[test]
    fn list_tools_rejects_unknown_category() {
        assert!(list_tools(Some("bogus"), None).is_err());
        assert!(list_tools(Some("recon"), None).is_ok());
    }

    #[test]
    fn list_tools_rejects_unknown_format() {
        assert!(list_tools(None, Some("xml")).is_err());
        assert!(list_tools(None, Some("json")).is_ok());
    }
}
