//! Usage and topic help text for the CLI.

const GENERAL: &str = "\
arsenal - console for command-line security tools

Usage:
  arsenal [tui]                      launch the terminal UI
  arsenal run [options] <command..>  run one command headless
  arsenal tools [category]           list the tool catalog
  arsenal doc <tool>                 show a tool's documentation
  arsenal help [topic]               this text, or topic help
  arsenal version                    print the version

Topics: run, tools, tui
";

const RUN: &str = "\
arsenal run [--cwd <dir>] [--report <path>] [--] <command...>

Runs the command through the same streaming pipeline as the TUI
console and exits with the command's exit code. --report writes a
completion report (command, exit code, duration, full log) when the
run finishes.
";

const TOOLS: &str = "\
arsenal tools [category] [--format json]

Lists the catalog. Categories: recon, scanning, wireless, exploit,
forensics. Tools marked high or critical risk ask for confirmation
in the TUI before running.
";

const TUI: &str = "\
arsenal tui

Full-screen interface. Pick a category, fill in a tool's form, and
run it; output streams into the console view. Keys are listed on the
help screen (?).
";

/// Help text for a topic, or the general usage text.
pub fn help_text(topic: Option<&str>) -> String {
    match topic.map(str::trim) {
        Some("run") => RUN.to_string(),
        Some("tools") => TOOLS.to_string(),
        Some("tui") => TUI.to_string(),
        Some(other) => format!("No help for '{}'.\n\n{}", other, GENERAL),
        None => GENERAL.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_lists_subcommands() {
        let text = help_text(None);
        assert!(text.contains("arsenal run"));
        assert!(text.contains("arsenal tools"));
        assert!(text.contains("arsenal doc"));
    }

    #[test]
    fn topic_help() {
        assert!(help_text(Some("run")).contains("--report"));
        assert!(help_text(Some("tools")).contains("Categories"));
        assert!(help_text(Some("tui")).contains("console view"));
    }

    #[test]
    fn unknown_topic_falls_back() {
        let text = help_text(Some("bogus"));
        assert!(text.contains("No help for 'bogus'"));
        assert!(text.contains("arsenal run"));
    }
}
