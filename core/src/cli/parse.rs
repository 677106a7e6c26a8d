//! CLI argument parsing.

use crate::command::Command;


/// Parse CLI arguments into a typed [`Command`].
///
/// `args` is expected WITHOUT the program name. No arguments means the
/// terminal UI.
pub fn parse_args(args: &[&str]) -> Result<Command, String> {
    if args.is_empty() {
        return Ok(Command::Tui);
    }

    match args[0] {
        "tui" => Ok(Command::Tui),
        "run" => parse_run(args),
        "tools" => parse_tools(args),
        "doc" => parse_doc(args),
        "help" | "--help" | "-h" => parse_help(args),
        "version" | "--version" | "-V" => Ok(Command::Version),
        other => Err(format!(
            "Unknown command: '{}'. Run 'arsenal help' for usage.",
            other
        )),
    }
}


// ---------------------------------------------------------------------------
// Sub-parsers
// ---------------------------------------------------------------------------

/// `arsenal run [--cwd <dir>] [--report <path>] [--] <command...>`
fn parse_run(args: &[&str]) -> Result<Command, String> {
    let mut cwd = None;
    let mut report = None;
    let mut words: Vec<&str> = Vec::new();

    let rest = &args[1..];
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            "--cwd" if words.is_empty() => {
                i += 1;
                cwd = Some(take_arg(rest, i, "--cwd")?);
            }
            "--report" if words.is_empty() => {
                i += 1;
                report = Some(take_arg(rest, i, "--report")?);
            }
            "--" if words.is_empty() => {}
            word => words.push(word),
        }
        i += 1;
    }

    if words.is_empty() {
        return Err("Usage: arsenal run [--cwd <dir>] [--report <path>] <command...>".into());
    }
    Ok(Command::Run {
        command: words.join(" "),
        cwd,
        report,
    })
}

/// `arsenal tools [category] [--format json]`
fn parse_tools(args: &[&str]) -> Result<Command, String> {
    let mut category = None;
    let mut format = None;

    let rest = &args[1..];
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            "--format" => {
                i += 1;
                format = Some(take_arg(rest, i, "--format")?);
            }
            other if category.is_none() => category = Some(other.to_string()),
            other => return Err(format!("Unexpected argument for tools: '{}'", other)),
        }
        i += 1;
    }
    Ok(Command::ToolList { category, format })
}

/// `arsenal doc <tool>`
fn parse_doc(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("Usage: arsenal doc <tool>".into());
    }
    Ok(Command::ToolDoc {
        name: args[1].into(),
    })
}

/// `arsenal help [topic]`
fn parse_help(args: &[&str]) -> Result<Command, String> {
    let topic = if args.len() > 1 {
        Some(args[1..].join(" "))
    } else {
        None
    };
    Ok(Command::Help { topic })
}

fn take_arg(args: &[&str], index: usize, flag: &str) -> Result<String, String> {
    args.get(index)
        .map(|s| s.to_string())
        .ok_or_else(|| format!("Missing value for {}", flag))
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_is_tui() {
        assert_eq!(parse_args(&[]), Ok(Command::Tui));
        assert_eq!(parse_args(&["tui"]), Ok(Command::Tui));
    }

    #[test]
    fn run_joins_command_words() {
        let cmd = parse_args(&["run", "nmap", "-F", "10.0.0.1"]).unwrap();
        assert_eq!(
            cmd,
            Command::Run {
                command: "nmap -F 10.0.0.1".into(),
                cwd: None,
                report: None,
            }
        );
    }

    #[test]
    fn run_with_cwd_and_report() {
        let cmd = parse_args(&[
            "run", "--cwd", "/tmp", "--report", "out.txt", "--", "echo", "hi",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run {
                command: "echo hi".into(),
                cwd: Some("/tmp".into()),
                report: Some("out.txt".into()),
            }
        );
    }

    #[test]
    fn run_flags_after_command_belong_to_command() {
        let cmd = parse_args(&["run", "ls", "--cwd"]).unwrap();
        assert_eq!(
            cmd,
            Command::Run {
                command: "ls --cwd".into(),
                cwd: None,
                report: None,
            }
        );
    }

    #[test]
    fn run_without_command_is_usage_error() {
        let err = parse_args(&["run"]).unwrap_err();
        assert!(err.contains("Usage: arsenal run"));
        assert!(parse_args(&["run", "--cwd", "/tmp"]).is_err());
    }

    #[test]
    fn run_missing_flag_value() {
        let err = parse_args(&["run", "--cwd"]).unwrap_err();
        assert!(err.contains("--cwd"));
    }

    #[test]
    fn tools_plain_and_with_category() {
        assert_eq!(
            parse_args(&["tools"]),
            Ok(Command::ToolList {
                category: None,
                format: None,
            })
        );
        assert_eq!(
            parse_args(&["tools", "scanning"]),
            Ok(Command::ToolList {
                category: Some("scanning".into()),
                format: None,
            })
        );
    }

    #[test]
    fn tools_with_format() {
        assert_eq!(
            parse_args(&["tools", "recon", "--format", "json"]),
            Ok(Command::ToolList {
                category: Some("recon".into()),
                format: Some("json".into()),
            })
        );
    }

    #[test]
    fn tools_rejects_second_positional() {
        assert!(parse_args(&["tools", "recon", "extra"]).is_err());
    }

    #[test]
    fn doc_requires_name() {
        assert!(parse_args(&["doc"]).is_err());
        assert_eq!(
            parse_args(&["doc", "nmap"]),
            Ok(Command::ToolDoc {
                name: "nmap".into()
            })
        );
    }

    #[test]
    fn help_variants() {
        assert_eq!(parse_args(&["help"]), Ok(Command::Help { topic: None }));
        assert_eq!(parse_args(&["--help"]), Ok(Command::Help { topic: None }));
        assert_eq!(
            parse_args(&["help", "run"]),
            Ok(Command::Help {
                topic: Some("run".into())
            })
        );
    }

    #[test]
    fn version_variants() {
        assert_eq!(parse_args(&["version"]), Ok(Command::Version));
        assert_eq!(parse_args(&["--version"]), Ok(Command::Version));
        assert_eq!(parse_args(&["-V"]), Ok(Command::Version));
    }

    #[test]
    fn unknown_command_is_error() {
        let err = parse_args(&["frobnicate"]).unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
