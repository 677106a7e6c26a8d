//! The tool capability interface.
//!
//! Each wrapped security tool implements [`ToolSpec`]: a pure mapping
//! from parameter values to a full shell command string, and from raw
//! output text to a structured [`ToolReport`]. No shared base state;
//! tools are stateless unit structs registered in the registry.

use serde::{Deserialize, Serialize};

use crate::tools::param::{validate, ParamSpec, ParamValues};


// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Tool category, mirroring the sidebar navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Reconnaissance,
    Scanning,
    Wireless,
    Exploitation,
    Forensics,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Reconnaissance,
        Category::Scanning,
        Category::Wireless,
        Category::Exploitation,
        Category::Forensics,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::Reconnaissance => "Reconnaissance",
            Category::Scanning => "Network Scanning",
            Category::Wireless => "Wireless Attacks",
            Category::Exploitation => "Exploitation",
            Category::Forensics => "Digital Forensics",
        }
    }

    pub fn blurb(&self) -> &str {
        match self {
            Category::Reconnaissance => "Information gathering and footprinting",
            Category::Scanning => "Port scanning and vulnerability detection",
            Category::Wireless => "WiFi security testing and analysis",
            Category::Exploitation => "Penetration testing frameworks",
            Category::Forensics => "Evidence collection and analysis",
        }
    }

    /// Parse a category from user input (label or keyword, any case).
    pub fn parse(text: &str) -> Option<Category> {
        let needle = text.trim().to_ascii_lowercase();
        match needle.as_str() {
            "recon" | "reconnaissance" => Some(Category::Reconnaissance),
            "scan" | "scanning" | "network scanning" => Some(Category::Scanning),
            "wireless" | "wifi" | "wireless attacks" => Some(Category::Wireless),
            "exploit" | "exploitation" => Some(Category::Exploitation),
            "forensics" | "digital forensics" => Some(Category::Forensics),
            _ => None,
        }
    }
}


// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// How much damage a tool can do when pointed at the wrong place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn label(&self) -> &str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// High-risk tools require explicit confirmation before running.
    pub fn needs_confirmation(&self) -> bool {
        *self >= RiskLevel::High
    }
}


// ---------------------------------------------------------------------------
// ToolReport
// ---------------------------------------------------------------------------

/// One extracted fact from tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub label: String,
    pub value: String,
}

impl Finding {
    pub fn new(label: &str, value: &str) -> Self {
        Finding {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Structured result of a tool run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolReport {
    pub tool: String,
    pub summary: String,
    pub findings: Vec<Finding>,
}

impl ToolReport {
    /// The fallback report: raw size summary, no findings.
    pub fn raw(tool: &str, output: &str) -> Self {
        ToolReport {
            tool: tool.to_string(),
            summary: format!("{} lines, {} bytes", output.lines().count(), output.len()),
            findings: Vec::new(),
        }
    }
}


// ---------------------------------------------------------------------------
// ToolSpec
// ---------------------------------------------------------------------------

/// A wrapped command-line security tool.
///
/// `build_command` must validate its inputs and render the complete
/// shell command string, quoting included; the runner executes the
/// string as-is and performs no escaping of its own.
pub trait ToolSpec: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn category(&self) -> Category;

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Low
    }

    /// Whether the tool needs root; `command_for` prefixes `sudo` when
    /// the current user is not root.
    fn requires_root(&self) -> bool {
        false
    }

    fn params(&self) -> Vec<ParamSpec>;

    fn build_command(&self, values: &ParamValues) -> Result<String, String>;

    fn parse_output(&self, output: &str) -> ToolReport {
        ToolReport::raw(self.name(), output)
    }
}


// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the final command string, prefixing `sudo` for root-requiring
/// tools when the effective user is not root.
pub fn command_for(tool: &dyn ToolSpec, values: &ParamValues) -> Result<String, String> {
    let command = tool.build_command(values)?;
    if tool.requires_root() && !is_root() {
        Ok(format!("sudo {}", command))
    } else {
        Ok(command)
    }
}

#[cfg(unix)]
fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn is_root() -> bool {
    true
}

/// Validate `values` against the tool's own parameter specs.
pub fn validate_for(tool: &dyn ToolSpec, values: &ParamValues) -> Result<(), String> {
    validate(&tool.params(), values)
}

/// Quote a value for safe interpolation into a shell command string.
/// Plain word-like values pass through untouched.
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | ',' | '@' | '=')
        });
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

/// Markdown documentation generated from tool metadata.
pub fn documentation(tool: &dyn ToolSpec) -> String {
    let mut doc = format!(
        "# {}\n\n{}\n\n**Category:** {}\n**Risk Level:** {}\n**Requires Root:** {}\n\n## Parameters\n",
        tool.name(),
        tool.description(),
        tool.category().label(),
        tool.risk_level().label(),
        if tool.requires_root() { "Yes" } else { "No" },
    );
    for param in tool.params() {
        let required = if param.required { " (required)" } else { "" };
        let default = match &param.default {
            Some(d) if param.sensitive => format!(" [default: {}]", "*".repeat(d.len())),
            Some(d) => format!(" [default: {}]", d),
            None => String::new(),
        };
        doc.push_str(&format!(
            "\n- **{}**{}{}\n",
            param.label, required, default
        ));
    }
    doc
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
