//! Network scanning tools.

use crate::tools::param::{ParamSpec, ParamValues};
use crate::tools::spec::{
    shell_quote, validate_for, Category, Finding, RiskLevel, ToolReport, ToolSpec,
};


pub static NMAP: Nmap = Nmap;
pub static MASSCAN: Masscan = Masscan;


// ---------------------------------------------------------------------------
// Nmap
// ---------------------------------------------------------------------------

/// Network discovery and security auditing.
pub struct Nmap;

/// Display names paired with the flag groups they expand to.
const NMAP_SCAN_TYPES: [(&str, &str); 6] = [
    ("Quick Scan", "-F"),
    ("Intense Scan", "-A"),
    ("Intense Scan + UDP", "-sS -sU -A"),
    ("Quick Scan Plus", "-sV -T4 -O -F --version-light"),
    ("Ping Scan", "-sn"),
    ("Regular Scan", ""),
];

const NMAP_TIMING: [&str; 6] = [
    "T0 (Paranoid)",
    "T1 (Sneaky)",
    "T2 (Polite)",
    "T3 (Normal)",
    "T4 (Aggressive)",
    "T5 (Insane)",
];

impl ToolSpec for Nmap {
    fn name(&self) -> &str {
        "nmap"
    }

    fn description(&self) -> &str {
        "Network discovery and security auditing"
    }

    fn category(&self) -> Category {
        Category::Scanning
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Medium
    }

    fn params(&self) -> Vec<ParamSpec> {
        let scan_types: Vec<&str> = NMAP_SCAN_TYPES.iter().map(|(name, _)| *name).collect();
        vec![
            ParamSpec::text("target", "Target Host/IP")
                .required()
                .placeholder("192.168.1.1 or scanme.example.org"),
            ParamSpec::select("scan_type", "Scan Type", &scan_types).default_value("Quick Scan"),
            ParamSpec::text("ports", "Port Range").placeholder("80,443,8080 or 1-1000"),
            ParamSpec::select("timing", "Timing Template", &NMAP_TIMING)
                .default_value("T3 (Normal)"),
            ParamSpec::flag("save_output", "Save XML Output"),
        ]
    }

    fn build_command(&self, values: &ParamValues) -> Result<String, String> {
        validate_for(self, values)?;
        let target = values.text("target").unwrap_or_default();

        let mut parts = vec!["nmap".to_string()];
        if let Some(scan_type) = values.text("scan_type") {
            let flags = NMAP_SCAN_TYPES
                .iter()
                .find(|(name, _)| *name == scan_type)
                .map(|(_, flags)| *flags)
                .unwrap_or("");
            if !flags.is_empty() {
                parts.push(flags.to_string());
            }
        }
        if let Some(ports) = values.text("ports") {
            parts.push(format!("-p {}", shell_quote(ports)));
        }
        if let Some(timing) = values.text("timing") {
            // "T4 (Aggressive)" -> "-T4"
            if let Some(template) = timing.split_whitespace().next() {
                parts.push(format!("-{}", template));
            }
        }
        parts.push(shell_quote(target));
        if values.flag("save_output") {
            parts.push(format!(
                "-oX {}",
                shell_quote(&format!("nmap_{}.xml", target.replace('/', "_"))),
            ));
        }
        Ok(parts.join(" "))
    }

    fn parse_output(&self, output: &str) -> ToolReport {
        let mut findings = Vec::new();
        for line in output.lines() {
            let trimmed = line.trim();
            if (trimmed.contains("/tcp") || trimmed.contains("/udp"))
                && trimmed.contains("open")
            {
                let port = trimmed.split_whitespace().next().unwrap_or(trimmed);
                findings.push(Finding::new("open port", port));
            }
        }
        ToolReport {
            tool: self.name().to_string(),
            summary: format!("{} open ports", findings.len()),
            findings,
        }
    }
}


// ---------------------------------------------------------------------------
// Masscan
// ---------------------------------------------------------------------------

/// Internet-scale asynchronous port scanner.
pub struct Masscan;

impl ToolSpec for Masscan {
    fn name(&self) -> &str {
        "masscan"
    }

    fn description(&self) -> &str {
        "Internet-scale port scanner"
    }

    fn category(&self) -> Category {
        Category::Scanning
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Medium
    }

    fn requires_root(&self) -> bool {
        true
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::text("target", "Target Range")
                .required()
                .placeholder("10.0.0.0/8"),
            ParamSpec::text("ports", "Ports")
                .default_value("80,443")
                .placeholder("0-65535"),
            ParamSpec::number("rate", "Packets/Second", 1, 10_000_000).default_value("1000"),
        ]
    }

    fn build_command(&self, values: &ParamValues) -> Result<String, String> {
        validate_for(self, values)?;
        let target = values.text("target").unwrap_or_default();
        let ports = values.text("ports").unwrap_or("80,443");
        let rate = values.number("rate").unwrap_or(1000);
        Ok(format!(
            "masscan {} -p{} --rate {}",
            shell_quote(target),
            shell_quote(ports),
            rate,
        ))
    }

    fn parse_output(&self, output: &str) -> ToolReport {
        let mut findings = Vec::new();
        for line in output.lines() {
            if line.starts_with("Discovered open port") {
                let detail = line.trim_start_matches("Discovered open port").trim();
                findings.push(Finding::new("open port", detail));
            }
        }
        ToolReport {
            tool: self.name().to_string(),
            summary: format!("{} discoveries", findings.len()),
            findings,
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
