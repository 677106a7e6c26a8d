//! Digital forensics tools.

use crate::tools::param::{ParamSpec, ParamValues};
use crate::tools::spec::{
    shell_quote, validate_for, Category, Finding, ToolReport, ToolSpec,
};


pub static AUTOPSY: Autopsy = Autopsy;
pub static BINWALK: Binwalk = Binwalk;


// ---------------------------------------------------------------------------
// Autopsy
// ---------------------------------------------------------------------------

/// Digital forensics platform front-end for the Sleuth Kit.
pub struct Autopsy;

impl ToolSpec for Autopsy {
    fn name(&self) -> &str {
        "autopsy"
    }

    fn description(&self) -> &str {
        "Digital forensics platform for the Sleuth Kit"
    }

    fn category(&self) -> Category {
        Category::Forensics
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::text("case", "Case Name").default_value("Case_001"),
            ParamSpec::file("image", "Disk Image (optional)"),
        ]
    }

    fn build_command(&self, values: &ParamValues) -> Result<String, String> {
        validate_for(self, values)?;
        let mut parts = vec!["autopsy".to_string()];
        if let Some(case) = values.text("case") {
            parts.push(format!("--case {}", shell_quote(case)));
        }
        if let Some(image) = values.text("image") {
            parts.push(shell_quote(image));
        }
        Ok(parts.join(" "))
    }
}


// ---------------------------------------------------------------------------
// Binwalk
// ---------------------------------------------------------------------------

/// Firmware analysis and extraction.
pub struct Binwalk;

impl ToolSpec for Binwalk {
    fn name(&self) -> &str {
        "binwalk"
    }

    fn description(&self) -> &str {
        "Firmware analysis and extraction"
    }

    fn category(&self) -> Category {
        Category::Forensics
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::file("file", "Target File").required(),
            ParamSpec::flag("extract", "Auto-extract Files").default_value("true"),
            ParamSpec::number("depth", "Recursion Depth", 1, 64).default_value("8"),
        ]
    }

    fn build_command(&self, values: &ParamValues) -> Result<String, String> {
        validate_for(self, values)?;
        let mut parts = vec!["binwalk".to_string()];
        if values.flag("extract") {
            parts.push("-e".to_string());
            if let Some(depth) = values.number("depth") {
                parts.push(format!("-M -d {}", depth));
            }
        }
        parts.push(shell_quote(values.text("file").unwrap_or_default()));
        Ok(parts.join(" "))
    }

    fn parse_output(&self, output: &str) -> ToolReport {
        // Signature table rows start with a decimal offset.
        let mut findings = Vec::new();
        for line in output.lines() {
            let mut tokens = line.split_whitespace();
            let Some(first) = tokens.next() else { continue };
            if first.chars().all(|c| c.is_ascii_digit()) && !first.is_empty() {
                let description: Vec<&str> = tokens.skip(1).collect();
                findings.push(Finding::new(first, &description.join(" ")));
            }
        }
        ToolReport {
            tool: self.name().to_string(),
            summary: format!("{} signatures", findings.len()),
            findings,
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autopsy_defaults() {
        let values = ParamValues::defaults_for(&AUTOPSY.params());
        let command = AUTOPSY.build_command(&values).unwrap();
        assert_eq!(command, "autopsy --case Case_001");
    }

    #[test]
    fn autopsy_with_image() {
        let mut values = ParamValues::new();
        values.set_text("case", "intrusion 2026");
        values.set_text("image", "/evidence/disk.img");
        let command = AUTOPSY.build_command(&values).unwrap();
        assert_eq!(command, "autopsy --case 'intrusion 2026' /evidence/disk.img");
    }

    #[test]
    fn binwalk_requires_file() {
        let err = BINWALK.build_command(&ParamValues::new()).unwrap_err();
        assert!(err.contains("Target File"));
    }

    #[test]
    fn binwalk_defaults_extract_with_depth() {
        let mut values = ParamValues::defaults_for(&BINWALK.params());
        values.set_text("file", "firmware.bin");
        let command = BINWALK.build_command(&values).unwrap();
        assert_eq!(command, "binwalk -e -M -d 8 firmware.bin");
    }

    #[test]
    fn binwalk_no_extract_is_plain_scan() {
        let mut values = ParamValues::new();
        values.set_text("file", "firmware.bin");
        values.set_flag("extract", false);
        let command = BINWALK.build_command(&values).unwrap();
        assert_eq!(command, "binwalk firmware.bin");
    }

    #[test]
    fn binwalk_depth_bounds() {
        let mut values = ParamValues::new();
        values.set_text("file", "firmware.bin");
        values.set_flag("extract", true);
        values.set_number("depth", 100);
        assert!(BINWALK.build_command(&values).is_err());
    }

    #[test]
    fn binwalk_parses_signature_table() {
        let output = "\
DECIMAL       HEXADECIMAL     DESCRIPTION\n\
0             0x0             uImage header\n\
64            0x40            gzip compressed data\n\
not a row\n";
        let report = BINWALK.parse_output(output);
        assert_eq!(report.summary, "2 signatures");
        assert_eq!(report.findings[0].label, "0");
        assert_eq!(report.findings[0].value, "uImage header");
        assert_eq!(report.findings[1].value, "gzip compressed data");
    }
}
