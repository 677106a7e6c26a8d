//! Exploitation frameworks. Critical risk: every run is gated behind an
//! explicit confirmation.

use crate::tools::param::{ParamSpec, ParamValues};
use crate::tools::spec::{shell_quote, validate_for, Category, RiskLevel, ToolSpec};


pub static SQLMAP: Sqlmap = Sqlmap;
pub static MSFCONSOLE: Msfconsole = Msfconsole;


// ---------------------------------------------------------------------------
// Sqlmap
// ---------------------------------------------------------------------------

/// Automatic SQL injection and database takeover.
pub struct Sqlmap;

impl ToolSpec for Sqlmap {
    fn name(&self) -> &str {
        "sqlmap"
    }

    fn description(&self) -> &str {
        "Automatic SQL injection and database takeover"
    }

    fn category(&self) -> Category {
        Category::Exploitation
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Critical
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::text("url", "Target URL")
                .required()
                .placeholder("http://target.example/page.php?id=1"),
            ParamSpec::number("level", "Test Level (1-5)", 1, 5).default_value("1"),
            ParamSpec::number("risk", "Risk Level (1-3)", 1, 3).default_value("1"),
            ParamSpec::flag("dbs", "Enumerate Databases"),
            ParamSpec::flag("tables", "Enumerate Tables"),
            ParamSpec::flag("dump", "Dump Data"),
            ParamSpec::flag("tor", "Use Tor Proxy"),
        ]
    }

    fn build_command(&self, values: &ParamValues) -> Result<String, String> {
        validate_for(self, values)?;
        let url = values.text("url").unwrap_or_default();
        let mut parts = vec![format!(
            "sqlmap -u {} --level {} --risk {}",
            shell_quote(url),
            values.number("level").unwrap_or(1),
            values.number("risk").unwrap_or(1),
        )];
        for (name, flag) in [
            ("dbs", "--dbs"),
            ("tables", "--tables"),
            ("dump", "--dump"),
            ("tor", "--tor"),
        ] {
            if values.flag(name) {
                parts.push(flag.to_string());
            }
        }
        // Never prompt interactively inside the console view.
        parts.push("--batch".to_string());
        Ok(parts.join(" "))
    }
}


// ---------------------------------------------------------------------------
// Msfconsole
// ---------------------------------------------------------------------------

/// Metasploit Framework console launcher.
pub struct Msfconsole;

impl ToolSpec for Msfconsole {
    fn name(&self) -> &str {
        "msfconsole"
    }

    fn description(&self) -> &str {
        "Launch the Metasploit Framework console"
    }

    fn category(&self) -> Category {
        Category::Exploitation
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Critical
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::file("resource", "Resource Script (optional)"),
            ParamSpec::flag("quiet", "Quiet Mode"),
        ]
    }

    fn build_command(&self, values: &ParamValues) -> Result<String, String> {
        validate_for(self, values)?;
        let mut parts = vec!["msfconsole".to_string()];
        if values.flag("quiet") {
            parts.push("-q".to_string());
        }
        if let Some(resource) = values.text("resource") {
            parts.push(format!("-r {}", shell_quote(resource)));
        }
        Ok(parts.join(" "))
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlmap_requires_url() {
        let err = SQLMAP.build_command(&ParamValues::new()).unwrap_err();
        assert!(err.contains("Target URL"));
    }

    #[test]
    fn sqlmap_defaults_are_level_one_batch() {
        let mut values = ParamValues::defaults_for(&SQLMAP.params());
        values.set_text("url", "http://t.example/p.php?id=1");
        let command = SQLMAP.build_command(&values).unwrap();
        assert_eq!(
            command,
            "sqlmap -u 'http://t.example/p.php?id=1' --level 1 --risk 1 --batch"
        );
    }

    #[test]
    fn sqlmap_level_bounds() {
        let mut values = ParamValues::new();
        values.set_text("url", "http://t.example/");
        values.set_number("level", 6);
        let err = SQLMAP.build_command(&values).unwrap_err();
        assert!(err.contains("Test Level"));
    }

    #[test]
    fn sqlmap_enumeration_flags() {
        let mut values = ParamValues::new();
        values.set_text("url", "http://t.example/");
        values.set_number("level", 3);
        values.set_number("risk", 2);
        values.set_flag("dbs", true);
        values.set_flag("dump", true);
        values.set_flag("tor", true);
        let command = SQLMAP.build_command(&values).unwrap();
        assert_eq!(
            command,
            "sqlmap -u 'http://t.example/' --level 3 --risk 2 --dbs --dump --tor --batch"
        );
    }

    #[test]
    fn msfconsole_bare() {
        let command = MSFCONSOLE.build_command(&ParamValues::new()).unwrap();
        assert_eq!(command, "msfconsole");
    }

    #[test]
    fn msfconsole_quiet_with_resource() {
        let mut values = ParamValues::new();
        values.set_flag("quiet", true);
        values.set_text("resource", "/tmp/setup.rc");
        let command = MSFCONSOLE.build_command(&values).unwrap();
        assert_eq!(command, "msfconsole -q -r /tmp/setup.rc");
    }

    #[test]
    fn exploitation_tools_are_critical() {
        assert_eq!(SQLMAP.risk_level(), RiskLevel::Critical);
        assert_eq!(MSFCONSOLE.risk_level(), RiskLevel::Critical);
        assert!(SQLMAP.risk_level().needs_confirmation());
    }
}
