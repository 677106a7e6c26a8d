//! Wireless auditing tools. Both require a monitor-mode interface and
//! root privileges, and both are gated behind an explicit confirmation.

use crate::tools::param::{ParamSpec, ParamValues};
use crate::tools::spec::{shell_quote, validate_for, Category, RiskLevel, ToolSpec};


pub static AIRCRACK_NG: AircrackNg = AircrackNg;
pub static WIFITE: Wifite = Wifite;


// ---------------------------------------------------------------------------
// AircrackNg
// ---------------------------------------------------------------------------

/// WEP and WPA/WPA2-PSK key recovery from capture files.
pub struct AircrackNg;

impl ToolSpec for AircrackNg {
    fn name(&self) -> &str {
        "aircrack-ng"
    }

    fn description(&self) -> &str {
        "WEP and WPA/WPA2-PSK key cracking"
    }

    fn category(&self) -> Category {
        Category::Wireless
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::High
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::file("capture", "Capture File (.cap)").required(),
            ParamSpec::file("wordlist", "Wordlist Path")
                .default_value("/usr/share/wordlists/rockyou.txt"),
            ParamSpec::text("bssid", "Target BSSID").placeholder("AA:BB:CC:DD:EE:FF"),
            ParamSpec::text("essid", "Network Name (ESSID)"),
        ]
    }

    fn build_command(&self, values: &ParamValues) -> Result<String, String> {
        validate_for(self, values)?;
        let mut parts = vec!["aircrack-ng".to_string()];
        if let Some(wordlist) = values.text("wordlist") {
            parts.push(format!("-w {}", shell_quote(wordlist)));
        }
        if let Some(bssid) = values.text("bssid") {
            parts.push(format!("-b {}", shell_quote(bssid)));
        }
        if let Some(essid) = values.text("essid") {
            parts.push(format!("-e {}", shell_quote(essid)));
        }
        parts.push(shell_quote(values.text("capture").unwrap_or_default()));
        Ok(parts.join(" "))
    }
}


// ---------------------------------------------------------------------------
// Wifite
// ---------------------------------------------------------------------------

/// Automated wireless auditor.
pub struct Wifite;

impl ToolSpec for Wifite {
    fn name(&self) -> &str {
        "wifite"
    }

    fn description(&self) -> &str {
        "Automated wireless auditor"
    }

    fn category(&self) -> Category {
        Category::Wireless
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::High
    }

    fn requires_root(&self) -> bool {
        true
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::text("interface", "Wireless Interface").default_value("wlan0mon"),
            ParamSpec::flag("wpa", "Target WPA only").default_value("true"),
            ParamSpec::flag("dict", "Dictionary Attack"),
            ParamSpec::flag("pixie", "WPS Pixie Dust Attack"),
        ]
    }

    fn build_command(&self, values: &ParamValues) -> Result<String, String> {
        validate_for(self, values)?;
        let interface = values.text("interface").unwrap_or("wlan0mon");
        let mut parts = vec![format!("wifite -i {}", shell_quote(interface))];
        if values.flag("wpa") {
            parts.push("--wpa".to_string());
        }
        if values.flag("dict") {
            parts.push("--dict".to_string());
        }
        if values.flag("pixie") {
            parts.push("--pixie".to_string());
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
    fn aircrack_requires_capture_file() {
        let err = AIRCRACK_NG.build_command(&ParamValues::new()).unwrap_err();
        assert!(err.contains("Capture File"));
    }

    #[test]
    fn aircrack_defaults_use_rockyou() {
        let mut values = ParamValues::defaults_for(&AIRCRACK_NG.params());
        values.set_text("capture", "/tmp/handshake.cap");
        let command = AIRCRACK_NG.build_command(&values).unwrap();
        assert_eq!(
            command,
            "aircrack-ng -w /usr/share/wordlists/rockyou.txt /tmp/handshake.cap"
        );
    }

    #[test]
    fn aircrack_includes_bssid_and_essid() {
        let mut values = ParamValues::new();
        values.set_text("capture", "dump.cap");
        values.set_text("wordlist", "words.txt");
        values.set_text("bssid", "AA:BB:CC:DD:EE:FF");
        values.set_text("essid", "Home Net");
        let command = AIRCRACK_NG.build_command(&values).unwrap();
        assert_eq!(
            command,
            "aircrack-ng -w words.txt -b AA:BB:CC:DD:EE:FF -e 'Home Net' dump.cap"
        );
    }

    #[test]
    fn wifite_defaults() {
        let values = ParamValues::defaults_for(&WIFITE.params());
        let command = WIFITE.build_command(&values).unwrap();
        assert_eq!(command, "wifite -i wlan0mon --wpa");
    }

    #[test]
    fn wifite_all_toggles() {
        let mut values = ParamValues::new();
        values.set_text("interface", "wlan1mon");
        values.set_flag("wpa", true);
        values.set_flag("dict", true);
        values.set_flag("pixie", true);
        let command = WIFITE.build_command(&values).unwrap();
        assert_eq!(command, "wifite -i wlan1mon --wpa --dict --pixie");
    }

    #[test]
    fn wireless_tools_need_confirmation() {
        assert!(AIRCRACK_NG.risk_level().needs_confirmation());
        assert!(WIFITE.risk_level().needs_confirmation());
    }

    #[test]
    fn wifite_needs_root_aircrack_does_not() {
        assert!(WIFITE.requires_root());
        assert!(!AIRCRACK_NG.requires_root());
    }
}
