//! Reconnaissance tools: passive information gathering.

use crate::tools::param::{ParamSpec, ParamValues};
use crate::tools::spec::{
    shell_quote, validate_for, Category, Finding, ToolReport, ToolSpec,
};


pub static THE_HARVESTER: TheHarvester = TheHarvester;
pub static RECON_NG: ReconNg = ReconNg;


// ---------------------------------------------------------------------------
// TheHarvester
// ---------------------------------------------------------------------------

/// Email harvesting and subdomain discovery.
pub struct TheHarvester;

const HARVESTER_SOURCES: [&str; 8] = [
    "baidu",
    "bing",
    "google",
    "linkedin",
    "twitter",
    "virustotal",
    "threatcrowd",
    "crtsh",
];

impl ToolSpec for TheHarvester {
    fn name(&self) -> &str {
        "theHarvester"
    }

    fn description(&self) -> &str {
        "Email harvesting and subdomain discovery"
    }

    fn category(&self) -> Category {
        Category::Reconnaissance
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::text("domain", "Target Domain")
                .required()
                .placeholder("example.com"),
            ParamSpec::number("limit", "Result Limit", 1, 100_000).default_value("500"),
            ParamSpec::multi_select("source", "Data Sources", &HARVESTER_SOURCES),
        ]
    }

    fn build_command(&self, values: &ParamValues) -> Result<String, String> {
        validate_for(self, values)?;
        let domain = values.text("domain").unwrap_or_default();
        let limit = values.number("limit").unwrap_or(500);
        let sources = match values.list("source") {
            Some(items) => items.join(","),
            None => "all".to_string(),
        };
        Ok(format!(
            "theHarvester -d {} -l {} -b {}",
            shell_quote(domain),
            limit,
            shell_quote(&sources),
        ))
    }

    fn parse_output(&self, output: &str) -> ToolReport {
        let mut findings = Vec::new();
        for line in output.lines() {
            let token = line.trim();
            if token.contains('@') && !token.contains(' ') {
                findings.push(Finding::new("email", token));
            }
        }
        ToolReport {
            tool: self.name().to_string(),
            summary: format!("{} e-mail addresses found", findings.len()),
            findings,
        }
    }
}


// ---------------------------------------------------------------------------
// ReconNg
// ---------------------------------------------------------------------------

/// Web reconnaissance framework with modules.
pub struct ReconNg;

const RECON_NG_MODULES: [&str; 3] = [
    "recon/domains-hosts/brute_hosts",
    "recon/domains-hosts/google_site_web",
    "recon/hosts-hosts/resolve",
];

impl ToolSpec for ReconNg {
    fn name(&self) -> &str {
        "recon-ng"
    }

    fn description(&self) -> &str {
        "Web reconnaissance framework with modules"
    }

    fn category(&self) -> Category {
        Category::Reconnaissance
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::text("workspace", "Workspace Name").placeholder("my_target"),
            ParamSpec::select("module", "Module", &RECON_NG_MODULES)
                .default_value(RECON_NG_MODULES[0]),
        ]
    }

    fn build_command(&self, values: &ParamValues) -> Result<String, String> {
        validate_for(self, values)?;
        let workspace = values.text("workspace").unwrap_or("default");
        let module = values.text("module").unwrap_or(RECON_NG_MODULES[0]);
        Ok(format!(
            "recon-ng -w {} -m {}",
            shell_quote(workspace),
            shell_quote(module),
        ))
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
