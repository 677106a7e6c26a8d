//! The tool registry: every wrapped tool, grouped by category.

use serde::{Deserialize, Serialize};

use crate::tools::exploitation::{MSFCONSOLE, SQLMAP};
use crate::tools::forensics::{AUTOPSY, BINWALK};
use crate::tools::recon::{RECON_NG, THE_HARVESTER};
use crate::tools::scanning::{MASSCAN, NMAP};
use crate::tools::spec::{Category, RiskLevel, ToolSpec};
use crate::tools::wireless::{AIRCRACK_NG, WIFITE};


/// Serializable summary of a tool, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMeta {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub risk_level: RiskLevel,
    pub requires_root: bool,
}

/// The catalog of available tools, in category order.
pub struct ToolRegistry {
    tools: Vec<&'static dyn ToolSpec>,
}

impl ToolRegistry {
    /// The standard catalog.
    pub fn standard() -> Self {
        ToolRegistry {
            tools: vec![
                &THE_HARVESTER,
                &RECON_NG,
                &NMAP,
                &MASSCAN,
                &AIRCRACK_NG,
                &WIFITE,
                &SQLMAP,
                &MSFCONSOLE,
                &AUTOPSY,
                &BINWALK,
            ],
        }
    }

    /// Look up a tool by name, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&'static dyn ToolSpec> {
        self.tools
            .iter()
            .copied()
            .find(|tool| tool.name().eq_ignore_ascii_case(name.trim()))
    }

    /// All tools in the given category, in registration order.
    pub fn by_category(&self, category: Category) -> Vec<&'static dyn ToolSpec> {
        self.tools
            .iter()
            .copied()
            .filter(|tool| tool.category() == category)
            .collect()
    }

    pub fn all(&self) -> &[&'static dyn ToolSpec] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Categories with at least one tool, in declaration order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| !self.by_category(*category).is_empty())
            .collect()
    }

    /// Serializable summaries of every tool, or of one category.
    pub fn meta(&self, category: Option<Category>) -> Vec<ToolMeta> {
        self.tools
            .iter()
            .filter(|tool| category.map_or(true, |c| tool.category() == c))
            .map(|tool| ToolMeta {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                category: tool.category(),
                risk_level: tool.risk_level(),
                requires_root: tool.requires_root(),
            })
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
