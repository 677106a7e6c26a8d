//! The tool catalog: parameter model, capability trait, and the tools
//! themselves, one module per category.

pub mod exploitation;
pub mod forensics;
pub mod param;
pub mod recon;
pub mod registry;
pub mod scanning;
pub mod spec;
pub mod wireless;

pub use param::{validate, ParamKind, ParamSpec, ParamValue, ParamValues};
pub use registry::{ToolMeta, ToolRegistry};
pub use spec::{
    command_for, documentation, shell_quote, validate_for, Category, Finding, RiskLevel,
    ToolReport, ToolSpec,
};
