//! Tool parameter definitions, values, and validation.
//!
//! A tool declares its inputs as a list of [`ParamSpec`]s; the form
//! layer collects a [`ParamValues`] map; [`validate`] checks the map
//! against the specs before a command string is built.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};


// ---------------------------------------------------------------------------
// ParamKind
// ---------------------------------------------------------------------------

/// What kind of input a parameter takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamKind {
    /// Free text.
    Text,
    /// Integer in an inclusive range.
    Number { min: i64, max: i64 },
    /// One of a fixed set of choices.
    Select { choices: Vec<String> },
    /// Comma-separated subset of a fixed set of choices.
    MultiSelect { choices: Vec<String> },
    /// Boolean toggle.
    Flag,
    /// A filesystem path.
    FilePath,
}


// ---------------------------------------------------------------------------
// ParamSpec
// ---------------------------------------------------------------------------

/// Definition of a single tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Key used in `ParamValues`.
    pub name: String,
    /// Human-readable label shown in forms and error messages.
    pub label: String,
    pub kind: ParamKind,
    pub required: bool,
    /// Default value, rendered as text ("true"/"false" for flags).
    pub default: Option<String>,
    /// Hint shown in empty form fields.
    pub placeholder: Option<String>,
    /// Masked in echoes and documentation (passwords, keys).
    pub sensitive: bool,
}

impl ParamSpec {
    fn base(name: &str, label: &str, kind: ParamKind) -> Self {
        ParamSpec {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            default: None,
            placeholder: None,
            sensitive: false,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::base(name, label, ParamKind::Text)
    }

    pub fn number(name: &str, label: &str, min: i64, max: i64) -> Self {
        Self::base(name, label, ParamKind::Number { min, max })
    }

    pub fn select(name: &str, label: &str, choices: &[&str]) -> Self {
        Self::base(
            name,
            label,
            ParamKind::Select {
                choices: choices.iter().map(|c| c.to_string()).collect(),
            },
        )
    }

    pub fn multi_select(name: &str, label: &str, choices: &[&str]) -> Self {
        Self::base(
            name,
            label,
            ParamKind::MultiSelect {
                choices: choices.iter().map(|c| c.to_string()).collect(),
            },
        )
    }

    pub fn flag(name: &str, label: &str) -> Self {
        Self::base(name, label, ParamKind::Flag)
    }

    pub fn file(name: &str, label: &str) -> Self {
        Self::base(name, label, ParamKind::FilePath)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    pub fn placeholder(mut self, hint: &str) -> Self {
        self.placeholder = Some(hint.to_string());
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}


// ---------------------------------------------------------------------------
// ParamValue / ParamValues
// ---------------------------------------------------------------------------

/// A collected parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Number(i64),
    Flag(bool),
    List(Vec<String>),
}

/// String-keyed parameter values with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamValues {
    values: HashMap<String, ParamValue>,
}

impl ParamValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build values pre-populated with every spec's default.
    pub fn defaults_for(specs: &[ParamSpec]) -> Self {
        let mut values = Self::new();
        for spec in specs {
            let Some(default) = &spec.default else {
                continue;
            };
            match &spec.kind {
                ParamKind::Flag => values.set_flag(&spec.name, default == "true"),
                ParamKind::Number { .. } => {
                    if let Ok(n) = default.parse() {
                        values.set_number(&spec.name, n);
                    }
                }
                ParamKind::MultiSelect { .. } => values.set_list(
                    &spec.name,
                    default
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                ),
                _ => values.set_text(&spec.name, default),
            }
        }
        values
    }

    pub fn set_text(&mut self, name: &str, value: &str) {
        self.values
            .insert(name.to_string(), ParamValue::Text(value.to_string()));
    }

    pub fn set_number(&mut self, name: &str, value: i64) {
        self.values
            .insert(name.to_string(), ParamValue::Number(value));
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.values.insert(name.to_string(), ParamValue::Flag(value));
    }

    pub fn set_list(&mut self, name: &str, value: Vec<String>) {
        self.values.insert(name.to_string(), ParamValue::List(value));
    }

    pub fn unset(&mut self, name: &str) {
        self.values.remove(name);
    }

    /// Text value, if present and non-empty.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Text(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Numeric value; text values that parse as integers count.
    pub fn number(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ParamValue::Number(n)) => Some(*n),
            Some(ParamValue::Text(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Flag value; absent means false.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(ParamValue::Flag(true)))
    }

    /// List value for multi-selects.
    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.values.get(name) {
            Some(ParamValue::List(items)) if !items.is_empty() => Some(items),
            _ => None,
        }
    }

    /// Whether the parameter has a usable (non-empty) value.
    pub fn has(&self, name: &str) -> bool {
        match self.values.get(name) {
            None => false,
            Some(ParamValue::Text(s)) => !s.is_empty(),
            Some(ParamValue::List(items)) => !items.is_empty(),
            Some(ParamValue::Flag(_)) | Some(ParamValue::Number(_)) => true,
        }
    }
}


// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check `values` against `specs`. Returns the first problem found, as
/// a message naming the parameter's label.
pub fn validate(specs: &[ParamSpec], values: &ParamValues) -> Result<(), String> {
    for spec in specs {
        let present = values.has(&spec.name);
        if spec.required && !present {
            return Err(format!("Required parameter '{}' is missing", spec.label));
        }
        if !present {
            continue;
        }
        match &spec.kind {
            ParamKind::Number { min, max } => match values.number(&spec.name) {
                Some(n) if n >= *min && n <= *max => {}
                Some(n) => {
                    return Err(format!(
                        "'{}' must be between {} and {} (got {})",
                        spec.label, min, max, n
                    ));
                }
                None => {
                    return Err(format!("'{}' must be a number", spec.label));
                }
            },
            ParamKind::Select { choices } => {
                if let Some(value) = values.text(&spec.name) {
                    if !choices.iter().any(|c| c == value) {
                        return Err(format!("'{}' has no option '{}'", spec.label, value));
                    }
                }
            }
            ParamKind::MultiSelect { choices } => {
                if let Some(items) = values.list(&spec.name) {
                    for item in items {
                        if !choices.iter().any(|c| c == item) {
                            return Err(format!("'{}' has no option '{}'", spec.label, item));
                        }
                    }
                }
            }
            ParamKind::Text | ParamKind::Flag | ParamKind::FilePath => {}
        }
    }
    Ok(())
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<ParamSpec> {
        vec![
            ParamSpec::text("target", "Target Host").required(),
            ParamSpec::number("rate", "Packets/Second", 1, 10000).default_value("1000"),
            ParamSpec::select("mode", "Mode", &["fast", "slow"]).default_value("fast"),
            ParamSpec::multi_select("sources", "Data Sources", &["bing", "google"]),
            ParamSpec::flag("verbose", "Verbose"),
        ]
    }

    #[test]
    fn defaults_for_populates_each_kind() {
        let specs = vec![
            ParamSpec::text("name", "Name").default_value("x"),
            ParamSpec::number("count", "Count", 0, 10).default_value("5"),
            ParamSpec::flag("on", "On").default_value("true"),
            ParamSpec::flag("off", "Off").default_value("false"),
            ParamSpec::multi_select("src", "Sources", &["a", "b"]).default_value("a, b"),
        ];
        let values = ParamValues::defaults_for(&specs);
        assert_eq!(values.text("name"), Some("x"));
        assert_eq!(values.number("count"), Some(5));
        assert!(values.flag("on"));
        assert!(!values.flag("off"));
        assert_eq!(values.list("src").unwrap().len(), 2);
    }

    #[test]
    fn missing_required_is_first_error() {
        let values = ParamValues::new();
        let err = validate(&specs(), &values).unwrap_err();
        assert!(err.contains("Target Host"));
        assert!(err.contains("missing"));
    }

    #[test]
    fn empty_text_counts_as_missing() {
        let mut values = ParamValues::new();
        values.set_text("target", "");
        let err = validate(&specs(), &values).unwrap_err();
        assert!(err.contains("Target Host"));
    }

    #[test]
    fn number_out_of_range() {
        let mut values = ParamValues::new();
        values.set_text("target", "10.0.0.1");
        values.set_number("rate", 99999);
        let err = validate(&specs(), &values).unwrap_err();
        assert!(err.contains("Packets/Second"));
        assert!(err.contains("between 1 and 10000"));
    }

    #[test]
    fn number_accepts_parseable_text() {
        let mut values = ParamValues::new();
        values.set_text("target", "10.0.0.1");
        values.set_text("rate", "250");
        assert!(validate(&specs(), &values).is_ok());
        assert_eq!(values.number("rate"), Some(250));
    }

    #[test]
    fn number_rejects_garbage_text() {
        let mut values = ParamValues::new();
        values.set_text("target", "10.0.0.1");
        values.set_text("rate", "fast");
        let err = validate(&specs(), &values).unwrap_err();
        assert!(err.contains("must be a number"));
    }

    #[test]
    fn select_membership_enforced() {
        let mut values = ParamValues::new();
        values.set_text("target", "10.0.0.1");
        values.set_text("mode", "medium");
        let err = validate(&specs(), &values).unwrap_err();
        assert!(err.contains("no option 'medium'"));
    }

    #[test]
    fn multi_select_membership_enforced() {
        let mut values = ParamValues::new();
        values.set_text("target", "10.0.0.1");
        values.set_list("sources", vec!["bing".into(), "yahoo".into()]);
        let err = validate(&specs(), &values).unwrap_err();
        assert!(err.contains("no option 'yahoo'"));
    }

    #[test]
    fn valid_values_pass() {
        let mut values = ParamValues::new();
        values.set_text("target", "scanme.example.org");
        values.set_number("rate", 500);
        values.set_text("mode", "slow");
        values.set_list("sources", vec!["bing".into()]);
        values.set_flag("verbose", true);
        assert!(validate(&specs(), &values).is_ok());
    }

    #[test]
    fn flag_defaults_to_false() {
        let values = ParamValues::new();
        assert!(!values.flag("verbose"));
    }

    #[test]
    fn has_reflects_emptiness() {
        let mut values = ParamValues::new();
        assert!(!values.has("x"));
        values.set_text("x", "");
        assert!(!values.has("x"));
        values.set_text("x", "y");
        assert!(values.has("x"));
        values.unset("x");
        assert!(!values.has("x"));
    }

    #[test]
    fn spec_builders_set_fields() {
        let spec = ParamSpec::text("key", "API Key")
            .required()
            .placeholder("hex string")
            .sensitive();
        assert!(spec.required);
        assert!(spec.sensitive);
        assert_eq!(spec.placeholder.as_deref(), Some("hex string"));
        assert_eq!(spec.kind, ParamKind::Text);
    }
}
