//! Placeholder substitution for release tag, name and body.

use crate::project::Info;

/// Version placeholder token
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// A placeholder token and its replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Literal token to replace
    pub key: String,
    /// Replacement value
    pub value: String,
}

impl Template {
    /// Create a template
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Templates declared for a project, in application order
pub fn release_templates(info: &Info) -> Vec<Template> {
    vec![Template::new(VERSION_PLACEHOLDER, info.version.clone())]
}

/// Replace every occurrence of each template key, applying templates in order
pub fn apply_templates(templates: &[Template], input: &str) -> String {
    templates
        .iter()
        .filter(|t| !t.key.is_empty())
        .fold(input.to_string(), |acc, t| acc.replace(&t.key, &t.value))
}
