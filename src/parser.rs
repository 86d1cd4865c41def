//! Policy document parser.
//!
//! A policy document is an array of rule objects using the field names
//! `role`, `user`, `group`, `resource`, `namespace`, `readonly` and
//! `nonResourcePath`, matched case-insensitively. JSON is the primary format;
//! YAML sequences with the same field names are also accepted.

use crate::error::{PolicyError, Result};
use crate::policy::PolicyRule;
use std::path::Path;

/// Supported policy document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFormat {
    Json,
    Yaml,
}

impl PolicyFormat {
    /// Detects format from file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Some(PolicyFormat::Yaml),
            Some("json") => Some(PolicyFormat::Json),
            _ => None,
        }
    }

    /// Detects format from content.
    pub fn detect(content: &str) -> Self {
        let trimmed = content.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') || trimmed.trim_end() == "null" {
            PolicyFormat::Json
        } else {
            PolicyFormat::Yaml
        }
    }
}

/// Parses rules from a string, auto-detecting format.
pub fn parse_rules(content: &str) -> Result<Vec<PolicyRule>> {
    parse_rules_with_format(content, PolicyFormat::detect(content))
}

/// Parses rules from a string with specified format.
///
/// A `null` document yields no rules.
pub fn parse_rules_with_format(content: &str, format: PolicyFormat) -> Result<Vec<PolicyRule>> {
    let rules: Option<Vec<PolicyRule>> = match format {
        PolicyFormat::Json => serde_json::from_str(content)?,
        PolicyFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(rules.unwrap_or_default())
}

/// Loads rules from a file.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else as
/// JSON.
pub fn load_rules_from_file(path: impl AsRef<Path>) -> Result<Vec<PolicyRule>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = PolicyFormat::from_extension(path).unwrap_or(PolicyFormat::Json);

    parse_rules_with_format(&content, format).map_err(|e| PolicyError::InvalidDocument {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
