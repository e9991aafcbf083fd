//! Variable bindings for template filling.

use super::scanner::is_valid_name;
use crate::error::{DistillError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mapping from variable name to user-supplied value.
///
/// Bindings need not cover every variable of a template. A value that is
/// empty or whitespace-only counts as unfilled.
///
/// Keys are kept sorted so serialized bindings are deterministic.
///
/// # Examples
///
/// ```
/// use distill::template::Bindings;
///
/// let bindings: Bindings = [("name", "Ada"), ("age", "  ")].into_iter().collect();
/// assert_eq!(bindings.filled_value("name"), Some("Ada"));
/// assert!(!bindings.is_filled("age"));
/// assert!(!bindings.is_filled("place"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings(BTreeMap<String, String>);

impl Bindings {
    /// Create an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Get the raw bound value, blank or not.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Get the bound value only if it is not empty or whitespace-only.
    pub fn filled_value(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.trim().is_empty())
    }

    /// Whether `name` has a non-blank value.
    pub fn is_filled(&self, name: &str) -> bool {
        self.filled_value(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `other` into `self`. Values from `other` win on conflict.
    pub fn merge(&mut self, other: Bindings) {
        self.0.extend(other.0);
    }

    /// Parse bindings from a flat YAML (or JSON) mapping.
    ///
    /// Scalar values are accepted and converted to strings, so `age: 30`
    /// binds `age` to `"30"`. A `null` value binds the empty string.
    /// Nested sequences or mappings are rejected.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let raw: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(content)
            .map_err(|e| DistillError::UserError(format!("failed to parse variables file: {}", e)))?;

        let mut bindings = Self::new();
        for (name, value) in raw {
            let value = match value {
                serde_yaml::Value::Null => String::new(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::String(s) => s,
                _ => {
                    return Err(DistillError::UserError(format!(
                        "variable '{}' must be a plain value (string, number, or boolean), not a list or map",
                        name
                    )));
                }
            };
            bindings.insert(name, value);
        }

        Ok(bindings)
    }
}

impl<K, V> FromIterator<(K, V)> for Bindings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Parse a `name=value` assignment as given on the command line.
///
/// Splits on the first `=`, so the value may itself contain `=`. The name is
/// trimmed and must be a legal variable name; the value is kept as-is.
///
/// # Examples
///
/// ```
/// use distill::template::parse_assignment;
///
/// let (name, value) = parse_assignment("query=a=b").unwrap();
/// assert_eq!(name, "query");
/// assert_eq!(value, "a=b");
/// ```
pub fn parse_assignment(input: &str) -> Result<(String, String)> {
    let (name, value) = input.split_once('=').ok_or_else(|| {
        DistillError::UserError(format!(
            "invalid assignment '{}': expected NAME=VALUE (e.g., --set name=Ada)",
            input
        ))
    })?;

    let name = name.trim();
    if !is_valid_name(name) {
        return Err(DistillError::UserError(format!(
            "invalid variable name '{}': names may only contain letters, digits, and underscores",
            name
        )));
    }

    Ok((name.to_string(), value.to_string()))
}
