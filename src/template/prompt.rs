//! Template value type.

use super::bindings::Bindings;
use super::fill::{extract_variables, fill_variables, missing_variables};
use std::fmt;

/// An immutable prompt template.
///
/// Filling never mutates the template; every fill produces a new string.
///
/// # Examples
///
/// ```
/// use distill::template::{Bindings, PromptTemplate};
///
/// let template = PromptTemplate::new("Translate {{text}} into {{language}}.");
/// assert_eq!(template.variables(), vec!["text", "language"]);
///
/// let bindings: Bindings = [("text", "bonjour")].into_iter().collect();
/// let filled = template.render(&bindings);
/// assert_eq!(filled.text, "Translate bonjour into {{language}}.");
/// assert_eq!(filled.unresolved, vec!["language"]);
/// assert!(!filled.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    raw: String,
}

/// The result of rendering a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledPrompt {
    /// The filled text, with unresolved placeholders left verbatim.
    pub text: String,
    /// Variables left without a non-blank binding, in template order.
    pub unresolved: Vec<String>,
}

impl FilledPrompt {
    /// Whether every variable was resolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

impl PromptTemplate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Distinct variable names in first-occurrence order.
    pub fn variables(&self) -> Vec<String> {
        extract_variables(&self.raw)
    }

    /// Fill the template, returning only the text.
    pub fn fill(&self, bindings: &Bindings) -> String {
        fill_variables(&self.raw, bindings)
    }

    /// Fill the template and report which variables stayed unresolved.
    pub fn render(&self, bindings: &Bindings) -> FilledPrompt {
        FilledPrompt {
            text: fill_variables(&self.raw, bindings),
            unresolved: missing_variables(&self.raw, bindings),
        }
    }
}

impl From<String> for PromptTemplate {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for PromptTemplate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
