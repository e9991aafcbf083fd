//! Variable extraction and filling.

use super::bindings::Bindings;
use super::scanner::placeholders;
use std::collections::HashSet;

/// Extract the distinct variable names of a template.
///
/// Names are returned in order of first occurrence with duplicates removed.
/// Any string is valid input; malformed placeholders are skipped.
///
/// # Examples
///
/// ```
/// use distill::template::extract_variables;
///
/// assert_eq!(extract_variables("{{b}} {{a}} {{b}}"), vec!["b", "a"]);
/// assert!(extract_variables("plain text").is_empty());
/// ```
pub fn extract_variables(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for placeholder in placeholders(template) {
        if seen.insert(placeholder.name) {
            names.push(placeholder.name.to_string());
        }
    }

    names
}

/// Whether the template contains at least one placeholder.
pub fn has_placeholders(template: &str) -> bool {
    placeholders(template).next().is_some()
}

/// Fill a template with bound values.
///
/// Every placeholder whose name has a non-blank binding is replaced by the raw
/// value. Unbound and blank-bound placeholders stay verbatim. Substitution is
/// a single pass: placeholders inside bound values are not expanded.
///
/// # Examples
///
/// ```
/// use distill::template::{Bindings, fill_variables};
///
/// let bindings: Bindings = [("name", "Ada")].into_iter().collect();
/// assert_eq!(
///     fill_variables("Hello {{name}}, you are {{age}}", &bindings),
///     "Hello Ada, you are {{age}}"
/// );
/// ```
pub fn fill_variables(template: &str, bindings: &Bindings) -> String {
    let mut result = String::with_capacity(template.len());
    let mut cursor = 0;

    for placeholder in placeholders(template) {
        result.push_str(&template[cursor..placeholder.start]);
        match bindings.filled_value(placeholder.name) {
            Some(value) => result.push_str(value),
            None => result.push_str(placeholder.text),
        }
        cursor = placeholder.end;
    }

    result.push_str(&template[cursor..]);
    result
}

/// Variables of `template` that have no non-blank binding, in template order.
pub fn missing_variables(template: &str, bindings: &Bindings) -> Vec<String> {
    extract_variables(template)
        .into_iter()
        .filter(|name| !bindings.is_filled(name))
        .collect()
}

/// Whether every variable of `template` has a non-blank binding.
pub fn is_complete(template: &str, bindings: &Bindings) -> bool {
    placeholders(template).all(|p| bindings.is_filled(p.name))
}
