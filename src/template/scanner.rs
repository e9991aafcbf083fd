//! Placeholder scanning.
//!
//! Extraction and filling share this single scanner so they always agree on
//! what counts as a placeholder.

use regex::Regex;
use std::sync::LazyLock;

/// Matches `{{name}}` with optional horizontal padding inside the braces.
///
/// The name class excludes `{` and `}`, so a match always ends at the first
/// `}}` after its opening `{{`. A `{{` that fails to match is skipped and
/// scanning resumes at the next character, which is what makes
/// `{{a{{b}}}}` yield `b`.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{[ \t]*([A-Za-z0-9_]+)[ \t]*\}\}").expect("Invalid placeholder regex")
});

/// A single placeholder occurrence within a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// The trimmed variable name (e.g. `name` for `{{ name }}`).
    pub name: &'a str,
    /// The literal placeholder text, braces and padding included.
    pub text: &'a str,
    /// Byte offset of the opening `{{`.
    pub start: usize,
    /// Byte offset just past the closing `}}`.
    pub end: usize,
}

/// Iterate over every placeholder occurrence in template order.
///
/// Duplicates are yielded each time they occur. Malformed or unbalanced
/// braces are skipped silently.
///
/// # Examples
///
/// ```
/// use distill::template::placeholders;
///
/// let found: Vec<_> = placeholders("Hi {{ who }}, {{bad name}} {{who}}")
///     .map(|p| (p.name, p.text))
///     .collect();
/// assert_eq!(found, vec![("who", "{{ who }}"), ("who", "{{who}}")]);
/// ```
pub fn placeholders(template: &str) -> impl Iterator<Item = Placeholder<'_>> {
    PLACEHOLDER_REGEX.captures_iter(template).filter_map(|caps| {
        let whole = caps.get(0)?;
        let name = caps.get(1)?;
        Some(Placeholder {
            name: name.as_str(),
            text: whole.as_str(),
            start: whole.start(),
            end: whole.end(),
        })
    })
}

/// Check whether `name` is a legal variable name (`[A-Za-z0-9_]+`).
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(template: &str) -> Vec<&str> {
        placeholders(template).map(|p| p.name).collect()
    }

    #[test]
    fn test_simple_placeholder() {
        let found: Vec<_> = placeholders("Hello {{name}}!").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "name");
        assert_eq!(found[0].text, "{{name}}");
        assert_eq!(found[0].start, 6);
        assert_eq!(found[0].end, 14);
    }

    #[test]
    fn test_duplicates_are_yielded() {
        assert_eq!(names("{{x}}-{{x}}-{{x}}"), vec!["x", "x", "x"]);
    }

    #[test]
    fn test_padding_is_trimmed() {
        let found: Vec<_> = placeholders("{{  name\t}}").collect();
        assert_eq!(found[0].name, "name");
        assert_eq!(found[0].text, "{{  name\t}}");
    }

    #[test]
    fn test_empty_and_whitespace_names_skipped() {
        assert!(names("{{}} and {{   }}").is_empty());
    }

    #[test]
    fn test_invalid_characters_skipped() {
        assert!(names("{{first name}} {{a-b}} {{a.b}} {{héllo}}").is_empty());
    }

    #[test]
    fn test_unbalanced_open_skipped() {
        assert!(names("Hello {{name").is_empty());
        assert_eq!(names("{{broken and {{ok}}"), vec!["ok"]);
    }

    #[test]
    fn test_single_braces_ignored() {
        assert!(names("fn main() { println!(\"{}\", x); }").is_empty());
        assert!(names("{name}").is_empty());
    }

    #[test]
    fn test_nested_braces_yield_inner_name() {
        assert_eq!(names("{{a{{b}}}}"), vec!["b"]);
    }

    #[test]
    fn test_triple_braces() {
        let found: Vec<_> = placeholders("{{{x}}}").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "x");
        assert_eq!((found[0].start, found[0].end), (1, 6));
    }

    #[test]
    fn test_placeholder_does_not_span_lines() {
        assert!(names("{{\nname\n}}").is_empty());
    }

    #[test]
    fn test_adjacent_placeholders() {
        assert_eq!(names("{{a}}{{b}}"), vec!["a", "b"]);
    }

    #[test]
    fn test_unicode_around_placeholders() {
        let template = "日本語 {{topic}} 🎉";
        let found: Vec<_> = placeholders(template).collect();
        assert_eq!(found[0].name, "topic");
        assert_eq!(&template[found[0].start..found[0].end], "{{topic}}");
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("name"));
        assert!(is_valid_name("user_id_2"));
        assert!(is_valid_name("_"));
        assert!(is_valid_name("42"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("first name"));
        assert!(!is_valid_name("a-b"));
        assert!(!is_valid_name("{x}"));
    }
}
