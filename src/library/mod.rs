//! Prompt library for distill.
//!
//! Prompts are stored one per file in `.distill/<prompts_dir>/`, named
//! `PROMPT-NNN-<slug>.md`. Each file has YAML frontmatter followed by the
//! template body, which is kept byte-for-byte:
//!
//! ```text
//! ---
//! id: PROMPT-001
//! title: Code review
//! tags:
//!   - review
//! variables:
//!   - language
//!   - code
//! ---
//! Review this {{language}} code:
//!
//! {{code}}
//! ```
//!
//! The `variables` list is a cache of the body's extracted variables and is
//! rewritten whenever the file is saved.

use crate::error::{DistillError, Result};
use crate::template::{PromptTemplate, extract_variables};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod index;
mod io;

pub use index::{
    PromptIndex, PromptInfo, generate_prompt_filename, generate_prompt_id, slugify_title,
    validate_prompt_id,
};
pub(crate) use index::looks_like_prompt_id;

/// A parsed prompt file with frontmatter and template body.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptFile {
    /// The parsed frontmatter fields.
    pub frontmatter: PromptFrontmatter,
    /// The template text (everything after the closing `---` line).
    pub body: String,
}

/// Prompt frontmatter fields.
///
/// Unknown fields are preserved in `extra` for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptFrontmatter {
    /// Prompt identifier (e.g., "PROMPT-001").
    pub id: String,

    /// Short human-readable title.
    pub title: String,

    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tags for categorization and filtering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Cached variable names of the body, in first-occurrence order.
    #[serde(default)]
    pub variables: Vec<String>,

    /// Any fields not explicitly defined above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl PromptFile {
    /// Create a prompt with the variable cache already populated.
    pub fn new(frontmatter: PromptFrontmatter, body: impl Into<String>) -> Self {
        let mut prompt = Self {
            frontmatter,
            body: body.into(),
        };
        prompt.refresh_variables();
        prompt
    }

    /// The body as a template.
    pub fn template(&self) -> PromptTemplate {
        PromptTemplate::new(self.body.as_str())
    }

    /// Recompute the cached `variables` list from the body.
    pub fn refresh_variables(&mut self) {
        self.frontmatter.variables = extract_variables(&self.body);
    }

    /// Whether the prompt matches an optional search query and tag.
    ///
    /// The query is a case-insensitive substring match over title,
    /// description, tags, and body. The tag must match one of the prompt's
    /// tags exactly, ignoring case.
    pub fn matches(&self, query: Option<&str>, tag: Option<&str>) -> bool {
        let fm = &self.frontmatter;

        if let Some(tag) = tag
            && !fm.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
        {
            return false;
        }

        let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        let needle = query.to_lowercase();

        fm.title.to_lowercase().contains(&needle)
            || fm
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
            || fm.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            || self.body.to_lowercase().contains(&needle)
    }

    /// Parse a prompt file from its content string.
    ///
    /// The content must start with a `---` line, followed by YAML and a
    /// closing `---` line. LF and CRLF files are both accepted and the body
    /// keeps its original line endings.
    ///
    /// # Examples
    ///
    /// ```
    /// use distill::library::PromptFile;
    ///
    /// let content = "---\nid: PROMPT-001\ntitle: Greeting\n---\nHello {{name}}!\n";
    /// let prompt = PromptFile::parse(content).unwrap();
    /// assert_eq!(prompt.frontmatter.id, "PROMPT-001");
    /// assert_eq!(prompt.body, "Hello {{name}}!\n");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let (frontmatter_yaml, body) = split_frontmatter(content)?;

        let frontmatter: PromptFrontmatter = serde_yaml::from_str(frontmatter_yaml)
            .map_err(|e| {
                DistillError::UserError(format!("failed to parse prompt frontmatter: {}", e))
            })?;

        Ok(Self {
            frontmatter,
            body: body.to_string(),
        })
    }
}

/// Split content into the frontmatter YAML and the body.
fn split_frontmatter(content: &str) -> Result<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');

    let opening = lines.next().unwrap_or("");
    if opening.trim_end_matches(['\r', '\n']) != "---" {
        return Err(DistillError::UserError(
            "prompt file must start with a '---' frontmatter delimiter line".to_string(),
        ));
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return Ok((yaml, body));
        }
        offset += line.len();
    }

    Err(DistillError::UserError(
        "prompt file missing closing '---' frontmatter delimiter".to_string(),
    ))
}
