//! Prompt index and naming.
//!
//! - Index: enumerate the library directory and map prompt IDs to files
//! - Prompt ID validation and generation
//! - Title slugification for prompt filenames

use super::PromptFile;
use crate::error::{DistillError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Prefix shared by every prompt ID and filename.
const PROMPT_ID_PREFIX: &str = "PROMPT-";

/// Maximum slug length in generated filenames.
const MAX_SLUG_LEN: usize = 50;

static PROMPT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PROMPT-\d{3,}$").expect("Invalid prompt ID regex"));

/// Location of a prompt in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInfo {
    /// The prompt ID (e.g., "PROMPT-001").
    pub id: String,

    /// Full path to the prompt file.
    pub path: PathBuf,

    /// Numeric part of the ID.
    pub number: u32,
}

/// Index of all prompts in a library directory.
#[derive(Debug, Default)]
pub struct PromptIndex {
    /// Prompts keyed by number, so iteration is in ID order.
    prompts: BTreeMap<u32, PromptInfo>,
}

impl PromptIndex {
    /// Build an index by scanning `dir` for `PROMPT-NNN-<slug>.md` files.
    ///
    /// A missing directory yields an empty index. Files that do not follow
    /// the naming scheme are ignored.
    pub fn build(dir: &Path) -> Result<Self> {
        let mut index = PromptIndex::default();

        if !dir.exists() {
            return Ok(index);
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            DistillError::UserError(format!(
                "failed to read prompt library '{}': {}",
                dir.display(),
                e
            ))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                DistillError::UserError(format!("failed to read directory entry: {}", e))
            })?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }

            let Some((id, number)) = extract_prompt_id_from_filename(&path) else {
                continue;
            };

            if let Some(existing) = index.prompts.get(&number) {
                tracing::warn!(
                    id = %id,
                    kept = %existing.path.display(),
                    ignored = %path.display(),
                    "duplicate prompt number in library"
                );
                continue;
            }

            index.prompts.insert(number, PromptInfo { id, path, number });
        }

        tracing::debug!(dir = %dir.display(), count = index.len(), "built prompt index");
        Ok(index)
    }

    /// Next unused prompt number, one past the highest indexed.
    pub fn next_number(&self) -> Result<u32> {
        let Some(&max) = self.prompts.keys().next_back() else {
            return Ok(1);
        };

        max.checked_add(1).ok_or_else(|| {
            DistillError::UserError(format!(
                "prompt numbers are exhausted: {} is the highest possible ID.\n\n\
                 Renumber or remove the prompt files with the largest numbers.",
                generate_prompt_id(max)
            ))
        })
    }

    /// Find a prompt by ID (case-insensitive).
    pub fn find(&self, prompt_id: &str) -> Option<&PromptInfo> {
        let normalized = prompt_id.to_uppercase();
        self.prompts.values().find(|info| info.id == normalized)
    }

    /// All prompts in ID order.
    pub fn all(&self) -> impl Iterator<Item = &PromptInfo> {
        self.prompts.values()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Load every indexed prompt in ID order.
    pub fn load_all(&self) -> Result<Vec<(PromptInfo, PromptFile)>> {
        self.all()
            .map(|info| Ok((info.clone(), PromptFile::load(&info.path)?)))
            .collect()
    }

    /// Load the prompts matching an optional query and tag, in ID order.
    pub fn search(
        &self,
        query: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Vec<(PromptInfo, PromptFile)>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|(_, prompt)| prompt.matches(query, tag))
            .collect())
    }
}

/// Extract the prompt ID and number from a filename like `PROMPT-012-slug.md`.
///
/// The ID must pass the same check as [`validate_prompt_id`], so every
/// indexed prompt can be looked up by its ID.
fn extract_prompt_id_from_filename(path: &Path) -> Option<(String, u32)> {
    let stem = path.file_stem()?.to_str()?;
    let rest = stem.strip_prefix(PROMPT_ID_PREFIX)?;
    let digits = rest.split('-').next()?;
    let id = format!("{}{}", PROMPT_ID_PREFIX, digits);

    if !PROMPT_ID_REGEX.is_match(&id) {
        tracing::warn!(
            path = %path.display(),
            "ignoring prompt file: name must start with PROMPT-NNN (at least three digits)"
        );
        return None;
    }

    let number = digits.parse().ok()?;
    Some((id, number))
}

/// Validate a prompt ID and normalize it to upper case.
///
/// Valid IDs match `PROMPT-NNN` where NNN is at least 3 digits. Path
/// traversal characters are rejected outright.
pub fn validate_prompt_id(prompt_id: &str) -> Result<String> {
    if prompt_id.contains('/') || prompt_id.contains('\\') || prompt_id.contains("..") {
        return Err(DistillError::UserError(format!(
            "invalid prompt ID '{}': contains path traversal characters.\n\
             Prompt IDs must be in the format PROMPT-NNN (e.g., PROMPT-001).",
            prompt_id
        )));
    }

    let normalized = prompt_id.to_uppercase();
    if !PROMPT_ID_REGEX.is_match(&normalized) {
        return Err(DistillError::UserError(format!(
            "invalid prompt ID '{}': must be in the format PROMPT-NNN (e.g., PROMPT-001).",
            prompt_id
        )));
    }

    Ok(normalized)
}

/// Whether `s` looks like a prompt ID (as opposed to a file path).
pub(crate) fn looks_like_prompt_id(s: &str) -> bool {
    PROMPT_ID_REGEX.is_match(&s.to_uppercase())
}

/// Format a prompt number as an ID, zero-padded to three digits.
pub fn generate_prompt_id(number: u32) -> String {
    format!("{}{:03}", PROMPT_ID_PREFIX, number)
}

/// Turn a title into a lowercase, hyphen-separated filename slug.
pub fn slugify_title(title: &str) -> String {
    let mut slug = String::new();
    let mut last_was_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen && !slug.is_empty() {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.len() > MAX_SLUG_LEN {
        match slug[..MAX_SLUG_LEN].rfind('-') {
            Some(pos) => slug.truncate(pos),
            None => slug.truncate(MAX_SLUG_LEN),
        }
    }

    if slug.is_empty() {
        slug = "untitled".to_string();
    }

    slug
}

/// Filename for a prompt: `PROMPT-NNN-<slug>.md`.
pub fn generate_prompt_filename(prompt_id: &str, title: &str) -> String {
    format!("{}-{}.md", prompt_id, slugify_title(title))
}
