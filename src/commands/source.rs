//! Template source resolution shared by `vars` and `fill`.
//!
//! A source argument is one of:
//! - `-`: read the template from stdin
//! - a prompt ID (`PROMPT-NNN`): load the body of a library prompt
//! - anything else: read the template from that file path
//!
//! An existing file always wins over the prompt-ID interpretation, so a file
//! literally named `PROMPT-001` can still be used.

use crate::context::{WorkspaceContext, ensure_initialized};
use crate::error::{DistillError, Result};
use crate::library::{PromptFile, PromptIndex, looks_like_prompt_id, validate_prompt_id};
use crate::template::PromptTemplate;
use std::io::Read;
use std::path::Path;

/// Source argument meaning stdin.
pub const STDIN_SOURCE: &str = "-";

/// A template loaded from a source argument.
#[derive(Debug)]
pub struct LoadedTemplate {
    pub template: PromptTemplate,

    /// Prompt ID when the template came from the library.
    pub prompt_id: Option<String>,
}

/// Load the template named by `source`.
pub fn load_template(ctx: &WorkspaceContext, source: &str) -> Result<LoadedTemplate> {
    if source == STDIN_SOURCE {
        tracing::debug!("reading template from stdin");
        return Ok(LoadedTemplate {
            template: PromptTemplate::new(read_stdin()?),
            prompt_id: None,
        });
    }

    let path = Path::new(source);
    if looks_like_prompt_id(source) && !path.exists() {
        let (prompt_id, prompt) = load_library_prompt(ctx, source)?;
        return Ok(LoadedTemplate {
            template: prompt.template(),
            prompt_id: Some(prompt_id),
        });
    }

    tracing::debug!(path = %path.display(), "reading template file");
    let content = std::fs::read_to_string(path).map_err(|e| {
        DistillError::UserError(format!(
            "failed to read template file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(LoadedTemplate {
        template: PromptTemplate::new(content),
        prompt_id: None,
    })
}

/// Look up a prompt by ID in the workspace library.
///
/// Returns the normalized ID together with the parsed prompt file.
pub fn load_library_prompt(ctx: &WorkspaceContext, prompt_id: &str) -> Result<(String, PromptFile)> {
    ensure_initialized(ctx)?;
    let prompt_id = validate_prompt_id(prompt_id)?;

    let config = ctx.load_config()?;
    let prompts_dir = ctx.prompts_dir(&config);
    let index = PromptIndex::build(&prompts_dir)?;

    let info = index.find(&prompt_id).ok_or_else(|| {
        DistillError::UserError(format!(
            "prompt '{}' not found in '{}'.\n\n\
             Use `distill list` to see all prompts.",
            prompt_id,
            prompts_dir.display()
        ))
    })?;

    let prompt = PromptFile::load(&info.path)?;
    tracing::debug!(id = %prompt_id, path = %info.path.display(), "loaded library prompt");
    Ok((prompt_id, prompt))
}

/// Read all of stdin as UTF-8.
pub fn read_stdin() -> Result<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| DistillError::UserError(format!("failed to read stdin: {}", e)))?;
    Ok(content)
}
