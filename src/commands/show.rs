//! Implementation of the `distill show` command.
//!
//! Displays the metadata, variables, and template of a library prompt.

use super::source::load_library_prompt;
use crate::cli::ShowArgs;
use crate::context::require_initialized_workspace;
use crate::error::Result;
use crate::library::PromptFile;

const RULE: &str =
    "================================================================================";

/// Execute the `distill show` command.
pub fn cmd_show(args: ShowArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let (_, prompt) = load_library_prompt(&ctx, &args.prompt_id)?;

    print!("{}", render_prompt(&prompt));
    Ok(())
}

/// Render a prompt for display.
pub(crate) fn render_prompt(prompt: &PromptFile) -> String {
    let fm = &prompt.frontmatter;
    let mut out = String::new();

    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("{}: {}\n", fm.id, fm.title));
    out.push_str(RULE);
    out.push_str("\n\n");

    if let Some(description) = &fm.description {
        out.push_str(&format!("Description: {}\n", description));
    }
    if !fm.tags.is_empty() {
        out.push_str(&format!("Tags:        {}\n", fm.tags.join(", ")));
    }
    if let Some(created) = fm.created {
        out.push_str(&format!(
            "Created:     {}\n",
            created.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    let variables = prompt.template().variables();
    out.push('\n');
    if variables.is_empty() {
        out.push_str("Variables: (none)\n");
    } else {
        out.push_str("Variables:\n");
        for name in &variables {
            out.push_str(&format!("  - {}\n", name));
        }
    }

    out.push('\n');
    out.push_str("Template:\n");
    out.push_str("--------------------------------------------------------------------------------\n");
    out.push_str(&prompt.body);
    if !prompt.body.ends_with('\n') {
        out.push('\n');
    }

    out
}
