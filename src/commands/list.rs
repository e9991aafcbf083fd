//! Implementation of the `distill list` command.

use crate::cli::ListArgs;
use crate::context::{WorkspaceContext, require_initialized_workspace};
use crate::error::Result;
use crate::library::PromptIndex;

/// Execute the `distill list` command.
///
/// Prints one line per prompt: ID, title, and variable count.
pub fn cmd_list(args: ListArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let lines = list_lines(&ctx, args.search.as_deref(), args.tag.as_deref())?;

    if lines.is_empty() {
        println!("No prompts found.");
        if args.search.is_none() && args.tag.is_none() {
            println!();
            println!("Add one with `distill add \"<title>\" --file <path>`.");
        }
        return Ok(());
    }

    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

/// Format the listing rows for the matching prompts.
pub(crate) fn list_lines(
    ctx: &WorkspaceContext,
    query: Option<&str>,
    tag: Option<&str>,
) -> Result<Vec<String>> {
    let config = ctx.load_config()?;
    let index = PromptIndex::build(&ctx.prompts_dir(&config))?;

    let rows = index
        .search(query, tag)?
        .into_iter()
        .map(|(info, prompt)| {
            // Count from the body; the cached list may be stale after hand edits.
            let count = prompt.template().variables().len();
            let noun = if count == 1 { "variable" } else { "variables" };
            let mut line = format!(
                "{:<12} {}  ({} {})",
                info.id, prompt.frontmatter.title, count, noun
            );
            if !prompt.frontmatter.tags.is_empty() {
                line.push_str(&format!("  [{}]", prompt.frontmatter.tags.join(", ")));
            }
            line
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{PromptFile, PromptFrontmatter, generate_prompt_filename};
    use crate::test_support::create_test_workspace;

    fn add(ctx: &WorkspaceContext, id: &str, title: &str, tags: &[&str], body: &str) {
        let frontmatter = PromptFrontmatter {
            id: id.to_string(),
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        };
        let path = ctx
            .prompts_dir(&Default::default())
            .join(generate_prompt_filename(id, title));
        PromptFile::new(frontmatter, body).create(path).unwrap();
    }

    #[test]
    fn test_list_lines() {
        let (_temp_dir, ctx) = create_test_workspace();
        add(&ctx, "PROMPT-002", "Summarize", &[], "{{text}} {{n}}");
        add(&ctx, "PROMPT-001", "Greeting", &["social"], "Hi {{name}}");

        let lines = list_lines(&ctx, None, None).unwrap();

        assert_eq!(
            lines,
            vec![
                "PROMPT-001   Greeting  (1 variable)  [social]",
                "PROMPT-002   Summarize  (2 variables)",
            ]
        );
    }

    #[test]
    fn test_list_filters() {
        let (_temp_dir, ctx) = create_test_workspace();
        add(&ctx, "PROMPT-001", "Greeting", &["social"], "Hi {{name}}");
        add(&ctx, "PROMPT-002", "Summarize", &[], "{{text}}");

        let by_tag = list_lines(&ctx, None, Some("SOCIAL")).unwrap();
        assert_eq!(by_tag.len(), 1);
        assert!(by_tag[0].starts_with("PROMPT-001"));

        let by_query = list_lines(&ctx, Some("summ"), None).unwrap();
        assert_eq!(by_query.len(), 1);
        assert!(by_query[0].starts_with("PROMPT-002"));

        assert!(list_lines(&ctx, Some("missing"), None).unwrap().is_empty());
    }

    #[test]
    fn test_list_empty_library() {
        let (_temp_dir, ctx) = create_test_workspace();
        assert!(list_lines(&ctx, None, None).unwrap().is_empty());
    }
}
