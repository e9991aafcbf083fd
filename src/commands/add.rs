//! Implementation of the `distill add` command.
//!
//! Stores a new prompt in the workspace library.

use super::source::read_stdin;
use crate::cli::AddArgs;
use crate::context::{WorkspaceContext, require_initialized_workspace};
use crate::error::{DistillError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::library::{
    PromptFile, PromptFrontmatter, PromptIndex, generate_prompt_filename, generate_prompt_id,
};
use crate::locks;
use chrono::Utc;
use serde_json::json;
use std::path::PathBuf;

/// Execute the `distill add` command.
///
/// Creates `PROMPT-NNN-<slug>.md` with the next free number. The template
/// comes from `--file`, or from stdin when no file is given.
pub fn cmd_add(args: AddArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let body = match &args.file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            DistillError::UserError(format!(
                "failed to read template file '{}': {}",
                path.display(),
                e
            ))
        })?,
        None => read_stdin()?,
    };

    let (prompt, path) = add_prompt(&ctx, args, body)?;
    let fm = &prompt.frontmatter;

    println!("Created prompt: {}", fm.id);
    println!();
    println!("  Title:     {}", fm.title);
    println!("  Path:      {}", path.display());
    if fm.variables.is_empty() {
        println!("  Variables: (none)");
    } else {
        println!("  Variables: {}", fm.variables.join(", "));
    }
    println!();
    println!("Fill it with `distill fill {}`", fm.id);

    Ok(())
}

/// Write a new prompt into the library and log it.
pub(crate) fn add_prompt(
    ctx: &WorkspaceContext,
    args: AddArgs,
    body: String,
) -> Result<(PromptFile, PathBuf)> {
    let title = args.title.trim();
    if title.is_empty() {
        return Err(DistillError::UserError(
            "prompt title must not be empty".to_string(),
        ));
    }
    if body.trim().is_empty() {
        return Err(DistillError::UserError(
            "prompt template is empty.\n\n\
             Pass the template with --file PATH or pipe it on stdin."
                .to_string(),
        ));
    }

    let config = ctx.load_config()?;
    let prompts_dir = ctx.prompts_dir(&config);

    // Held until the file and its event are written, so concurrent adds
    // never pick the same number.
    let _library_lock = locks::acquire_library_lock(ctx, "add")?;

    let index = PromptIndex::build(&prompts_dir)?;
    let prompt_id = generate_prompt_id(index.next_number()?);
    let filename = generate_prompt_filename(&prompt_id, title);
    let path = prompts_dir.join(&filename);

    let tags = args
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let frontmatter = PromptFrontmatter {
        id: prompt_id.clone(),
        title: title.to_string(),
        description: args.description.filter(|d| !d.trim().is_empty()),
        tags,
        created: Some(Utc::now()),
        ..Default::default()
    };

    let mut prompt = PromptFile::new(frontmatter, body);
    prompt.create(&path)?;

    let event = Event::new(EventAction::Add)
        .with_prompt(&prompt_id)
        .with_details(json!({
            "title": title,
            "filename": filename,
            "variables": prompt.frontmatter.variables,
        }));
    append_event(ctx, &event)?;

    tracing::info!(
        id = %prompt_id,
        variables = prompt.frontmatter.variables.len(),
        "prompt added"
    );

    Ok((prompt, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::read_events;
    use crate::test_support::create_test_workspace;
    use std::fs;
    use std::thread;

    fn args(title: &str, tags: &[&str]) -> AddArgs {
        AddArgs {
            title: title.to_string(),
            file: None,
            description: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_add_creates_numbered_prompt() {
        let (_temp_dir, ctx) = create_test_workspace();

        let (first, first_path) =
            add_prompt(&ctx, args("Code review", &["review", " "]), "Review {{code}}".into())
                .unwrap();
        let (second, second_path) =
            add_prompt(&ctx, args("Summarize", &[]), "Summarize {{text}} in {{n}} words".into())
                .unwrap();

        assert_eq!(first.frontmatter.id, "PROMPT-001");
        assert_eq!(first.frontmatter.tags, vec!["review"]);
        assert!(first_path.ends_with("PROMPT-001-code-review.md"));
        assert_eq!(second.frontmatter.id, "PROMPT-002");
        assert_eq!(second.frontmatter.variables, vec!["text", "n"]);
        assert!(second_path.ends_with("PROMPT-002-summarize.md"));

        let loaded = PromptFile::load(&second_path).unwrap();
        assert_eq!(loaded.body, "Summarize {{text}} in {{n}} words");
        assert!(loaded.frontmatter.created.is_some());
    }

    #[test]
    fn test_add_logs_event() {
        let (_temp_dir, ctx) = create_test_workspace();
        add_prompt(&ctx, args("Greeting", &[]), "Hi {{name}}".into()).unwrap();

        let events = read_events(&ctx).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, EventAction::Add);
        assert_eq!(events[0].prompt.as_deref(), Some("PROMPT-001"));
        assert_eq!(events[0].details["variables"][0], "name");
    }

    #[test]
    fn test_concurrent_adds_get_distinct_ids() {
        for _ in 0..20 {
            let (_temp_dir, ctx) = create_test_workspace();

            let ids: Vec<String> = thread::scope(|s| {
                let handles: Vec<_> = ["Alpha", "Beta", "Gamma"]
                    .into_iter()
                    .map(|title| {
                        let ctx = &ctx;
                        s.spawn(move || {
                            let (prompt, _) =
                                add_prompt(ctx, args(title, &[]), format!("{} {{{{x}}}}", title))
                                    .unwrap();
                            prompt.frontmatter.id
                        })
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().unwrap()).collect()
            });

            let mut sorted = ids.clone();
            sorted.sort();
            assert_eq!(sorted, vec!["PROMPT-001", "PROMPT-002", "PROMPT-003"]);

            let config = ctx.load_config().unwrap();
            let index = PromptIndex::build(&ctx.prompts_dir(&config)).unwrap();
            assert_eq!(index.len(), 3);
            assert!(!ctx.library_lock_path().exists());
        }
    }

    #[test]
    fn test_add_fails_while_library_locked_elsewhere() {
        let (_temp_dir, ctx) = create_test_workspace();
        fs::create_dir_all(ctx.locks_dir()).unwrap();
        fs::write(ctx.library_lock_path(), "{}").unwrap();
        let started = std::time::Instant::now();

        let err = add_prompt(&ctx, args("Blocked", &[]), "{{x}}".into()).unwrap_err();

        assert!(matches!(err, DistillError::LockError(_)));
        assert!(started.elapsed() >= std::time::Duration::from_secs(1));
        let config = ctx.load_config().unwrap();
        assert!(PromptIndex::build(&ctx.prompts_dir(&config)).unwrap().is_empty());
    }

    #[test]
    fn test_add_rejects_empty_template() {
        let (_temp_dir, ctx) = create_test_workspace();

        let err = add_prompt(&ctx, args("Empty", &[]), "  \n".into()).unwrap_err();
        assert!(err.to_string().contains("template is empty"));
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let (_temp_dir, ctx) = create_test_workspace();

        assert!(add_prompt(&ctx, args("   ", &[]), "body".into()).is_err());
    }

    #[test]
    fn test_add_keeps_template_without_variables() {
        let (_temp_dir, ctx) = create_test_workspace();

        let (prompt, _) = add_prompt(&ctx, args("Static", &[]), "No placeholders.".into())
            .unwrap();
        assert!(prompt.frontmatter.variables.is_empty());
    }
}
