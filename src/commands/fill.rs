//! Implementation of the `distill fill` command.
//!
//! # Flow
//!
//! 1. Load the template (library prompt, file, or stdin)
//! 2. For library prompts with usage recording on, check the monthly limit
//! 3. Collect bindings: `--vars-file` first, then `--set` on top
//! 4. Fill; in strict mode an incomplete fill fails before any output
//! 5. Write to `--output` (atomically) or stdout
//! 6. Report unfilled variables on stderr and log a `fill` event (a logging
//!    failure is a warning, since the output has already been delivered)

use super::source::load_template;
use crate::cli::FillArgs;
use crate::context::WorkspaceContext;
use crate::error::{DistillError, Result};
use crate::events::{Event, EventAction, append_event, read_events};
use crate::fs::atomic_write_file;
use crate::template::{Bindings, FilledPrompt, parse_assignment};
use crate::usage::{UsageSummary, ensure_within_limit};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::io::Write;
use std::path::Path;

/// Execute the `distill fill` command.
pub fn cmd_fill(args: FillArgs) -> Result<()> {
    let ctx = WorkspaceContext::resolve()?;
    let filled = run_fill(&ctx, &args, Utc::now())?;

    if !filled.is_complete() {
        eprintln!(
            "warning: {} unfilled variable{}: {}",
            filled.unresolved.len(),
            if filled.unresolved.len() == 1 { "" } else { "s" },
            filled.unresolved.join(", ")
        );
    }

    Ok(())
}

/// Fill the template named by `args.source` and write the result out.
///
/// `now` decides which month the usage limit is checked against.
pub(crate) fn run_fill(
    ctx: &WorkspaceContext,
    args: &FillArgs,
    now: DateTime<Utc>,
) -> Result<FilledPrompt> {
    let loaded = load_template(ctx, &args.source)?;
    let config = ctx.load_config()?;

    let record = loaded.prompt_id.is_some() && config.record_usage;
    if record {
        let summary = UsageSummary::compute(&read_events(ctx)?, config.monthly_fill_limit, now);
        ensure_within_limit(&summary)?;
    }

    let bindings = collect_bindings(args.vars_file.as_deref(), &args.set)?;
    let filled = loaded.template.render(&bindings);

    tracing::debug!(
        source = %args.source,
        bound = bindings.len(),
        unresolved = filled.unresolved.len(),
        "filled template"
    );

    if (args.strict || config.strict_fill) && !filled.is_complete() {
        return Err(DistillError::IncompleteFill(filled.unresolved));
    }

    match &args.output {
        Some(path) => {
            atomic_write_file(path, &filled.text)?;
            eprintln!("Wrote {}", path.display());
        }
        None => write_stdout(&filled.text)?,
    }

    if let Some(prompt_id) = loaded.prompt_id.as_deref()
        && record
    {
        let event = Event::new(EventAction::Fill)
            .with_prompt(prompt_id)
            .with_details(json!({
                "variables": loaded.template.variables().len(),
                "unresolved": filled.unresolved,
                "output": args
                    .output
                    .as_ref()
                    .map_or_else(|| "stdout".to_string(), |p| p.display().to_string()),
            }));
        // The prompt is already out; a logging failure must not turn that into an error.
        if let Err(e) = append_event(ctx, &event) {
            tracing::warn!(id = %prompt_id, error = %e, "fill not recorded in usage log");
        }
    }

    Ok(filled)
}

/// Build bindings from an optional variables file plus `name=value` assignments.
///
/// Assignments override values from the file; a later assignment overrides an
/// earlier one for the same name.
pub(crate) fn collect_bindings(vars_file: Option<&Path>, assignments: &[String]) -> Result<Bindings> {
    let mut bindings = match vars_file {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                DistillError::UserError(format!(
                    "failed to read variables file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Bindings::from_yaml(&content).map_err(|e| {
                DistillError::UserError(format!("{} ('{}')", e, path.display()))
            })?
        }
        None => Bindings::new(),
    };

    let overrides = assignments
        .iter()
        .map(|a| parse_assignment(a))
        .collect::<Result<Bindings>>()?;
    bindings.merge(overrides);

    Ok(bindings)
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| DistillError::UserError(format!("failed to write to stdout: {}", e)))
}
