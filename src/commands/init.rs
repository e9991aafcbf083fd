//! Implementation of the `distill init` command.
//!
//! Creates the workspace state directory:
//!
//! ```text
//! .distill/
//!   config.yaml     default configuration (if missing)
//!   events.ndjson   usage log (appended)
//!   prompts/        prompt library (or the configured `prompts_dir`)
//! ```
//!
//! The command is idempotent: running it again leaves existing files alone.

use crate::config::Config;
use crate::context::WorkspaceContext;
use crate::error::{DistillError, Result};
use crate::events::{Event, EventAction, append_event};
use crate::fs::write_new_file;
use serde_json::json;
use std::fs;

/// Header written above the default config.
const CONFIG_HEADER: &str = "\
# distill workspace configuration
#
# prompts_dir:        library directory under .distill/
# record_usage:       log each library fill to events.ndjson
# monthly_fill_limit: cap on library fills per calendar month (null = unlimited)
# strict_fill:        fail instead of printing prompts with unfilled variables
";

/// Execute the `distill init` command.
pub fn cmd_init() -> Result<()> {
    let ctx = WorkspaceContext::resolve()?;
    let report = init_workspace(&ctx)?;

    if report.created_state_dir {
        println!("Initialized distill workspace in {}", ctx.state_dir.display());
    } else {
        println!("distill workspace already exists at {}", ctx.state_dir.display());
    }
    if report.created_config {
        println!("  Created {}", ctx.config_path().display());
    }
    println!("  Prompt library: {}", report.prompts_dir.display());

    Ok(())
}

/// What `init_workspace` created.
#[derive(Debug)]
pub(crate) struct InitReport {
    pub created_state_dir: bool,
    pub created_config: bool,
    pub prompts_dir: std::path::PathBuf,
}

/// Create the state directory, default config, and prompt library.
pub(crate) fn init_workspace(ctx: &WorkspaceContext) -> Result<InitReport> {
    let created_state_dir = !ctx.is_initialized();
    create_dir(&ctx.state_dir)?;

    let config_path = ctx.config_path();
    let created_config = !config_path.exists();
    if created_config {
        let content = format!("{}\n{}", CONFIG_HEADER, Config::default().to_yaml()?);
        write_new_file(&config_path, &content)?;
    }

    let config = ctx.load_config()?;
    let prompts_dir = ctx.prompts_dir(&config);
    create_dir(&prompts_dir)?;

    let event = Event::new(EventAction::Init).with_details(json!({
        "created": created_state_dir,
        "prompts_dir": config.prompts_dir,
    }));
    append_event(ctx, &event)?;

    tracing::info!(
        root = %ctx.root.display(),
        created = created_state_dir,
        "workspace initialized"
    );

    Ok(InitReport {
        created_state_dir,
        created_config,
        prompts_dir,
    })
}

fn create_dir(path: &std::path::Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        DistillError::UserError(format!(
            "failed to create directory '{}': {}",
            path.display(),
            e
        ))
    })
}
