//! Implementation of the `distill usage` command.

use crate::context::{WorkspaceContext, require_initialized_workspace};
use crate::error::Result;
use crate::events::read_events;
use crate::usage::UsageSummary;
use chrono::{DateTime, Utc};

/// Execute the `distill usage` command.
///
/// Shows this month's library fill count against the configured limit.
pub fn cmd_usage() -> Result<()> {
    let ctx = require_initialized_workspace()?;
    print!("{}", usage_report(&ctx, Utc::now())?);
    Ok(())
}

pub(crate) fn usage_report(ctx: &WorkspaceContext, now: DateTime<Utc>) -> Result<String> {
    let config = ctx.load_config()?;
    let summary = UsageSummary::compute(&read_events(ctx)?, config.monthly_fill_limit, now);

    let mut out = String::new();
    out.push_str(&format!("Period:    {}\n", summary.period()));
    out.push_str(&format!("Fills:     {}\n", summary.used));
    match (summary.limit, summary.remaining()) {
        (Some(limit), Some(remaining)) => {
            out.push_str(&format!("Limit:     {}\n", limit));
            out.push_str(&format!("Remaining: {}\n", remaining));
        }
        _ => out.push_str("Limit:     unlimited\n"),
    }
    if !config.record_usage {
        out.push_str("\nUsage recording is off (record_usage: false); new fills are not counted.\n");
    }

    Ok(out)
}
