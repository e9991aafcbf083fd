//! Append-only usage log for distill.
//!
//! Events are stored in NDJSON format (one JSON object per line) in
//! `.distill/events.ndjson`.
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: The action performed (`init`, `add`, `fill`)
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `prompt`: Optional prompt ID for prompt-specific events
//! - `details`: Freeform object with action-specific details
//!
//! ```no_run
//! use distill::context::WorkspaceContext;
//! use distill::events::{Event, EventAction, append_event};
//! use serde_json::json;
//!
//! let ctx = WorkspaceContext::resolve()?;
//! let event = Event::new(EventAction::Fill)
//!     .with_prompt("PROMPT-001")
//!     .with_details(json!({"variables": 2, "unresolved": 0}));
//! append_event(&ctx, &event)?;
//! # Ok::<(), distill::error::DistillError>(())
//! ```

use crate::context::WorkspaceContext;
use crate::error::{DistillError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Workspace initialization
    Init,
    /// Prompt added to the library
    Add,
    /// Prompt filled and written out
    Fill,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Init => write!(f, "init"),
            EventAction::Add => write!(f, "add"),
            EventAction::Fill => write!(f, "fill"),
        }
    }
}

/// An event record for the usage log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Optional prompt ID for prompt-specific events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Freeform details object with action-specific information.
    #[serde(default)]
    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            prompt: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the prompt ID for this event.
    pub fn with_prompt(mut self, prompt_id: impl Into<String>) -> Self {
        self.prompt = Some(prompt_id.into());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Override the timestamp.
    pub fn at(mut self, ts: DateTime<Utc>) -> Self {
        self.ts = ts;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            DistillError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Actor string for event metadata (`USER@HOSTNAME`).
pub(crate) fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the usage log.
///
/// The file is created if it doesn't exist. Each append writes exactly one
/// line with a trailing newline and syncs the file.
pub fn append_event(ctx: &WorkspaceContext, event: &Event) -> Result<()> {
    let events_file = ctx.events_path();
    let json_line = event.to_ndjson_line()?;

    if !ctx.state_dir.exists() {
        fs::create_dir_all(&ctx.state_dir).map_err(|e| {
            DistillError::UserError(format!(
                "failed to create state directory '{}': {}",
                ctx.state_dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            DistillError::UserError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        DistillError::UserError(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        DistillError::UserError(format!(
            "failed to sync events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    tracing::debug!(action = %event.action, prompt = ?event.prompt, "event appended");
    Ok(())
}

/// Read every event from the usage log, oldest first.
///
/// A missing log reads as empty. Blank lines are skipped; a malformed line
/// is a user error naming its line number.
pub fn read_events(ctx: &WorkspaceContext) -> Result<Vec<Event>> {
    let events_file = ctx.events_path();
    if !events_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&events_file).map_err(|e| {
        DistillError::UserError(format!(
            "failed to read events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    parse_events(&content).map_err(|(line_no, e)| {
        DistillError::UserError(format!(
            "malformed event on line {} of '{}': {}",
            line_no,
            events_file.display(),
            e
        ))
    })
}

fn parse_events(content: &str) -> std::result::Result<Vec<Event>, (usize, serde_json::Error)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| serde_json::from_str::<Event>(line).map_err(|e| (i + 1, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_workspace;
    use serde_json::json;

    #[test]
    fn test_event_creation() {
        let event = Event::new(EventAction::Init);

        assert_eq!(event.action, EventAction::Init);
        assert!(!event.actor.is_empty());
        assert!(event.prompt.is_none());
        let age = Utc::now().signed_duration_since(event.ts);
        assert!(age.num_minutes() < 1);
    }

    #[test]
    fn test_event_with_prompt_and_details() {
        let event = Event::new(EventAction::Fill)
            .with_prompt("PROMPT-007")
            .with_details(json!({"variables": 3, "unresolved": 1}));

        assert_eq!(event.prompt.as_deref(), Some("PROMPT-007"));
        assert_eq!(event.details["variables"], 3);
        assert_eq!(event.details["unresolved"], 1);
    }

    #[test]
    fn test_event_serialization_is_single_line() {
        let event = Event::new(EventAction::Add)
            .with_prompt("PROMPT-001")
            .with_details(json!({"title": "multi\nline"}));

        let json_line = event.to_ndjson_line().unwrap();

        assert!(!json_line.contains('\n'));
        assert!(json_line.contains("\"add\""));
        let parsed: Event = serde_json::from_str(&json_line).unwrap();
        assert_eq!(parsed.action, EventAction::Add);
        assert_eq!(parsed.details["title"], "multi\nline");
    }

    #[test]
    fn test_event_without_prompt_omits_field() {
        let json_line = Event::new(EventAction::Init).to_ndjson_line().unwrap();
        let parsed: Value = serde_json::from_str(&json_line).unwrap();
        assert!(parsed.get("prompt").is_none());
    }

    #[test]
    fn test_append_and_read_events() {
        let (_temp_dir, ctx) = create_test_workspace();

        append_event(&ctx, &Event::new(EventAction::Init)).unwrap();
        append_event(&ctx, &Event::new(EventAction::Add).with_prompt("PROMPT-001")).unwrap();
        append_event(&ctx, &Event::new(EventAction::Fill).with_prompt("PROMPT-001")).unwrap();

        let content = fs::read_to_string(ctx.events_path()).unwrap();
        assert!(content.ends_with('\n'));
        assert_eq!(content.lines().count(), 3);

        let events = read_events(&ctx).unwrap();
        let actions: Vec<_> = events.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![EventAction::Init, EventAction::Add, EventAction::Fill]
        );
        assert_eq!(events[2].prompt.as_deref(), Some("PROMPT-001"));
    }

    #[test]
    fn test_append_creates_state_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path()).unwrap();
        assert!(!ctx.state_dir.exists());

        append_event(&ctx, &Event::new(EventAction::Init)).unwrap();

        assert!(ctx.events_path().exists());
    }

    #[test]
    fn test_read_events_missing_file_is_empty() {
        let (_temp_dir, ctx) = create_test_workspace();
        assert!(read_events(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_read_events_skips_blank_lines() {
        let (_temp_dir, ctx) = create_test_workspace();
        let line = Event::new(EventAction::Fill).to_ndjson_line().unwrap();
        fs::write(ctx.events_path(), format!("\n{}\n\n{}\n", line, line)).unwrap();

        assert_eq!(read_events(&ctx).unwrap().len(), 2);
    }

    #[test]
    fn test_read_events_reports_malformed_line() {
        let (_temp_dir, ctx) = create_test_workspace();
        let line = Event::new(EventAction::Fill).to_ndjson_line().unwrap();
        fs::write(ctx.events_path(), format!("{}\nnot json\n", line)).unwrap();

        let err = read_events(&ctx).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_event_action_display() {
        assert_eq!(EventAction::Init.to_string(), "init");
        assert_eq!(EventAction::Add.to_string(), "add");
        assert_eq!(EventAction::Fill.to_string(), "fill");
    }

    #[test]
    fn test_get_actor_string() {
        assert!(get_actor_string().contains('@'));
    }
}
