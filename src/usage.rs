//! Monthly fill accounting.
//!
//! Usage is derived from the event log: every `fill` event in the current
//! calendar month (UTC) counts against `monthly_fill_limit`.

use crate::error::{DistillError, Result};
use crate::events::{Event, EventAction};
use chrono::{DateTime, Datelike, Utc};

/// Fill usage for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageSummary {
    /// Calendar year of the counted month.
    pub year: i32,
    /// Calendar month (1-12) of the counted month.
    pub month: u32,
    /// Fills recorded in the month.
    pub used: u32,
    /// Configured limit, `None` when unlimited.
    pub limit: Option<u32>,
}

impl UsageSummary {
    /// Count the `fill` events that fall in the UTC month containing `now`.
    pub fn compute(events: &[Event], limit: Option<u32>, now: DateTime<Utc>) -> Self {
        let (year, month) = (now.year(), now.month());

        let used = events
            .iter()
            .filter(|e| e.action == EventAction::Fill)
            .filter(|e| e.ts.year() == year && e.ts.month() == month)
            .count();

        Self {
            year,
            month,
            used: u32::try_from(used).unwrap_or(u32::MAX),
            limit,
        }
    }

    /// Fills left this month, `None` when unlimited.
    pub fn remaining(&self) -> Option<u32> {
        self.limit.map(|limit| limit.saturating_sub(self.used))
    }

    /// Whether the limit has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == Some(0)
    }

    /// `YYYY-MM` label for the counted month.
    pub fn period(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Fail with [`DistillError::LimitReached`] if no fills remain.
pub fn ensure_within_limit(summary: &UsageSummary) -> Result<()> {
    match summary.limit {
        Some(limit) if summary.is_exhausted() => Err(DistillError::LimitReached {
            used: summary.used,
            limit,
        }),
        _ => Ok(()),
    }
}
