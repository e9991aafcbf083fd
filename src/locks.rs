//! Lock files for serializing library writes.
//!
//! `add` picks the next free prompt number from a directory scan and then
//! writes the file. Two processes doing that at once would both pick the same
//! number, so the scan-and-write runs under `.distill/locks/library.lock`.
//!
//! Locks are created with create-new semantics and hold JSON metadata naming
//! the owner. A [`LockGuard`] deletes the file when dropped.

use crate::context::WorkspaceContext;
use crate::error::{DistillError, Result};
use crate::events::get_actor_string;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// How long to wait for a held lock before giving up.
const LOCK_WAIT: Duration = Duration::from_secs(5);

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Metadata stored in a lock file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockMetadata {
    /// Owner of the lock (e.g., `user@HOST`).
    pub owner: String,

    /// Process ID of the lock holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,

    pub created_at: DateTime<Utc>,

    /// The command holding the lock.
    pub action: String,
}

impl LockMetadata {
    pub fn new(action: &str) -> Self {
        Self {
            owner: get_actor_string(),
            pid: Some(std::process::id()),
            created_at: Utc::now(),
            action: action.to_string(),
        }
    }

    /// Parse lock metadata from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DistillError::UserError(format!(
                "failed to read lock file '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            DistillError::UserError(format!(
                "failed to parse lock file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Human-readable age, e.g. `3m` or `2h 5m`.
    pub fn age_string(&self) -> String {
        let age = Utc::now().signed_duration_since(self.created_at);
        let (minutes, hours, days) = (age.num_minutes(), age.num_hours(), age.num_days());

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else {
            format!("{}m", minutes)
        }
    }
}

/// RAII guard for a lock file. Dropping it deletes the file.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release lock");
        }
    }
}

/// Acquire the library lock, waiting for a concurrent holder to finish.
pub fn acquire_library_lock(ctx: &WorkspaceContext, action: &str) -> Result<LockGuard> {
    acquire_lock(&ctx.library_lock_path(), action, LOCK_WAIT)
}

/// Acquire `lock_path`, polling until `wait` has elapsed.
fn acquire_lock(lock_path: &Path, action: &str, wait: Duration) -> Result<LockGuard> {
    let deadline = Instant::now() + wait;
    let metadata = LockMetadata::new(action);

    loop {
        if let Some(guard) = try_acquire(lock_path, &metadata)? {
            tracing::debug!(path = %lock_path.display(), action, "lock acquired");
            return Ok(guard);
        }

        if Instant::now() >= deadline {
            return Err(held_error(lock_path));
        }
        thread::sleep(LOCK_POLL_INTERVAL);
    }
}

/// Create the lock file exclusively. `Ok(None)` means it is already held.
fn try_acquire(lock_path: &Path, metadata: &LockMetadata) -> Result<Option<LockGuard>> {
    if let Some(parent) = lock_path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            DistillError::UserError(format!(
                "failed to create locks directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(lock_path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(DistillError::LockError(format!(
                "failed to acquire lock '{}': {}",
                lock_path.display(),
                e
            )));
        }
    };

    // From here on the guard owns the file and removes it on any error.
    let guard = LockGuard {
        path: lock_path.to_path_buf(),
    };

    let json = serde_json::to_string_pretty(metadata).map_err(|e| {
        DistillError::LockError(format!("failed to serialize lock metadata: {}", e))
    })?;
    file.write_all(json.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| DistillError::LockError(format!("failed to write lock metadata: {}", e)))?;

    Ok(Some(guard))
}

fn held_error(lock_path: &Path) -> DistillError {
    let holder = match LockMetadata::from_file(lock_path) {
        Ok(meta) => format!(
            " (created {} ago by {} for `{}`)",
            meta.age_string(),
            meta.owner,
            meta.action
        ),
        Err(_) => String::new(),
    };

    DistillError::LockError(format!(
        "library lock is held by another process{}.\n\n\
         If no other distill command is running, delete '{}' and retry.",
        holder,
        lock_path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_workspace;

    #[test]
    fn test_acquire_writes_metadata_and_releases_on_drop() {
        let (_temp_dir, ctx) = create_test_workspace();

        let guard = acquire_library_lock(&ctx, "add").unwrap();
        assert_eq!(guard.path(), ctx.library_lock_path());

        let meta = LockMetadata::from_file(guard.path()).unwrap();
        assert_eq!(meta.action, "add");
        assert_eq!(meta.pid, Some(std::process::id()));
        assert!(meta.owner.contains('@'));

        drop(guard);
        assert!(!ctx.library_lock_path().exists());
    }

    #[test]
    fn test_held_lock_times_out_with_lock_error() {
        let (_temp_dir, ctx) = create_test_workspace();
        let _held = acquire_library_lock(&ctx, "add").unwrap();

        let err = acquire_lock(&ctx.library_lock_path(), "add", Duration::ZERO).unwrap_err();

        assert!(matches!(err, DistillError::LockError(_)));
        assert_eq!(err.exit_code(), crate::exit_codes::LOCK_ERROR);
        let message = err.to_string();
        assert!(message.contains("held by another process"));
        assert!(message.contains("for `add`"));
        assert!(message.contains("library.lock"));
    }

    #[test]
    fn test_waits_for_holder_to_release() {
        let (_temp_dir, ctx) = create_test_workspace();
        let held = acquire_library_lock(&ctx, "add").unwrap();

        let releaser = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            drop(held);
        });

        let guard = acquire_lock(&ctx.library_lock_path(), "add", Duration::from_secs(5)).unwrap();
        releaser.join().unwrap();
        assert!(guard.path().exists());
    }

    #[test]
    fn test_held_error_without_readable_metadata() {
        let (_temp_dir, ctx) = create_test_workspace();
        fs::create_dir_all(ctx.locks_dir()).unwrap();
        fs::write(ctx.library_lock_path(), "garbage").unwrap();

        let err = acquire_lock(&ctx.library_lock_path(), "add", Duration::ZERO).unwrap_err();
        assert!(err.to_string().starts_with("library lock is held by another process."));
    }
}
