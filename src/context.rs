//! Workspace context resolution for distill.
//!
//! A workspace is any directory containing a `.distill/` state directory.
//! Commands may be invoked from any subdirectory; resolution walks up to the
//! nearest ancestor that has one.

use crate::config::Config;
use crate::error::{DistillError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the workspace state directory.
pub const STATE_DIR_NAME: &str = ".distill";

/// Name of the config file within the state directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the usage log within the state directory.
pub const EVENTS_FILE_NAME: &str = "events.ndjson";

/// Name of the lock directory within the state directory.
pub const LOCKS_DIR_NAME: &str = "locks";

/// Resolved paths for a distill workspace. All paths are absolute.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    /// Directory containing `.distill/`.
    pub root: PathBuf,

    /// The `.distill/` state directory.
    pub state_dir: PathBuf,
}

impl WorkspaceContext {
    /// Resolve the workspace from the current working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            DistillError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd)
    }

    /// Resolve the workspace from a specific directory.
    ///
    /// Walks up from `dir` to the nearest ancestor containing `.distill/`.
    /// If there is none, `dir` itself becomes the root so that `init` can
    /// create the state directory there.
    pub fn resolve_from<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            env::current_dir()
                .map_err(|e| {
                    DistillError::UserError(format!(
                        "failed to get current working directory: {}",
                        e
                    ))
                })?
                .join(dir)
        };

        let root = dir
            .ancestors()
            .find(|candidate| candidate.join(STATE_DIR_NAME).is_dir())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dir.clone());

        tracing::debug!(root = %root.display(), "resolved workspace");

        Ok(Self {
            state_dir: root.join(STATE_DIR_NAME),
            root,
        })
    }

    /// Whether `.distill/` exists.
    pub fn is_initialized(&self) -> bool {
        self.state_dir.is_dir()
    }

    /// Path to `.distill/config.yaml`.
    pub fn config_path(&self) -> PathBuf {
        self.state_dir.join(CONFIG_FILE_NAME)
    }

    /// Path to `.distill/events.ndjson`.
    pub fn events_path(&self) -> PathBuf {
        self.state_dir.join(EVENTS_FILE_NAME)
    }

    /// Path to `.distill/locks/`.
    pub fn locks_dir(&self) -> PathBuf {
        self.state_dir.join(LOCKS_DIR_NAME)
    }

    /// Path to the lock serializing library writes.
    pub fn library_lock_path(&self) -> PathBuf {
        self.locks_dir().join("library.lock")
    }

    /// Path to the prompt library directory configured in `config`.
    pub fn prompts_dir(&self, config: &Config) -> PathBuf {
        self.state_dir.join(&config.prompts_dir)
    }

    /// Load the workspace config, using defaults if the file is absent.
    pub fn load_config(&self) -> Result<Config> {
        Config::load_or_default(self.config_path())
    }
}

/// Resolve the workspace and require that it has been initialized.
pub fn require_initialized_workspace() -> Result<WorkspaceContext> {
    let ctx = WorkspaceContext::resolve()?;
    ensure_initialized(&ctx)?;
    Ok(ctx)
}

/// Fail with a user error pointing at `distill init` if `.distill/` is missing.
pub fn ensure_initialized(ctx: &WorkspaceContext) -> Result<()> {
    if ctx.is_initialized() {
        Ok(())
    } else {
        Err(DistillError::UserError(format!(
            "no distill workspace found in '{}' or any parent directory.\n\n\
             Run `distill init` to create one.",
            ctx.root.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::DirGuard;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_uninitialized_uses_dir() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path()).unwrap();

        assert_eq!(ctx.root, temp_dir.path());
        assert_eq!(ctx.state_dir, temp_dir.path().join(".distill"));
        assert!(!ctx.is_initialized());
        assert!(ensure_initialized(&ctx).is_err());
    }

    #[test]
    fn test_resolve_walks_up_to_state_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(".distill")).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let ctx = WorkspaceContext::resolve_from(&nested).unwrap();

        assert_eq!(ctx.root, temp_dir.path());
        assert!(ctx.is_initialized());
        assert!(ensure_initialized(&ctx).is_ok());
    }

    #[test]
    fn test_paths() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path()).unwrap();
        let config = Config {
            prompts_dir: "library".to_string(),
            ..Config::default()
        };

        assert_eq!(ctx.config_path(), temp_dir.path().join(".distill/config.yaml"));
        assert_eq!(ctx.events_path(), temp_dir.path().join(".distill/events.ndjson"));
        assert_eq!(ctx.prompts_dir(&config), temp_dir.path().join(".distill/library"));
        assert_eq!(
            ctx.library_lock_path(),
            temp_dir.path().join(".distill/locks/library.lock")
        );
    }

    #[test]
    fn test_load_config_defaults_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path()).unwrap();

        assert_eq!(ctx.load_config().unwrap(), Config::default());
    }

    #[test]
    #[serial]
    fn test_require_initialized_from_cwd() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path());

        let err = require_initialized_workspace().unwrap_err();
        assert!(err.to_string().contains("distill init"));

        fs::create_dir_all(temp_dir.path().join(".distill")).unwrap();
        assert!(require_initialized_workspace().is_ok());
    }
}
