//! Error types for distill.
//!
//! The template engine itself never fails; these errors cover everything
//! around it (workspace resolution, the prompt library, config, usage limits).

use crate::exit_codes;
use thiserror::Error;

/// Main error type for distill operations.
///
/// Each variant maps to a specific process exit code.
#[derive(Error, Debug)]
pub enum DistillError {
    /// User provided invalid arguments or the workspace is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// A strict fill left variables without a value.
    #[error("unfilled variables: {}", .0.join(", "))]
    IncompleteFill(Vec<String>),

    /// The monthly fill limit has been used up.
    #[error("monthly fill limit reached ({used}/{limit}); raise monthly_fill_limit in config.yaml or wait for next month")]
    LimitReached { used: u32, limit: u32 },

    /// The library lock could not be acquired.
    #[error("{0}")]
    LockError(String),
}

impl DistillError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DistillError::UserError(_) => exit_codes::USER_ERROR,
            DistillError::IncompleteFill(_) => exit_codes::INCOMPLETE_FILL,
            DistillError::LimitReached { .. } => exit_codes::LIMIT_REACHED,
            DistillError::LockError(_) => exit_codes::LOCK_ERROR,
        }
    }
}

/// Result type alias for distill operations.
pub type Result<T> = std::result::Result<T, DistillError>;
