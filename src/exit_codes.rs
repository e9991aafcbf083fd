//! Exit code constants for the distill CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing workspace, unreadable files)
//! - 2: Incomplete fill (`--strict` with unbound variables)
//! - 3: Monthly fill limit reached
//! - 4: Library lock held by another process

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid state, or unreadable input.
pub const USER_ERROR: i32 = 1;

/// A strict fill left one or more variables unresolved.
pub const INCOMPLETE_FILL: i32 = 2;

/// The configured monthly fill limit has been used up.
pub const LIMIT_REACHED: i32 = 3;

/// Another process holds the library lock.
pub const LOCK_ERROR: i32 = 4;
