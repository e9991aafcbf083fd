//! Filesystem utilities for distill.
//!
//! Prompt files and config are written atomically so an interrupted write
//! never leaves a half-written prompt in the library.

pub mod atomic;

pub use atomic::{atomic_write, atomic_write_file, write_new_file};
