//! Prompt template engine.
//!
//! This module provides:
//!
//! - **Scanner**: locates `{{name}}` placeholders in free text
//! - **Extraction**: the distinct variable names of a template, in order
//! - **Filling**: single-pass substitution of bound values
//! - **Bindings**: the explicit name-to-value mapping used for filling
//!
//! # Template Syntax
//!
//! ```text
//! Summarize the following {{language}} code for a {{audience}}:
//!
//! {{ code }}
//! ```
//!
//! A placeholder name is one or more of `A-Z`, `a-z`, `0-9`, `_`, optionally
//! padded with spaces or tabs inside the braces. Anything else between `{{`
//! and `}}` is left alone as literal text.
//!
//! # Unresolved placeholders
//!
//! Filling never fails. A placeholder whose name is unbound, or bound to an
//! empty or whitespace-only value, is copied to the output verbatim so the
//! caller can still see what is missing.

mod bindings;
mod fill;
mod prompt;
mod scanner;

pub use bindings::{Bindings, parse_assignment};
pub use fill::{extract_variables, fill_variables, has_placeholders, is_complete, missing_variables};
pub use prompt::{FilledPrompt, PromptTemplate};
pub use scanner::{Placeholder, is_valid_name, placeholders};
