//! Distill: a `{{variable}}` prompt template engine with a local prompt library.
//!
//! The core is [`template`]: [`template::extract_variables`] lists the
//! variables a template uses and [`template::fill_variables`] substitutes
//! bound values in a single pass, leaving anything unbound as written.
//!
//! ```
//! use distill::template::{Bindings, extract_variables, fill_variables};
//!
//! let template = "Hi {{name}}, welcome to {{ place }}. Bye {{name}}.";
//! assert_eq!(extract_variables(template), vec!["name", "place"]);
//!
//! let bindings: Bindings = [("name", "Ada")].into_iter().collect();
//! assert_eq!(
//!     fill_variables(template, &bindings),
//!     "Hi Ada, welcome to {{ place }}. Bye Ada."
//! );
//! ```
//!
//! The remaining modules back the `distill` CLI: a workspace (`.distill/`)
//! holding a prompt library, a config file, and a usage log.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod library;
pub mod locks;
pub mod logging;
pub mod template;
pub mod usage;

#[cfg(test)]
pub(crate) mod test_support;
