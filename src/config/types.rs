//! Default values for config fields.

/// Default library directory name under `.distill/`.
pub const DEFAULT_PROMPTS_DIR: &str = "prompts";

// Default value functions for serde
pub(crate) fn default_prompts_dir() -> String {
    DEFAULT_PROMPTS_DIR.to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
