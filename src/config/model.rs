//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for a distill workspace.
///
/// This struct represents the contents of `.distill/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library directory name under `.distill/` (default: "prompts").
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: String,

    /// Whether filling a library prompt appends a `fill` event to the usage log.
    #[serde(default = "default_true")]
    pub record_usage: bool,

    /// Maximum fills per calendar month (UTC). `None` means unlimited.
    #[serde(default)]
    pub monthly_fill_limit: Option<u32>,

    /// Treat `fill` as `fill --strict` by default.
    #[serde(default)]
    pub strict_fill: bool,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompts_dir: default_prompts_dir(),
            record_usage: default_true(),
            monthly_fill_limit: None,
            strict_fill: false,
            extra: BTreeMap::new(),
        }
    }
}
