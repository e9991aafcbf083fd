//! File I/O operations for prompt files.

use super::PromptFile;
use crate::error::{DistillError, Result};
use std::path::Path;

impl PromptFile {
    /// Load a prompt file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DistillError::UserError(format!(
                "failed to read prompt file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content).map_err(|e| {
            DistillError::UserError(format!("{} ('{}')", e, path.display()))
        })
    }

    /// Atomically save the prompt file, refreshing the variable cache first.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.refresh_variables();
        let content = self.to_string()?;
        crate::fs::atomic_write_file(path, &content)
    }

    /// Create the prompt file on disk, failing if the path already exists.
    pub fn create<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.refresh_variables();
        let content = self.to_string()?;
        crate::fs::write_new_file(path, &content)
    }

    /// Serialize the prompt file to a string.
    pub fn to_string(&self) -> Result<String> {
        let frontmatter_yaml = serde_yaml::to_string(&self.frontmatter).map_err(|e| {
            DistillError::UserError(format!("failed to serialize prompt frontmatter: {}", e))
        })?;

        let mut output = String::with_capacity(frontmatter_yaml.len() + self.body.len() + 8);
        output.push_str("---\n");
        output.push_str(&frontmatter_yaml);
        output.push_str("---\n");
        output.push_str(&self.body);

        Ok(output)
    }
}
