//! Implementation of the `distill vars` command.

use super::source::load_template;
use crate::cli::VarsArgs;
use crate::context::WorkspaceContext;
use crate::error::{DistillError, Result};

/// Execute the `distill vars` command.
///
/// Prints the template's variable names in first-occurrence order, one per
/// line, or as a JSON array with `--json`.
pub fn cmd_vars(args: VarsArgs) -> Result<()> {
    let ctx = WorkspaceContext::resolve()?;
    let loaded = load_template(&ctx, &args.source)?;
    let variables = loaded.template.variables();

    tracing::debug!(source = %args.source, count = variables.len(), "extracted variables");

    if args.json {
        println!("{}", format_json(&variables)?);
    } else if variables.is_empty() {
        eprintln!("No variables found.");
    } else {
        for name in &variables {
            println!("{}", name);
        }
    }

    Ok(())
}

fn format_json(variables: &[String]) -> Result<String> {
    serde_json::to_string(variables).map_err(|e| {
        DistillError::UserError(format!("failed to serialize variables to JSON: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::extract_variables;

    #[test]
    fn test_format_json() {
        let variables = extract_variables("{{b}} {{a}} {{b}}");
        assert_eq!(format_json(&variables).unwrap(), r#"["b","a"]"#);
    }

    #[test]
    fn test_format_json_empty() {
        assert_eq!(format_json(&[]).unwrap(), "[]");
    }
}
