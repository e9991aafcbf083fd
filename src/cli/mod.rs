//! CLI argument parsing for distill.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Distill: fill `{{variable}}` prompt templates and keep a local prompt library.
///
/// Prompts are plain text with `{{name}}` placeholders. Placeholders without a
/// value are left untouched, so a partially filled prompt can be filled again
/// later.
#[derive(Parser, Debug)]
#[command(name = "distill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase diagnostic output (-v for info, -vv for debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for distill.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a distill workspace in the current directory.
    ///
    /// Creates `.distill/` with a default config and an empty prompt library.
    /// Safe to run again; existing files are left alone.
    Init,

    /// Add a prompt to the library.
    ///
    /// The template is read from `--file` or, if omitted, from stdin.
    Add(AddArgs),

    /// List prompts in the library.
    List(ListArgs),

    /// Show a prompt's metadata, variables, and template.
    Show(ShowArgs),

    /// Print the variables a template uses.
    Vars(VarsArgs),

    /// Fill a template's variables and print the result.
    ///
    /// Variables without a value are left as `{{name}}` and reported on
    /// stderr.
    Fill(FillArgs),

    /// Show this month's fill count and limit.
    Usage,
}

/// Arguments for the `add` command.
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Title for the new prompt.
    pub title: String,

    /// Read the template from this file instead of stdin.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Longer description of what the prompt is for.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Tags for categorization.
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only list prompts with this tag.
    #[arg(long)]
    pub tag: Option<String>,

    /// Only list prompts whose title, description, tags, or body contain this text.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Prompt ID to show (e.g., PROMPT-001).
    pub prompt_id: String,
}

/// Arguments for the `vars` command.
#[derive(Parser, Debug)]
pub struct VarsArgs {
    /// Prompt ID, template file path, or `-` for stdin.
    pub source: String,

    /// Print the names as a JSON array.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `fill` command.
#[derive(Parser, Debug)]
pub struct FillArgs {
    /// Prompt ID, template file path, or `-` for stdin.
    pub source: String,

    /// Bind a variable (`name=value`). Repeatable; overrides `--vars-file`.
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// YAML or JSON file mapping variable names to values.
    #[arg(long, value_name = "FILE")]
    pub vars_file: Option<PathBuf>,

    /// Fail (exit code 2) instead of printing an incomplete fill.
    #[arg(long)]
    pub strict: bool,

    /// Write the filled prompt to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
