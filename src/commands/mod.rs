//! Command implementations for distill.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod add;
mod fill;
mod init;
mod list;
mod show;
mod source;
mod usage;
mod vars;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init => init::cmd_init(),
        Command::Add(args) => add::cmd_add(args),
        Command::List(args) => list::cmd_list(args),
        Command::Show(args) => show::cmd_show(args),
        Command::Vars(args) => vars::cmd_vars(args),
        Command::Fill(args) => fill::cmd_fill(args),
        Command::Usage => usage::cmd_usage(),
    }
}
