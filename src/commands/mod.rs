//! Command implementations for scrip.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus small helpers shared by several commands.

mod adherence;
mod audit;
mod dose;
mod init;
mod issue;
mod new;
mod rules_cmd;
mod show;
mod status;
mod validate_cmd;
mod verify;

use crate::cli::{Command, RulesAction, RulesCommand};
use crate::config::Config;
use crate::context::StoreContext;
use crate::engine::ValidationEngine;
use crate::error::{Result, ScripError};
use crate::store::{RxIndex, RxInfo};

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init => init::cmd_init(),
        Command::New(args) => new::cmd_new(args),
        Command::Validate(args) => validate_cmd::cmd_validate(args),
        Command::Issue(args) => issue::cmd_issue(args),
        Command::Verify(args) => verify::cmd_verify(args),
        Command::Show(args) => show::cmd_show(args),
        Command::Status => status::cmd_status(),
        Command::Dose(args) => dose::cmd_dose(args),
        Command::Adherence(args) => adherence::cmd_adherence(args),
        Command::Rules(rules_cmd) => dispatch_rules(rules_cmd),
        Command::Audit => audit::cmd_audit(),
    }
}

/// Dispatch rules subcommands.
fn dispatch_rules(rules_cmd: RulesCommand) -> Result<()> {
    match rules_cmd.action {
        RulesAction::List => rules_cmd::cmd_rules_list(),
        RulesAction::Show(args) => rules_cmd::cmd_rules_show(args),
    }
}

/// Load the store config, falling back to defaults when missing.
pub(crate) fn load_config(ctx: &StoreContext) -> Config {
    Config::load(ctx.config_path()).unwrap_or_default()
}

/// Build the validation engine from the store's active rule set.
pub(crate) fn build_engine(ctx: &StoreContext, config: &Config) -> Result<ValidationEngine> {
    let rules = config.load_rules(ctx)?;
    ValidationEngine::new(rules)
}

/// Find a record by prescription ID, with a helpful error when missing.
pub(crate) fn find_record(ctx: &StoreContext, rx_id: &str) -> Result<RxInfo> {
    let index = RxIndex::build(ctx)?;
    index.find(rx_id).cloned().ok_or_else(|| {
        ScripError::UserError(format!(
            "unknown prescription '{}'.\n\
             Run `scrip status` to list records.",
            rx_id
        ))
    })
}
