//! Management command framework.
//!
//! This module provides the [`ManagementCommand`] trait for defining CLI
//! commands and [`CommandRegistry`] for registering and dispatching them.
//!
//! ## Defining a Custom Command
//!
//! ```rust
//! use std::io::Write;
//!
//! use portal_conf_cli::command::{CommandContext, ManagementCommand};
//! use portal_conf_core::ConfResult;
//!
//! struct DebugFlagCommand;
//!
//! impl ManagementCommand for DebugFlagCommand {
//!     fn name(&self) -> &'static str { "debugflag" }
//!     fn help(&self) -> &'static str { "Print the DEBUG setting" }
//!
//!     fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         ctx: &CommandContext<'_>,
//!         out: &mut dyn Write,
//!     ) -> ConfResult<()> {
//!         writeln!(out, "DEBUG = {}", ctx.settings.debug)?;
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::BTreeMap;
use std::io::Write;

use portal_conf_core::{ConfError, ConfResult, EnvSnapshot, Settings};

/// Name of the binary, used as the top-level clap command.
pub const BIN_NAME: &str = "portal-conf";

/// Everything a command may inspect: the assembled settings and the
/// environment they were built from.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    /// The assembled settings.
    pub settings: &'a Settings,
    /// The environment snapshot used to assemble them.
    pub env: &'a EnvSnapshot,
}

/// A management command that can be registered and invoked through the CLI.
///
/// Implementations define a name, help text, optional arguments, and a
/// handler that writes its report to `out`.
pub trait ManagementCommand: Send + Sync {
    /// Returns the name of this command (used to invoke it from the CLI).
    fn name(&self) -> &'static str;

    /// Returns a short help description for this command.
    fn help(&self) -> &'static str;

    /// Adds custom arguments to the clap command.
    ///
    /// The default implementation returns the command unchanged.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Executes the command with the given argument matches.
    fn handle(
        &self,
        matches: &clap::ArgMatches,
        ctx: &CommandContext<'_>,
        out: &mut dyn Write,
    ) -> ConfResult<()>;
}

/// A registry of management commands, keyed by name.
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub const fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Registers a management command.
    ///
    /// If a command with the same name already exists, it is replaced.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    /// Returns a reference to the command with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns all registered command names in sorted order.
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.keys().copied().collect()
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap `Command` with the global `--settings` and
    /// `--env-file` options and one subcommand per registered command.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new(BIN_NAME)
            .about("Inspect and validate the portal settings")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .value_name("FILE")
                    .global(true)
                    .help("Base settings file (TOML, or JSON by extension)"),
            )
            .arg(
                clap::Arg::new("env-file")
                    .long("env-file")
                    .value_name("FILE")
                    .global(true)
                    .help("Read variables from a .env file; the process environment wins"),
            );

        for cmd in self.commands.values() {
            let subcmd = clap::Command::new(cmd.name()).about(cmd.help());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }

        app
    }

    /// Dispatches to the subcommand selected in `matches`.
    pub fn execute(
        &self,
        matches: &clap::ArgMatches,
        ctx: &CommandContext<'_>,
        out: &mut dyn Write,
    ) -> ConfResult<()> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            ConfError::ConfigurationError("No subcommand specified".to_string())
        })?;

        let cmd = self
            .get(name)
            .ok_or_else(|| ConfError::ConfigurationError(format!("Unknown command: {name}")))?;

        tracing::debug!(command = name, "Running management command");
        cmd.handle(sub_matches, ctx, out)
    }
}
