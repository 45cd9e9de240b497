//! The `check` management command.
//!
//! Runs the system checks against the assembled settings and reports every
//! finding. Only errors make the command fail.

use std::io::Write;

use portal_conf_core::checks::{CheckLevel, CheckRegistry};
use portal_conf_core::{ConfError, ConfResult};
use portal_conf_storage::register_storage_checks;

use crate::command::{CommandContext, ManagementCommand};

/// Runs system checks to validate the portal configuration.
pub struct CheckCommand;

/// The core checks plus the storage checks.
pub fn default_check_registry() -> CheckRegistry {
    let mut registry = CheckRegistry::with_builtins();
    register_storage_checks(&mut registry);
    registry
}

impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Run system checks"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("tag")
                .long("tag")
                .short('t')
                .action(clap::ArgAction::Append)
                .help("Only run checks with this tag"),
        )
        .arg(
            clap::Arg::new("list-tags")
                .long("list-tags")
                .action(clap::ArgAction::SetTrue)
                .help("List available tags"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        ctx: &CommandContext<'_>,
        out: &mut dyn Write,
    ) -> ConfResult<()> {
        let registry = default_check_registry();

        if matches.get_flag("list-tags") {
            for tag in registry.tags() {
                writeln!(out, "{tag}")?;
            }
            return Ok(());
        }

        let tags: Option<Vec<&str>> = matches
            .get_many::<String>("tag")
            .map(|values| values.map(String::as_str).collect());
        let messages = registry.run_checks(tags.as_deref(), ctx.settings, ctx.env);

        if messages.is_empty() {
            writeln!(out, "System check identified no issues.")?;
            return Ok(());
        }

        let errors = messages.iter().filter(|m| m.level >= CheckLevel::Error).count();
        for msg in &messages {
            writeln!(out, "{msg}")?;
        }
        writeln!(
            out,
            "System check identified {} issue(s) ({errors} error(s)).",
            messages.len()
        )?;
        tracing::info!(issues = messages.len(), errors, "System check finished");

        if errors > 0 {
            return Err(ConfError::ConfigurationError(format!(
                "System check found {errors} error(s)"
            )));
        }
        Ok(())
    }
}
