//! The `diffsettings` management command.
//!
//! Prints the settings that differ from the built-in defaults, one
//! `KEY = value` line each, keys upper-cased and sorted. With `--all` every
//! setting is printed and the changed ones are marked with `###`. Secret
//! values are always masked.

use std::io::Write;

use portal_conf_core::{ConfResult, Settings};
use serde_json::Value;

use super::mask_secrets;
use crate::command::{CommandContext, ManagementCommand};

/// Displays differences between the current settings and the defaults.
pub struct DiffsettingsCommand;

fn to_masked_value(settings: &Settings) -> ConfResult<Value> {
    let mut value = serde_json::to_value(settings)?;
    mask_secrets(&mut value);
    Ok(value)
}

impl ManagementCommand for DiffsettingsCommand {
    fn name(&self) -> &'static str {
        "diffsettings"
    }

    fn help(&self) -> &'static str {
        "Display differences between the current settings and the defaults"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("all")
                .long("all")
                .action(clap::ArgAction::SetTrue)
                .help("Display all settings, marking the changed ones with ###"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        ctx: &CommandContext<'_>,
        out: &mut dyn Write,
    ) -> ConfResult<()> {
        let show_all = matches.get_flag("all");
        let current = to_masked_value(ctx.settings)?;
        let defaults = to_masked_value(&Settings::default())?;

        let (Value::Object(current), Value::Object(defaults)) = (current, defaults) else {
            return Ok(());
        };

        for (key, value) in &current {
            let changed = defaults.get(key) != Some(value);
            let name = key.to_uppercase();
            if changed && show_all {
                writeln!(out, "{name} = {value}  ###")?;
            } else if changed || show_all {
                writeln!(out, "{name} = {value}")?;
            }
        }
        Ok(())
    }
}
