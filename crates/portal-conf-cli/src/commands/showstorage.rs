//! The `showstorage` management command.

use std::io::Write;

use portal_conf_core::ConfResult;
use serde_json::Value;

use super::mask_secrets;
use crate::command::{CommandContext, ManagementCommand};

/// Prints the resolved storage settings as pretty JSON.
pub struct ShowstorageCommand;

impl ManagementCommand for ShowstorageCommand {
    fn name(&self) -> &'static str {
        "showstorage"
    }

    fn help(&self) -> &'static str {
        "Display the resolved storage provider, backends and public URLs"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("show-secrets")
                .long("show-secrets")
                .action(clap::ArgAction::SetTrue)
                .help("Print the secret access key instead of masking it"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        ctx: &CommandContext<'_>,
        out: &mut dyn Write,
    ) -> ConfResult<()> {
        let resolved = portal_conf_storage::resolve(ctx.env)?;

        let mut map = resolved.to_settings_map();
        map.insert(
            "PROVIDER".to_string(),
            Value::String(resolved.provider.as_str().to_string()),
        );
        let mut value = Value::Object(map);
        if !matches.get_flag("show-secrets") {
            mask_secrets(&mut value);
        }

        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        Ok(())
    }
}
