//! # portal-conf-cli
//!
//! Management commands for the portal settings: `check`, `diffsettings`
//! and `showstorage`.
//!
//! Every invocation assembles the settings the same way the application does
//! at startup (optional base file, optional `.env` file, then the
//! initializers), so a failing command means a failing deployment.
//!
//! ## Quick Start
//!
//! ```rust
//! use portal_conf_cli::default_registry;
//!
//! let registry = default_registry();
//! assert_eq!(registry.list_commands(), vec!["check", "diffsettings", "showstorage"]);
//! ```

pub mod command;
pub mod commands;

pub use command::{CommandContext, CommandRegistry, ManagementCommand};

use std::ffi::OsString;
use std::io::Write;

use portal_conf_core::settings::LazySettings;
use portal_conf_core::{settings_loader, ConfError, ConfResult, EnvSnapshot, Settings};

/// A registry holding every built-in command.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    commands::register_builtin_commands(&mut registry);
    registry
}

/// Builds the environment for an invocation: `base`, on top of the
/// `--env-file` contents when one was given.
pub fn env_from_matches(matches: &clap::ArgMatches, base: &EnvSnapshot) -> ConfResult<EnvSnapshot> {
    match matches.get_one::<String>("env-file") {
        Some(path) => EnvSnapshot::from_dotenv_file_under(path, base),
        None => Ok(base.clone()),
    }
}

/// Loads the `--settings` base file (or defaults) and runs the initializers.
pub fn load_settings(matches: &clap::ArgMatches, env: &EnvSnapshot) -> ConfResult<Settings> {
    let base = match matches.get_one::<String>("settings") {
        Some(path) => settings_loader::from_file(path)?,
        None => Settings::default(),
    };
    portal_conf_initializers::configure_with_base(base, env)
}

/// Installs the assembled settings into `holder` (normally
/// [`SETTINGS`](portal_conf_core::SETTINGS)) and returns the installed copy.
///
/// Fails with [`ConfError::ImproperlyConfigured`] when `holder` was already
/// configured.
pub fn install_settings(holder: &LazySettings, settings: Settings) -> ConfResult<&Settings> {
    holder.configure(settings)?;
    holder.try_get().ok_or_else(|| {
        ConfError::ImproperlyConfigured("Settings were not installed".to_string())
    })
}

/// Parses `args`, assembles the settings and runs the selected command.
///
/// `base_env` stands in for the process environment. Usage errors are
/// reported as [`ConfError::ConfigurationError`].
pub fn run<I, T>(
    registry: &CommandRegistry,
    args: I,
    base_env: &EnvSnapshot,
    out: &mut dyn Write,
) -> ConfResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = registry
        .build_cli()
        .try_get_matches_from(args)
        .map_err(|e| ConfError::ConfigurationError(e.to_string()))?;
    run_matches(registry, &matches, base_env, out)
}

/// Same as [`run`] for already parsed arguments.
pub fn run_matches(
    registry: &CommandRegistry,
    matches: &clap::ArgMatches,
    base_env: &EnvSnapshot,
    out: &mut dyn Write,
) -> ConfResult<()> {
    let env = env_from_matches(matches, base_env)?;
    let settings = load_settings(matches, &env)?;
    let ctx = CommandContext {
        settings: &settings,
        env: &env,
    };
    registry.execute(matches, &ctx, out)
}
