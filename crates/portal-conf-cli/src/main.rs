use std::io::Write;
use std::process::ExitCode;

use portal_conf_cli::{
    default_registry, env_from_matches, install_settings, load_settings, CommandContext,
    CommandRegistry,
};
use portal_conf_core::logging::{setup_logging, startup_span};
use portal_conf_core::{ConfResult, EnvSnapshot, SETTINGS};

fn try_main(registry: &CommandRegistry, matches: &clap::ArgMatches) -> ConfResult<()> {
    let env = env_from_matches(matches, &EnvSnapshot::from_process_env())?;
    let settings = install_settings(&SETTINGS, load_settings(matches, &env)?)?;
    setup_logging(settings);

    let span = startup_span("portal-conf");
    let _guard = span.enter();

    let ctx = CommandContext {
        settings,
        env: &env,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    registry.execute(matches, &ctx, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let registry = default_registry();
    let matches = registry.build_cli().get_matches();

    match try_main(&registry, &matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("portal-conf: {err}");
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}
