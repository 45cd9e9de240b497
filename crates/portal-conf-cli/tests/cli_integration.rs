//! End-to-end tests for the management CLI.
//!
//! Each test passes its own environment snapshot, so nothing depends on the
//! process environment.

use std::io::Write;

use portal_conf_cli::{default_registry, install_settings, load_settings, run};
use portal_conf_core::settings::LazySettings;
use portal_conf_core::{ConfError, EnvSnapshot, SETTINGS};

fn run_cli(args: &[&str], env: &EnvSnapshot) -> (Result<(), ConfError>, String) {
    let registry = default_registry();
    let mut out = Vec::new();
    let result = run(&registry, args, env, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn base_env() -> EnvSnapshot {
    EnvSnapshot::from_pairs([
        ("DATABASE_URL", "sqlite:///portal.db"),
        ("SECRET_KEY", "integration"),
    ])
}

#[test]
fn test_check_passes_for_local_setup() {
    let (result, out) = run_cli(&["portal-conf", "check"], &base_env());
    assert!(result.is_ok());
    assert_eq!(out, "System check identified no issues.\n");
}

#[test]
fn test_missing_database_url_is_config_error() {
    let (result, out) = run_cli(&["portal-conf", "check"], &EnvSnapshot::new());
    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 78);
    assert!(err.to_string().contains("DATABASE_URL"));
    assert!(out.is_empty());
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let (result, _) = run_cli(&["portal-conf", "runserver"], &base_env());
    assert!(matches!(result, Err(ConfError::ConfigurationError(_))));
}

#[test]
fn test_showstorage_with_env_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "USE_SPACES=true").unwrap();
    writeln!(file, "SPACES_ENDPOINT=https://nyc3.digitaloceanspaces.com").unwrap();
    writeln!(file, "SPACES_BUCKET=mybucket").unwrap();
    writeln!(file, "SPACES_KEY=key").unwrap();
    writeln!(file, "SPACES_SECRET=spaces-secret").unwrap();
    drop(file);

    let path = path.to_str().unwrap();
    let (result, out) = run_cli(
        &["portal-conf", "--env-file", path, "showstorage"],
        &base_env(),
    );
    assert!(result.is_ok(), "{result:?}");

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["PROVIDER"], "spaces");
    assert_eq!(
        value["MEDIA_URL"],
        "https://nyc3.digitaloceanspaces.com/mybucket/media/"
    );
    assert_eq!(value["AWS_SECRET_ACCESS_KEY"], "********");
    assert!(!out.contains("spaces-secret"));
}

#[test]
fn test_env_file_missing_is_io_error() {
    let (result, _) = run_cli(
        &["portal-conf", "--env-file", "/nonexistent/portal/.env", "check"],
        &base_env(),
    );
    assert_eq!(result.unwrap_err().exit_code(), 74);
}

#[test]
fn test_diffsettings_with_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.toml");
    std::fs::write(&path, "time_zone = \"Europe/Lisbon\"\n").unwrap();

    let (result, out) = run_cli(
        &["portal-conf", "diffsettings", "--settings", path.to_str().unwrap()],
        &base_env(),
    );
    assert!(result.is_ok());
    assert!(out.contains("TIME_ZONE = \"Europe/Lisbon\"\n"));
    assert!(out.contains("DEBUG = false\n"));
    assert!(out.contains("ALLOWED_HOSTS = [\"*\"]\n"));
    assert!(out.contains("SECRET_KEY = \"********\"\n"));
}

#[test]
fn test_missing_settings_file_is_io_error() {
    let (result, out) = run_cli(
        &["portal-conf", "--settings", "/nonexistent/portal.toml", "check"],
        &base_env(),
    );
    let err = result.unwrap_err();
    assert!(matches!(err, ConfError::IoError(_)));
    assert_eq!(err.exit_code(), 74);
    assert!(err.to_string().contains("/nonexistent/portal.toml"));
    assert!(out.is_empty());
}

#[test]
fn test_assembled_settings_install_once() {
    let registry = default_registry();
    let matches = registry
        .build_cli()
        .try_get_matches_from(["portal-conf", "check"])
        .unwrap();
    let env = base_env();

    let installed = install_settings(&SETTINGS, load_settings(&matches, &env).unwrap()).unwrap();
    assert!(!installed.debug);
    assert_eq!(installed.secret_key, "integration");
    assert!(SETTINGS.is_configured());
    assert_eq!(SETTINGS.get().databases["default"].name, "portal.db");

    let err = install_settings(&SETTINGS, load_settings(&matches, &env).unwrap()).unwrap_err();
    assert!(matches!(err, ConfError::ImproperlyConfigured(_)));
    assert_eq!(SETTINGS.get().secret_key, "integration");
}

#[test]
fn test_install_settings_into_fresh_holder() {
    let holder = LazySettings::new();
    assert!(holder.try_get().is_none());
    let settings = portal_conf_initializers::configure(&base_env()).unwrap();
    let installed = install_settings(&holder, settings.clone()).unwrap();
    assert_eq!(installed, &settings);
}
