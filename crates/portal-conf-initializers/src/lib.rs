//! # portal-conf-initializers
//!
//! Assembles the portal [`Settings`] from an environment snapshot.
//!
//! Each initializer owns one area of the settings and runs in a fixed
//! order; the first error aborts assembly.
//!
//! | Order | Initializer | Settings touched |
//! |---|---|---|
//! | 1 | [`settings_loader::apply_env_overrides`] | `secret_key`, `log_level`, `language_code`, `time_zone` |
//! | 2 | [`production::apply_production`] | `debug`, `ptvsd_server`, `allowed_hosts` |
//! | 3 | [`database::database_from_env`] | `databases` |
//! | 4 | [`portal_conf_storage::resolve`] | `storages`, `object_storage`, `static_url`, `media_url` |
//! | 5 | [`vite::vite_from_env`] | `django_vite` |
//! | 6 | [`filer::filer_settings`] | `filer` |
//!
//! [`settings_loader::apply_env_overrides`]: portal_conf_core::settings_loader::apply_env_overrides

pub mod database;
pub mod filer;
pub mod production;
pub mod vite;

pub use database::{database_from_env, parse_database_url};
pub use filer::filer_settings;
pub use production::apply_production;
pub use vite::vite_from_env;

use portal_conf_core::logging::startup_span;
use portal_conf_core::settings_loader;
use portal_conf_core::{ConfResult, EnvSnapshot, Settings};

/// Builds the settings from defaults and `env`.
///
/// # Examples
///
/// ```
/// use portal_conf_core::EnvSnapshot;
///
/// let env = EnvSnapshot::from_pairs([("DATABASE_URL", "sqlite:///portal.db")]);
/// let settings = portal_conf_initializers::configure(&env).unwrap();
/// assert!(!settings.debug);
/// assert_eq!(settings.databases["default"].name, "portal.db");
/// assert_eq!(settings.media_url, "/media/");
/// ```
pub fn configure(env: &EnvSnapshot) -> ConfResult<Settings> {
    configure_with_base(Settings::default(), env)
}

/// Runs every initializer over `base`, typically loaded from a settings file.
pub fn configure_with_base(base: Settings, env: &EnvSnapshot) -> ConfResult<Settings> {
    let span = startup_span("initializers");
    let _guard = span.enter();

    let mut settings = base;
    settings_loader::apply_env_overrides(&mut settings, env);
    apply_production(&mut settings, env);
    settings.databases = database_from_env(env)?;

    let storage = portal_conf_storage::resolve(env)?;
    storage.apply_to(&mut settings);

    settings.django_vite = vite_from_env(env);
    settings.filer = filer_settings();

    tracing::info!(
        provider = %storage.provider,
        debug = settings.debug,
        "Settings assembled"
    );
    Ok(settings)
}
