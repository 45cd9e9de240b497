//! Production defaults: debug off, remote debugger off, any host accepted.

use portal_conf_core::{EnvSnapshot, Settings};

/// Applies `DEBUG`, `PTVSD_SERVER` and the wildcard `ALLOWED_HOSTS`.
pub fn apply_production(settings: &mut Settings, env: &EnvSnapshot) {
    settings.debug = env.bool("DEBUG", false);
    settings.ptvsd_server = env.bool("PTVSD_SERVER", false);
    settings.allowed_hosts = vec!["*".to_string()];
}
