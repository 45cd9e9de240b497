//! Vite asset integration.

use std::collections::BTreeMap;

use portal_conf_core::settings::ViteSettings;
use portal_conf_core::EnvSnapshot;

/// App name of the single Vite configuration.
pub const DEFAULT_VITE_APP: &str = "default";

/// Dev mode follows `DEBUG`, off when unset.
pub fn vite_from_env(env: &EnvSnapshot) -> BTreeMap<String, ViteSettings> {
    let mut apps = BTreeMap::new();
    apps.insert(
        DEFAULT_VITE_APP.to_string(),
        ViteSettings {
            dev_mode: env.bool("DEBUG", false),
        },
    );
    apps
}
