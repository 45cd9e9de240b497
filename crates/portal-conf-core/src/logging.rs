//! Logging integration for portal-conf.
//!
//! Configures the global [`tracing`] subscriber from
//! [`Settings`](crate::settings::Settings).

use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

/// Builds the filter for `settings.log_level`, falling back to `info` when
/// the directive cannot be parsed.
pub fn env_filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Sets up the global tracing subscriber based on the given settings.
///
/// In debug mode a pretty, human-readable format is used; in production a
/// structured JSON format is used. Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;

    let filter = env_filter(settings);

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates the span that wraps settings resolution at startup.
///
/// ```
/// use portal_conf_core::logging::startup_span;
///
/// let span = startup_span("portal-conf");
/// let _guard = span.enter();
/// tracing::info!("resolving settings");
/// ```
pub fn startup_span(component: &str) -> tracing::Span {
    tracing::info_span!("startup", component = component)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_uses_log_level() {
        let settings = Settings {
            log_level: "portal_conf_storage=debug".to_string(),
            ..Settings::default()
        };
        assert_eq!(env_filter(&settings).to_string(), "portal_conf_storage=debug");
    }

    #[test]
    fn test_env_filter_invalid_falls_back_to_info() {
        let settings = Settings {
            log_level: "portal=notalevel".to_string(),
            ..Settings::default()
        };
        assert_eq!(env_filter(&settings).to_string(), "info");
    }

    #[test]
    fn test_setup_logging_twice_does_not_panic() {
        let settings = Settings::default();
        setup_logging(&settings);
        setup_logging(&settings);
    }
}
