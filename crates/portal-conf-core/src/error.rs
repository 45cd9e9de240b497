//! Core error types for portal-conf.
//!
//! Every initializer returns [`ConfResult`]. A [`ConfError`] raised while
//! resolving settings is fatal: the process reports it and exits before any
//! request is served.

use thiserror::Error;

/// Exit status for configuration failures (`EX_CONFIG` from `sysexits.h`).
pub const EXIT_CONFIG: i32 = 78;

/// Exit status for I/O failures (`EX_IOERR` from `sysexits.h`).
pub const EXIT_IOERR: i32 = 74;

/// The error type shared by all portal-conf crates.
#[derive(Error, Debug)]
pub enum ConfError {
    // ── Environment ──────────────────────────────────────────────────

    /// A variable required by the active configuration is unset or empty.
    #[error("Missing required environment variable {name} (required by {required_by})")]
    MissingVariable {
        /// The environment variable name.
        name: String,
        /// What needed it (e.g. "spaces storage").
        required_by: String,
    },

    /// A variable is present but its value cannot be used.
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue {
        /// The environment variable name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The settings holder was used out of order.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred while serializing resolved settings.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfError {
    /// Shorthand for [`ConfError::MissingVariable`].
    pub fn missing(name: impl Into<String>, required_by: impl Into<String>) -> Self {
        Self::MissingVariable {
            name: name.into(),
            required_by: required_by.into(),
        }
    }

    /// Shorthand for [`ConfError::InvalidValue`].
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the process exit code associated with this error.
    ///
    /// - `IoError` -> 74
    /// - Everything else -> 78
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::IoError(_) => EXIT_IOERR,
            Self::MissingVariable { .. }
            | Self::InvalidValue { .. }
            | Self::ConfigurationError(_)
            | Self::ImproperlyConfigured(_)
            | Self::SerializationError(_) => EXIT_CONFIG,
        }
    }
}

impl From<serde_json::Error> for ConfError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, ConfError>`.
pub type ConfResult<T> = Result<T, ConfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variable_display() {
        let err = ConfError::missing("SPACES_BUCKET", "spaces storage");
        assert_eq!(
            err.to_string(),
            "Missing required environment variable SPACES_BUCKET (required by spaces storage)"
        );
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ConfError::invalid("DATABASE_URL", "unsupported scheme 'ftp'");
        assert_eq!(
            err.to_string(),
            "Invalid value for DATABASE_URL: unsupported scheme 'ftp'"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ConfError::missing("X", "y").exit_code(), EXIT_CONFIG);
        assert_eq!(ConfError::invalid("X", "y").exit_code(), EXIT_CONFIG);
        assert_eq!(
            ConfError::ConfigurationError("x".into()).exit_code(),
            EXIT_CONFIG
        );
        assert_eq!(
            ConfError::ImproperlyConfigured("x".into()).exit_code(),
            EXIT_CONFIG
        );
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(ConfError::from(io_err).exit_code(), EXIT_IOERR);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ConfError = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: ConfError = json_err.into();
        assert!(matches!(err, ConfError::SerializationError(_)));
    }
}
