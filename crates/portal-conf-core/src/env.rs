//! Environment snapshot and typed lookups.
//!
//! Initializers never read the process environment directly. The binary
//! captures an [`EnvSnapshot`] once at startup and passes it down, so every
//! initializer is a pure function of the snapshot and tests can build one
//! from literal pairs.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfError, ConfResult};

/// Values accepted as `true` by [`parse_bool`], compared case-insensitively.
pub const BOOLEAN_TRUE_STRINGS: [&str; 6] = ["true", "on", "ok", "y", "yes", "1"];

/// Parses an environment boolean.
///
/// Anything outside [`BOOLEAN_TRUE_STRINGS`] is `false`.
///
/// # Examples
///
/// ```
/// use portal_conf_core::env::parse_bool;
///
/// assert!(parse_bool("Yes"));
/// assert!(parse_bool(" 1 "));
/// assert!(!parse_bool("off"));
/// assert!(!parse_bool("maybe"));
/// ```
pub fn parse_bool(value: &str) -> bool {
    let value = value.trim();
    BOOLEAN_TRUE_STRINGS
        .iter()
        .any(|truthy| truthy.eq_ignore_ascii_case(value))
}

/// Returns the first candidate that is present and not blank.
///
/// This is the ordered fallback chain behind every layered lookup: the first
/// candidate has the highest precedence.
///
/// # Examples
///
/// ```
/// use portal_conf_core::env::first_non_empty;
///
/// assert_eq!(first_non_empty([None, Some(""), Some("media")]), Some("media"));
/// assert_eq!(first_non_empty([None, Some("  ")]), None);
/// ```
pub fn first_non_empty<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// An immutable view of environment variables captured at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Creates an empty snapshot.
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_process_env() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Reads a `.env` file and overlays the process environment on top of it.
    ///
    /// Process variables win over file values, matching how `.env` loaders
    /// never override variables that are already set.
    pub fn from_dotenv_file(path: impl AsRef<Path>) -> ConfResult<Self> {
        Self::from_dotenv_file_under(path, &Self::from_process_env())
    }

    /// Reads a `.env` file and overlays `overrides` on top of it.
    pub fn from_dotenv_file_under(path: impl AsRef<Path>, overrides: &Self) -> ConfResult<Self> {
        let path = path.as_ref();
        let iter = dotenvy::from_path_iter(path).map_err(|e| dotenv_error(path, e))?;

        let mut vars = BTreeMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| dotenv_error(path, e))?;
            vars.insert(key, value);
        }

        let mut snapshot = Self { vars };
        snapshot
            .vars
            .extend(overrides.vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        tracing::debug!(path = %path.display(), "Loaded environment file");
        Ok(snapshot)
    }

    /// Builds a snapshot from literal pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use portal_conf_core::env::EnvSnapshot;
    ///
    /// let env = EnvSnapshot::from_pairs([("USE_S3", "true")]);
    /// assert!(env.bool("USE_S3", false));
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns a copy of this snapshot with one variable set.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Returns the raw value of a variable, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Returns the value of a variable if it is set and not blank.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        first_non_empty([self.get(name)])
    }

    /// Returns the first non-blank value among `names`, in order.
    pub fn first_non_empty(&self, names: &[&str]) -> Option<&str> {
        first_non_empty(names.iter().map(|name| self.get(name)))
    }

    /// Returns a boolean flag, or `default` when the variable is unset.
    pub fn bool(&self, name: &str, default: bool) -> bool {
        self.get(name).map_or(default, parse_bool)
    }

    /// Returns a required non-blank variable.
    ///
    /// `required_by` names the feature that needs it and ends up in the
    /// error message.
    pub fn require(&self, name: &str, required_by: &str) -> ConfResult<&str> {
        self.get_non_empty(name)
            .ok_or_else(|| ConfError::missing(name, required_by))
    }

    /// Returns `true` if the variable is set (even to an empty string).
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Returns the number of captured variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no variables were captured.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

fn dotenv_error(path: &Path, err: dotenvy::Error) -> ConfError {
    match err {
        dotenvy::Error::Io(io) => ConfError::IoError(io),
        other => ConfError::ConfigurationError(format!(
            "Failed to parse env file '{}': {other}",
            path.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_truthy() {
        for value in ["true", "TRUE", "on", "ok", "y", "Yes", "1", " true "] {
            assert!(parse_bool(value), "{value} should be true");
        }
    }

    #[test]
    fn test_parse_bool_falsy() {
        for value in ["false", "0", "off", "no", "", "2", "enabled"] {
            assert!(!parse_bool(value), "{value} should be false");
        }
    }

    #[test]
    fn test_first_non_empty_order() {
        assert_eq!(first_non_empty([Some("a"), Some("b")]), Some("a"));
        assert_eq!(first_non_empty([None, Some("b")]), Some("b"));
        assert_eq!(first_non_empty([Some(""), Some(" "), Some("c")]), Some("c"));
        assert_eq!(first_non_empty(std::iter::empty()), None);
    }

    #[test]
    fn test_snapshot_lookups() {
        let env = EnvSnapshot::from_pairs([("A", "1"), ("B", ""), ("C", "value")]);
        assert_eq!(env.get("A"), Some("1"));
        assert_eq!(env.get("B"), Some(""));
        assert_eq!(env.get_non_empty("B"), None);
        assert!(env.contains("B"));
        assert!(!env.contains("Z"));
        assert_eq!(env.first_non_empty(&["Z", "B", "C"]), Some("value"));
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn test_snapshot_bool_default() {
        let env = EnvSnapshot::from_pairs([("ON", "yes"), ("OFF", "nope")]);
        assert!(env.bool("ON", false));
        assert!(!env.bool("OFF", true));
        assert!(env.bool("MISSING", true));
        assert!(!env.bool("MISSING", false));
    }

    #[test]
    fn test_require_missing_and_blank() {
        let env = EnvSnapshot::new().with("BLANK", "   ");
        let err = env.require("BLANK", "tests").unwrap_err();
        assert!(matches!(err, ConfError::MissingVariable { ref name, .. } if name == "BLANK"));
        assert!(env.require("ABSENT", "tests").is_err());
        assert_eq!(env.with("SET", "x").require("SET", "tests").unwrap(), "x");
    }

    #[test]
    fn test_from_dotenv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "PORTAL_CONF_TEST_ONLY_IN_FILE=from-file\n",
        )
        .unwrap();

        let env = EnvSnapshot::from_dotenv_file(&path).unwrap();
        assert_eq!(env.get("PORTAL_CONF_TEST_ONLY_IN_FILE"), Some("from-file"));
    }

    #[test]
    fn test_from_dotenv_file_under_overrides_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "USE_S3=true\nSPACES_BUCKET=from-file\n").unwrap();

        let overrides = EnvSnapshot::from_pairs([("USE_S3", "false")]);
        let env = EnvSnapshot::from_dotenv_file_under(&path, &overrides).unwrap();
        assert_eq!(env.get("USE_S3"), Some("false"));
        assert_eq!(env.get("SPACES_BUCKET"), Some("from-file"));
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_from_dotenv_file_missing() {
        let err = EnvSnapshot::from_dotenv_file("/nonexistent/portal/.env").unwrap_err();
        assert!(matches!(err, ConfError::IoError(_)));
    }
}
