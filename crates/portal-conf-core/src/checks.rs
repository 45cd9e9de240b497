//! System check framework.
//!
//! Checks inspect the resolved [`Settings`] together with the
//! [`EnvSnapshot`] they were built from and report likely misconfigurations
//! without failing startup.
//!
//! ## Examples
//!
//! ```
//! use portal_conf_core::checks::{CheckMessage, CheckRegistry};
//! use portal_conf_core::env::EnvSnapshot;
//! use portal_conf_core::settings::Settings;
//!
//! let mut registry = CheckRegistry::new();
//! registry.register(
//!     |_settings, _env| {
//!         vec![CheckMessage::warning(
//!             "Custom check warning",
//!             Some("Consider fixing this."),
//!             None,
//!             Some("portal.W001"),
//!         )]
//!     },
//!     &["portal"],
//! );
//!
//! let messages = registry.run_checks(None, &Settings::default(), &EnvSnapshot::new());
//! assert_eq!(messages.len(), 1);
//! ```

use crate::env::EnvSnapshot;
use crate::settings::Settings;

/// Severity level for a check message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckLevel {
    /// Debugging information.
    Debug = 0,
    /// Informational message.
    Info = 1,
    /// A potential problem.
    Warning = 2,
    /// A definite problem that should be fixed.
    Error = 3,
    /// A critical error that prevents the application from running.
    Critical = 4,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A diagnostic message produced by a system check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMessage {
    /// The severity level.
    pub level: CheckLevel,
    /// The human-readable message describing the issue.
    pub msg: String,
    /// An optional hint on how to fix the issue.
    pub hint: Option<String>,
    /// The setting or variable that the issue relates to.
    pub obj: Option<String>,
    /// A unique identifier for this check message (e.g. "storage.W001").
    pub id: Option<String>,
}

impl CheckMessage {
    /// Creates a new `CheckMessage` with the given level and details.
    pub fn new(
        level: CheckLevel,
        msg: impl Into<String>,
        hint: Option<&str>,
        obj: Option<&str>,
        id: Option<&str>,
    ) -> Self {
        Self {
            level,
            msg: msg.into(),
            hint: hint.map(String::from),
            obj: obj.map(String::from),
            id: id.map(String::from),
        }
    }

    /// Creates an info-level message.
    pub fn info(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Info, msg, hint, obj, id)
    }

    /// Creates a warning-level message.
    pub fn warning(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Warning, msg, hint, obj, id)
    }

    /// Creates an error-level message.
    pub fn error(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Error, msg, hint, obj, id)
    }

    /// Returns `true` if this is a warning or higher severity.
    pub fn is_serious(&self) -> bool {
        self.level >= CheckLevel::Warning
    }
}

impl std::fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.id {
            write!(f, "({id}) ")?;
        }
        write!(f, "{}: {}", self.level, self.msg)?;
        if let Some(ref hint) = self.hint {
            write!(f, "\n\tHINT: {hint}")?;
        }
        if let Some(ref obj) = self.obj {
            write!(f, "\n\tObject: {obj}")?;
        }
        Ok(())
    }
}

/// A check function over resolved settings and their source environment.
pub type CheckFn = fn(&Settings, &EnvSnapshot) -> Vec<CheckMessage>;

struct RegisteredCheck {
    func: CheckFn,
    tags: Vec<String>,
}

/// Registry for system check functions.
///
/// Check functions are registered with tags, then run all at once or
/// filtered by tag.
pub struct CheckRegistry {
    checks: Vec<RegisteredCheck>,
}

impl CheckRegistry {
    /// Creates a new empty check registry.
    pub const fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Creates a new check registry pre-loaded with the core checks.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(check_secret_key, &["security"]);
        registry.register(check_debug_wildcard_hosts, &["security"]);
        registry.register(check_default_database, &["database"]);
        registry
    }

    /// Registers a check function with the given tags.
    pub fn register(&mut self, func: CheckFn, tags: &[&str]) {
        self.checks.push(RegisteredCheck {
            func,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        });
    }

    /// Runs all registered checks (or only those matching one of `tags`)
    /// and collects the resulting messages in registration order.
    pub fn run_checks(
        &self,
        tags: Option<&[&str]>,
        settings: &Settings,
        env: &EnvSnapshot,
    ) -> Vec<CheckMessage> {
        let mut messages = Vec::new();

        for check in &self.checks {
            let should_run = tags.map_or(true, |filter_tags| {
                filter_tags.iter().any(|t| check.tags.iter().any(|tag| tag == t))
            });

            if should_run {
                messages.extend((check.func)(settings, env));
            }
        }

        messages
    }

    /// Returns the sorted, de-duplicated list of registered tags.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .checks
            .iter()
            .flat_map(|c| c.tags.iter().map(String::as_str))
            .collect();
        tags.sort_unstable();
        tags.dedup();
        tags
    }

    /// Returns the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns `true` if no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================
// Built-in checks
// ============================================================

fn check_secret_key(settings: &Settings, _env: &EnvSnapshot) -> Vec<CheckMessage> {
    if settings.secret_key.is_empty() {
        return vec![CheckMessage::warning(
            "SECRET_KEY is empty. This is insecure for production.",
            Some("Set SECRET_KEY in the environment or the settings file."),
            Some("SECRET_KEY"),
            Some("security.W001"),
        )];
    }
    Vec::new()
}

fn check_debug_wildcard_hosts(settings: &Settings, _env: &EnvSnapshot) -> Vec<CheckMessage> {
    if settings.debug && settings.allowed_hosts.iter().any(|h| h == "*") {
        return vec![CheckMessage::warning(
            "DEBUG is enabled while ALLOWED_HOSTS accepts any host.",
            Some("Set DEBUG=false for deployments reachable from the network."),
            Some("DEBUG"),
            Some("security.W002"),
        )];
    }
    Vec::new()
}

fn check_default_database(settings: &Settings, _env: &EnvSnapshot) -> Vec<CheckMessage> {
    if !settings.databases.contains_key("default") {
        return vec![CheckMessage::error(
            "No 'default' database is configured.",
            Some("Set DATABASE_URL."),
            Some("DATABASES"),
            Some("database.E001"),
        )];
    }
    Vec::new()
}
