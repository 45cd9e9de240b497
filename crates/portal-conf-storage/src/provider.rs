//! Feature flags and provider selection.

use std::fmt;

use portal_conf_core::env::EnvSnapshot;
use serde::{Deserialize, Serialize};

use crate::vars;

/// The remote object-storage family in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderChoice {
    /// Remote storage disabled; files stay on local disk.
    None,
    /// DigitalOcean Spaces.
    Spaces,
    /// AWS S3 or an S3-compatible service.
    S3,
}

impl ProviderChoice {
    /// Parses an explicit override identifier, case-insensitively.
    ///
    /// Only the remote providers are recognised; `"none"` and unknown values
    /// return `None` so the flags decide.
    pub fn from_identifier(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "spaces" => Some(Self::Spaces),
            "s3" => Some(Self::S3),
            _ => None,
        }
    }

    /// The lowercase identifier (`none`, `spaces`, `s3`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Spaces => "spaces",
            Self::S3 => "s3",
        }
    }

    /// Returns `true` for `Spaces` and `S3`.
    pub const fn is_remote(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean feature flags that drive the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StorageFlags {
    /// `USE_SPACES`.
    pub use_spaces: bool,
    /// `USE_S3`.
    pub use_s3: bool,
    /// `USE_REMOTE_STATIC`.
    pub use_remote_static: bool,
    /// `STORAGE_PUBLIC`.
    pub storage_public: bool,
}

impl StorageFlags {
    /// Reads the flags from the snapshot; each defaults to `false`.
    pub fn from_env(env: &EnvSnapshot) -> Self {
        Self {
            use_spaces: env.bool(vars::USE_SPACES, false),
            use_s3: env.bool(vars::USE_S3, false),
            use_remote_static: env.bool(vars::USE_REMOTE_STATIC, false),
            storage_public: env.bool(vars::STORAGE_PUBLIC, false),
        }
    }
}

/// Picks the storage provider.
///
/// A recognised `explicit_override` wins unconditionally. Otherwise a single
/// enabled flag decides; when both flags are on, Spaces wins. With nothing
/// enabled the result is [`ProviderChoice::None`].
///
/// # Examples
///
/// ```
/// use portal_conf_storage::provider::{select_provider, ProviderChoice};
///
/// assert_eq!(select_provider(Some("S3"), true, false), ProviderChoice::S3);
/// assert_eq!(select_provider(None, true, true), ProviderChoice::Spaces);
/// assert_eq!(select_provider(None, false, false), ProviderChoice::None);
/// ```
pub fn select_provider(
    explicit_override: Option<&str>,
    use_spaces: bool,
    use_s3: bool,
) -> ProviderChoice {
    if let Some(choice) = explicit_override.and_then(ProviderChoice::from_identifier) {
        return choice;
    }

    match (use_spaces, use_s3) {
        (true, _) => ProviderChoice::Spaces,
        (false, true) => ProviderChoice::S3,
        (false, false) => ProviderChoice::None,
    }
}

/// Reads `STORAGE_PROVIDER` and the flags from the snapshot and selects.
pub fn provider_from_env(env: &EnvSnapshot, flags: &StorageFlags) -> ProviderChoice {
    select_provider(
        env.get(vars::STORAGE_PROVIDER),
        flags.use_spaces,
        flags.use_s3,
    )
}
