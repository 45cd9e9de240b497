//! # portal-conf-storage
//!
//! Object-storage backend resolver for the portal application.
//!
//! Given the environment snapshot, the resolver picks a storage provider
//! (DigitalOcean Spaces or AWS S3), computes the bucket URL, and derives the
//! public URLs for static and media assets. It performs no I/O; the result is
//! handed to the storage client through [`Settings`](portal_conf_core::Settings).
//!
//! ```text
//!  EnvSnapshot ──► StorageFlags ──► select_provider ──► build_config ──► ResolvedStorageConfiguration
//!                        │                                   │
//!                 STORAGE_PROVIDER                    normalize_domain
//! ```
//!
//! ## Example
//!
//! ```
//! use portal_conf_core::EnvSnapshot;
//!
//! let env = EnvSnapshot::from_pairs([
//!     ("USE_SPACES", "true"),
//!     ("SPACES_ENDPOINT", "https://nyc3.digitaloceanspaces.com"),
//!     ("SPACES_BUCKET", "mybucket"),
//!     ("SPACES_KEY", "key"),
//!     ("SPACES_SECRET", "secret"),
//! ]);
//!
//! let resolved = portal_conf_storage::resolve(&env).unwrap();
//! assert_eq!(
//!     resolved.media_url.as_deref(),
//!     Some("https://nyc3.digitaloceanspaces.com/mybucket/media/")
//! );
//! assert_eq!(resolved.static_url, None);
//! ```

pub mod builder;
pub mod checks;
pub mod domain;
pub mod provider;
pub mod vars;

pub use builder::{build_config, ResolvedStorageConfiguration};
pub use checks::register_storage_checks;
pub use domain::{normalize_domain, DomainDescriptor};
pub use provider::{select_provider, ProviderChoice, StorageFlags};

use portal_conf_core::{ConfResult, EnvSnapshot};

/// Reads the flags and provider override from `env`, selects the provider,
/// and builds its configuration.
pub fn resolve(env: &EnvSnapshot) -> ConfResult<ResolvedStorageConfiguration> {
    let flags = StorageFlags::from_env(env);
    let provider = provider::provider_from_env(env, &flags);
    tracing::debug!(?flags, %provider, "Selected storage provider");
    build_config(env, &flags, provider)
}
