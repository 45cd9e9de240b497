//! # portal-conf
//!
//! Environment-driven settings for the portal application.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `portal-conf` to get everything, or on the individual
//! crates for finer-grained control.
//!
//! ```
//! use portal_conf::core::EnvSnapshot;
//!
//! let env = EnvSnapshot::from_pairs([("STORAGE_PROVIDER", "s3")]);
//! let flags = portal_conf::storage::StorageFlags::from_env(&env);
//! assert!(!flags.use_s3);
//! ```

/// Core types: settings, environment snapshot, errors, checks, logging.
pub use portal_conf_core as core;

/// Storage provider selection, domain normalization and storage settings.
pub use portal_conf_storage as storage;

/// Database, Vite, media-library and production initializers.
#[cfg(feature = "initializers")]
pub use portal_conf_initializers as initializers;

/// Management commands (CLI).
#[cfg(feature = "cli")]
pub use portal_conf_cli as cli;
