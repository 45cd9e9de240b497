//! # portal-conf-core
//!
//! Core types for the portal configuration layer. This crate has no
//! dependency on the other portal-conf crates and provides the foundation
//! they build on.
//!
//! ## Modules
//!
//! - [`error`] - Error type and result alias
//! - [`env`] - Immutable environment snapshot and typed lookups
//! - [`settings`] - The resolved `Settings` struct and its global holder
//! - [`settings_loader`] - Base settings from TOML/JSON files
//! - [`checks`] - System check registry
//! - [`logging`] - Tracing-based logging integration

pub mod checks;
pub mod env;
pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use env::EnvSnapshot;
pub use error::{ConfError, ConfResult};
pub use settings::{Settings, SETTINGS};
