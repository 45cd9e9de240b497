//! Settings for the portal application.
//!
//! This module provides the [`Settings`] struct, which holds the resolved
//! application configuration, and [`LazySettings`], a write-once global holder.
//! Field names follow the framework setting they configure (`static_url` is
//! `STATIC_URL`, `storages` is `STORAGES`, and so on).

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{ConfError, ConfResult};

/// Remote object-storage backend used for media and, optionally, static files.
pub const S3_STORAGE_BACKEND: &str = "storages.backends.s3boto3.S3Boto3Storage";
/// Local compressed-manifest backend for static files.
pub const MANIFEST_STATIC_BACKEND: &str = "whitenoise.storage.CompressedManifestStaticFilesStorage";
/// Framework default backend for uploaded files.
pub const FILESYSTEM_STORAGE_BACKEND: &str = "django.core.files.storage.FileSystemStorage";
/// Framework default backend for static files.
pub const STATICFILES_STORAGE_BACKEND: &str =
    "django.contrib.staticfiles.storage.StaticFilesStorage";

/// `STORAGES` alias for uploaded media.
pub const DEFAULT_STORAGE_ALIAS: &str = "default";
/// `STORAGES` alias for static files.
pub const STATICFILES_STORAGE_ALIAS: &str = "staticfiles";

/// Database connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// The database engine (e.g. `django.db.backends.postgresql`).
    pub engine: String,
    /// The database name (or file path for `SQLite`).
    pub name: String,
    /// The database user.
    pub user: String,
    /// The database password.
    pub password: String,
    /// The database host.
    pub host: String,
    /// The database port, `0` when unspecified.
    pub port: u16,
    /// Additional engine-specific options.
    pub options: BTreeMap<String, String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            engine: "django.db.backends.sqlite3".to_string(),
            name: "db.sqlite3".to_string(),
            user: String::new(),
            password: String::new(),
            host: String::new(),
            port: 0,
            options: BTreeMap::new(),
        }
    }
}

/// Options passed to a storage backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageOptions {
    /// Path prefix inside the bucket.
    pub location: String,
    /// Whether uploads may overwrite an existing object of the same name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_overwrite: Option<bool>,
    /// Bare domain fronting the bucket, if any.
    pub custom_domain: Option<String>,
}

/// One entry of the `STORAGES` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBackendSettings {
    /// Dotted path of the backend class.
    pub backend: String,
    /// Backend options; `None` means the backend defaults.
    pub options: Option<StorageOptions>,
}

impl StorageBackendSettings {
    /// A backend entry with no options.
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            options: None,
        }
    }

    /// A backend entry with options.
    pub fn with_options(backend: impl Into<String>, options: StorageOptions) -> Self {
        Self {
            backend: backend.into(),
            options: Some(options),
        }
    }
}

/// Credentials and client parameters for the S3-compatible storage client.
///
/// The `Debug` output redacts `secret_access_key`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectStorageSettings {
    /// `AWS_ACCESS_KEY_ID`.
    pub access_key_id: String,
    /// `AWS_SECRET_ACCESS_KEY`.
    pub secret_access_key: String,
    /// `AWS_STORAGE_BUCKET_NAME`.
    pub storage_bucket_name: String,
    /// `AWS_S3_ENDPOINT_URL`.
    pub endpoint_url: Option<String>,
    /// `AWS_S3_REGION_NAME`.
    pub region_name: Option<String>,
    /// `AWS_S3_ADDRESSING_STYLE`.
    pub addressing_style: Option<String>,
    /// `AWS_S3_SIGNATURE_VERSION`.
    pub signature_version: Option<String>,
    /// `AWS_DEFAULT_ACL`.
    pub default_acl: Option<String>,
    /// `AWS_QUERYSTRING_AUTH`.
    pub querystring_auth: bool,
    /// `AWS_S3_OBJECT_PARAMETERS`.
    pub object_parameters: BTreeMap<String, String>,
}

impl fmt::Debug for ObjectStorageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStorageSettings")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"********")
            .field("storage_bucket_name", &self.storage_bucket_name)
            .field("endpoint_url", &self.endpoint_url)
            .field("region_name", &self.region_name)
            .field("addressing_style", &self.addressing_style)
            .field("signature_version", &self.signature_version)
            .field("default_acl", &self.default_acl)
            .field("querystring_auth", &self.querystring_auth)
            .field("object_parameters", &self.object_parameters)
            .finish()
    }
}

/// Frontend-asset manifest (Vite) integration for one app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViteSettings {
    /// Serve assets from the Vite dev server instead of the built manifest.
    pub dev_mode: bool,
}

/// A storage engine used by the media library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilerStorage {
    /// Dotted path of the storage class.
    pub engine: String,
}

/// Media-library (filer) configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilerSettings {
    /// Storages keyed by visibility (`public`) then role (`main`, `thumbnails`).
    pub storages: BTreeMap<String, BTreeMap<String, FilerStorage>>,
    /// URL prefix for canonical file links.
    pub canonical_url: String,
    /// Thumbnail processor pipeline, in order.
    pub thumbnail_processors: Vec<String>,
}

impl Default for FilerSettings {
    fn default() -> Self {
        Self {
            storages: BTreeMap::new(),
            canonical_url: "canonical/".to_string(),
            thumbnail_processors: Vec::new(),
        }
    }
}

/// The complete set of portal settings.
///
/// Built once at startup by the initializers and never mutated afterwards.
/// Use [`SETTINGS`] to install and access the global instance.
///
/// # Examples
///
/// ```
/// use portal_conf_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.static_url, "/static/");
/// assert_eq!(settings.media_url, "/media/");
/// assert!(settings.object_storage.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,
    /// The secret key used for cryptographic signing.
    pub secret_key: String,
    /// Hostnames that this application can serve.
    pub allowed_hosts: Vec<String>,
    /// Whether to start the remote debugger server.
    pub ptvsd_server: bool,

    // ── Database ─────────────────────────────────────────────────────

    /// Database configurations, keyed by alias (e.g. "default").
    pub databases: BTreeMap<String, DatabaseSettings>,

    // ── Static files and media ───────────────────────────────────────

    /// Public URL prefix for static files.
    pub static_url: String,
    /// Directory where collected static files are placed.
    pub static_root: Option<PathBuf>,
    /// Public URL prefix for user-uploaded media.
    pub media_url: String,
    /// Directory for user-uploaded files when stored locally.
    pub media_root: Option<PathBuf>,
    /// Storage backends keyed by alias (`default`, `staticfiles`).
    pub storages: BTreeMap<String, StorageBackendSettings>,
    /// Object storage client parameters; `None` when storage is local.
    pub object_storage: Option<ObjectStorageSettings>,

    // ── Frontend and media library ───────────────────────────────────

    /// Vite integration keyed by app name.
    pub django_vite: BTreeMap<String, ViteSettings>,
    /// Media-library configuration.
    pub filer: FilerSettings,

    // ── Internationalization ─────────────────────────────────────────

    /// The language code (e.g. "en-us").
    pub language_code: String,
    /// The default time zone (e.g. "UTC").
    pub time_zone: String,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log filter (e.g. "info", "portal_conf_storage=debug").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut databases = BTreeMap::new();
        databases.insert("default".to_string(), DatabaseSettings::default());

        let mut storages = BTreeMap::new();
        storages.insert(
            DEFAULT_STORAGE_ALIAS.to_string(),
            StorageBackendSettings::new(FILESYSTEM_STORAGE_BACKEND),
        );
        storages.insert(
            STATICFILES_STORAGE_ALIAS.to_string(),
            StorageBackendSettings::new(STATICFILES_STORAGE_BACKEND),
        );

        Self {
            // Core
            debug: true,
            secret_key: String::new(),
            allowed_hosts: Vec::new(),
            ptvsd_server: false,

            // Database
            databases,

            // Static files and media
            static_url: "/static/".to_string(),
            static_root: None,
            media_url: "/media/".to_string(),
            media_root: None,
            storages,
            object_storage: None,

            // Frontend and media library
            django_vite: BTreeMap::new(),
            filer: FilerSettings::default(),

            // Internationalization
            language_code: "en-us".to_string(),
            time_zone: "UTC".to_string(),

            // Logging
            log_level: "info".to_string(),

            // Extra
            extra: BTreeMap::new(),
        }
    }
}

/// A write-once, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup with the
/// resolved settings, then use [`get`](LazySettings::get) anywhere.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Installs the settings. Fails if settings were already installed.
    pub fn configure(&self, settings: Settings) -> ConfResult<()> {
        self.inner.set(settings).map_err(|_| {
            ConfError::ImproperlyConfigured("Settings have already been configured".to_string())
        })
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, or `None` before startup completes.
    pub fn try_get(&self) -> Option<&Settings> {
        self.inner.get()
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
