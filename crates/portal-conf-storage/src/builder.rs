//! Storage configuration builder.
//!
//! Turns the selected provider and the environment snapshot into a
//! [`ResolvedStorageConfiguration`]. Media always moves to the bucket when a
//! provider is active. Static files move only behind `USE_REMOTE_STATIC`,
//! since they are normally served by the local compressed-manifest pipeline.
//!
//! Spaces custom domains also fall back to the generic `STATIC_DOMAIN` and
//! `MEDIA_DOMAIN`; the legacy Django settings read those only for S3.

use std::collections::BTreeMap;

use portal_conf_core::env::{first_non_empty, EnvSnapshot};
use portal_conf_core::settings::{
    ObjectStorageSettings, Settings, StorageBackendSettings, StorageOptions,
    DEFAULT_STORAGE_ALIAS, MANIFEST_STATIC_BACKEND, S3_STORAGE_BACKEND,
    STATICFILES_STORAGE_ALIAS,
};
use portal_conf_core::ConfResult;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::domain::{normalize_domain, DomainDescriptor};
use crate::provider::{ProviderChoice, StorageFlags};
use crate::vars;

/// Default path prefix for static files inside the bucket.
pub const DEFAULT_STATIC_PATH: &str = "static";
/// Default path prefix for media files inside the bucket.
pub const DEFAULT_MEDIA_PATH: &str = "media";
/// `Cache-Control` applied to every uploaded object.
pub const CACHE_CONTROL: &str = "max-age=86400, s-maxage=86400";
/// ACL applied when `STORAGE_PUBLIC` is on.
pub const PUBLIC_READ_ACL: &str = "public-read";

/// The output of the resolver, consumed by the storage client and the
/// settings assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStorageConfiguration {
    /// The provider that was selected.
    pub provider: ProviderChoice,
    /// `STORAGES` entries to install, keyed by alias.
    pub storages: BTreeMap<String, StorageBackendSettings>,
    /// Client parameters; `None` when the provider is `none`.
    pub object_storage: Option<ObjectStorageSettings>,
    /// Bucket path prefix for static files (empty when the provider is `none`).
    pub static_path: String,
    /// Bucket path prefix for media files (empty when the provider is `none`).
    pub media_path: String,
    /// `STATIC_URL` override, only with `USE_REMOTE_STATIC`.
    pub static_url: Option<String>,
    /// `MEDIA_URL` override, always set for a remote provider.
    pub media_url: Option<String>,
}

impl ResolvedStorageConfiguration {
    /// Writes the resolved values into `settings`.
    ///
    /// Only the `STORAGES` aliases produced by the resolver are replaced;
    /// `STATIC_URL` and `MEDIA_URL` keep their current values unless
    /// overridden.
    pub fn apply_to(&self, settings: &mut Settings) {
        for (alias, backend) in &self.storages {
            settings.storages.insert(alias.clone(), backend.clone());
        }
        settings.object_storage.clone_from(&self.object_storage);
        if let Some(url) = &self.static_url {
            settings.static_url.clone_from(url);
        }
        if let Some(url) = &self.media_url {
            settings.media_url.clone_from(url);
        }
    }

    /// Renders the configuration with the setting names the storage client
    /// reads (`STORAGES`, `AWS_*`, `STATIC_URL`, `MEDIA_URL`).
    pub fn to_settings_map(&self) -> Map<String, Value> {
        let mut map = Map::new();

        let storages: Map<String, Value> = self
            .storages
            .iter()
            .map(|(alias, backend)| (alias.clone(), backend_to_value(backend)))
            .collect();
        map.insert("STORAGES".to_string(), Value::Object(storages));

        if let Some(os) = &self.object_storage {
            map.insert("AWS_ACCESS_KEY_ID".to_string(), json!(os.access_key_id));
            map.insert("AWS_SECRET_ACCESS_KEY".to_string(), json!(os.secret_access_key));
            map.insert("AWS_STORAGE_BUCKET_NAME".to_string(), json!(os.storage_bucket_name));
            map.insert("AWS_S3_ENDPOINT_URL".to_string(), json!(os.endpoint_url));
            map.insert("AWS_S3_REGION_NAME".to_string(), json!(os.region_name));
            map.insert("AWS_S3_ADDRESSING_STYLE".to_string(), json!(os.addressing_style));
            map.insert("AWS_S3_SIGNATURE_VERSION".to_string(), json!(os.signature_version));
            map.insert("AWS_DEFAULT_ACL".to_string(), json!(os.default_acl));
            map.insert("AWS_QUERYSTRING_AUTH".to_string(), json!(os.querystring_auth));
            map.insert("AWS_S3_OBJECT_PARAMETERS".to_string(), json!(os.object_parameters));
        }

        if let Some(url) = &self.static_url {
            map.insert("STATIC_URL".to_string(), json!(url));
        }
        if let Some(url) = &self.media_url {
            map.insert("MEDIA_URL".to_string(), json!(url));
        }

        map
    }
}

fn backend_to_value(backend: &StorageBackendSettings) -> Value {
    let mut entry = Map::new();
    entry.insert("BACKEND".to_string(), json!(backend.backend));
    if let Some(options) = &backend.options {
        let mut opts = Map::new();
        opts.insert("location".to_string(), json!(options.location));
        if let Some(overwrite) = options.file_overwrite {
            opts.insert("file_overwrite".to_string(), json!(overwrite));
        }
        opts.insert("custom_domain".to_string(), json!(options.custom_domain));
        entry.insert("OPTIONS".to_string(), Value::Object(opts));
    }
    Value::Object(entry)
}

/// Provider-specific values gathered before URLs are derived.
#[derive(Debug, Clone)]
struct ProviderFields {
    access_key_id: String,
    secret_access_key: String,
    bucket: String,
    endpoint_url: Option<String>,
    region: Option<String>,
    addressing_style: Option<String>,
    signature_version: Option<String>,
    bucket_base_url: String,
    static_domain: String,
    media_domain: String,
}

fn spaces_fields(env: &EnvSnapshot) -> ConfResult<ProviderFields> {
    const REQUIRED_BY: &str = "spaces storage";

    let endpoint = env.require(vars::SPACES_ENDPOINT, REQUIRED_BY)?.trim();
    let bucket = env.require(vars::SPACES_BUCKET, REQUIRED_BY)?.trim();
    let access_key_id = env.require(vars::SPACES_KEY, REQUIRED_BY)?;
    let secret_access_key = env.require(vars::SPACES_SECRET, REQUIRED_BY)?;

    let (static_domain, media_domain) = custom_domains(
        env,
        &[vars::SPACES_STATIC_DOMAIN, vars::STATIC_DOMAIN],
        &[vars::SPACES_MEDIA_DOMAIN, vars::MEDIA_DOMAIN],
    );

    Ok(ProviderFields {
        access_key_id: access_key_id.to_string(),
        secret_access_key: secret_access_key.to_string(),
        bucket: bucket.to_string(),
        endpoint_url: Some(endpoint.to_string()),
        region: env.get_non_empty(vars::SPACES_REGION).map(str::to_string),
        addressing_style: Some("virtual".to_string()),
        signature_version: Some("s3v4".to_string()),
        bucket_base_url: format!("{}/{bucket}", endpoint.trim_end_matches('/')),
        static_domain,
        media_domain,
    })
}

fn s3_fields(env: &EnvSnapshot) -> ConfResult<ProviderFields> {
    const REQUIRED_BY: &str = "s3 storage";

    let access_key_id = env.require(vars::AWS_ACCESS_KEY_ID, REQUIRED_BY)?;
    let secret_access_key = env.require(vars::AWS_SECRET_ACCESS_KEY, REQUIRED_BY)?;
    let bucket = env.require(vars::AWS_STORAGE_BUCKET, REQUIRED_BY)?.trim();
    let endpoint = env.get_non_empty(vars::AWS_S3_ENDPOINT_URL).map(str::trim);

    let bucket_base_url = endpoint.map_or_else(
        || format!("https://{bucket}.s3.amazonaws.com"),
        |endpoint| format!("{}/{bucket}", endpoint.trim_end_matches('/')),
    );

    let (static_domain, media_domain) = custom_domains(
        env,
        &[vars::AWS_STATIC_DOMAIN, vars::STATIC_DOMAIN],
        &[vars::AWS_MEDIA_DOMAIN, vars::MEDIA_DOMAIN],
    );

    Ok(ProviderFields {
        access_key_id: access_key_id.to_string(),
        secret_access_key: secret_access_key.to_string(),
        bucket: bucket.to_string(),
        endpoint_url: endpoint.map(str::to_string),
        region: env.get_non_empty(vars::AWS_S3_REGION).map(str::to_string),
        addressing_style: None,
        signature_version: None,
        bucket_base_url,
        static_domain,
        media_domain,
    })
}

/// Resolves `(static_domain, media_domain)`; media falls back to static.
fn custom_domains(
    env: &EnvSnapshot,
    static_chain: &[&str],
    media_chain: &[&str],
) -> (String, String) {
    let static_domain = env.first_non_empty(static_chain).map(str::trim);
    let media_domain = first_non_empty([env.first_non_empty(media_chain), static_domain]);
    (
        static_domain.unwrap_or_default().to_string(),
        media_domain.map(str::trim).unwrap_or_default().to_string(),
    )
}

/// Resolves a bucket path prefix and strips surrounding slashes.
///
/// A value made only of slashes falls back to `default`.
fn path_prefix(env: &EnvSnapshot, chain: &[&str], default: &str) -> String {
    let stripped = env
        .first_non_empty(chain)
        .map(|value| value.trim().trim_matches('/'))
        .filter(|value| !value.is_empty());
    stripped.unwrap_or(default).to_string()
}

fn public_base(descriptor: &DomainDescriptor, bucket_base_url: &str) -> String {
    if descriptor.is_empty() {
        bucket_base_url.to_string()
    } else {
        descriptor.url.clone()
    }
}

/// Builds the storage configuration for an already selected provider.
///
/// Fails with [`ConfError::MissingVariable`](portal_conf_core::ConfError::MissingVariable)
/// when a variable required by the provider is unset; nothing partial is
/// returned.
pub fn build_config(
    env: &EnvSnapshot,
    flags: &StorageFlags,
    provider: ProviderChoice,
) -> ConfResult<ResolvedStorageConfiguration> {
    let fields = match provider {
        ProviderChoice::None => {
            tracing::info!("Remote storage disabled; using local storage");
            return Ok(local_config());
        }
        ProviderChoice::Spaces => spaces_fields(env)?,
        ProviderChoice::S3 => s3_fields(env)?,
    };

    let static_path = path_prefix(
        env,
        &[vars::SPACES_STATIC_PATH, vars::STATIC_PATH],
        DEFAULT_STATIC_PATH,
    );
    let media_path = path_prefix(
        env,
        &[vars::SPACES_MEDIA_PATH, vars::MEDIA_PATH],
        DEFAULT_MEDIA_PATH,
    );

    let media_domain = normalize_domain(&fields.media_domain);
    let media_base = public_base(&media_domain, &fields.bucket_base_url);
    if media_domain.is_empty() {
        tracing::debug!(base = %media_base, "No media custom domain; using bucket URL");
    }

    let mut storages = BTreeMap::new();
    storages.insert(
        DEFAULT_STORAGE_ALIAS.to_string(),
        StorageBackendSettings::with_options(
            S3_STORAGE_BACKEND,
            StorageOptions {
                location: media_path.clone(),
                file_overwrite: Some(false),
                custom_domain: media_domain.domain_opt(),
            },
        ),
    );

    let static_url = if flags.use_remote_static {
        let static_domain = normalize_domain(&fields.static_domain);
        let static_base = public_base(&static_domain, &fields.bucket_base_url);
        storages.insert(
            STATICFILES_STORAGE_ALIAS.to_string(),
            StorageBackendSettings::with_options(
                S3_STORAGE_BACKEND,
                StorageOptions {
                    location: static_path.clone(),
                    file_overwrite: None,
                    custom_domain: static_domain.domain_opt(),
                },
            ),
        );
        Some(format!("{static_base}/{static_path}/"))
    } else {
        storages.insert(
            STATICFILES_STORAGE_ALIAS.to_string(),
            StorageBackendSettings::new(MANIFEST_STATIC_BACKEND),
        );
        None
    };

    let mut object_parameters = BTreeMap::new();
    object_parameters.insert("CacheControl".to_string(), CACHE_CONTROL.to_string());
    let default_acl = if flags.storage_public {
        object_parameters.insert("ACL".to_string(), PUBLIC_READ_ACL.to_string());
        Some(PUBLIC_READ_ACL.to_string())
    } else {
        None
    };

    let media_url = format!("{media_base}/{media_path}/");

    tracing::info!(
        provider = %provider,
        bucket = %fields.bucket,
        media_url = %media_url,
        remote_static = flags.use_remote_static,
        public = flags.storage_public,
        "Remote storage configured"
    );

    Ok(ResolvedStorageConfiguration {
        provider,
        storages,
        object_storage: Some(ObjectStorageSettings {
            access_key_id: fields.access_key_id,
            secret_access_key: fields.secret_access_key,
            storage_bucket_name: fields.bucket,
            endpoint_url: fields.endpoint_url,
            region_name: fields.region,
            addressing_style: fields.addressing_style,
            signature_version: fields.signature_version,
            default_acl,
            querystring_auth: false,
            object_parameters,
        }),
        static_path,
        media_path,
        static_url,
        media_url: Some(media_url),
    })
}

fn local_config() -> ResolvedStorageConfiguration {
    let mut storages = BTreeMap::new();
    storages.insert(
        STATICFILES_STORAGE_ALIAS.to_string(),
        StorageBackendSettings::new(MANIFEST_STATIC_BACKEND),
    );
    ResolvedStorageConfiguration {
        provider: ProviderChoice::None,
        storages,
        object_storage: None,
        static_path: String::new(),
        media_path: String::new(),
        static_url: None,
        media_url: None,
    }
}
