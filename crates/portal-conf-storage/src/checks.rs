//! System checks for the storage configuration.

use portal_conf_core::checks::{CheckMessage, CheckRegistry};
use portal_conf_core::env::EnvSnapshot;
use portal_conf_core::settings::Settings;

use crate::builder::PUBLIC_READ_ACL;
use crate::provider::{ProviderChoice, StorageFlags};
use crate::vars;

/// Registers the storage checks under the `storage` tag.
pub fn register_storage_checks(registry: &mut CheckRegistry) {
    registry.register(check_conflicting_flags, &["storage"]);
    registry.register(check_public_acl, &["storage", "security"]);
    registry.register(check_unknown_provider, &["storage"]);
    registry.register(check_insecure_public_urls, &["storage", "security"]);
}

fn check_conflicting_flags(_settings: &Settings, env: &EnvSnapshot) -> Vec<CheckMessage> {
    let flags = StorageFlags::from_env(env);
    let overridden = env
        .get(vars::STORAGE_PROVIDER)
        .and_then(ProviderChoice::from_identifier)
        .is_some();
    if flags.use_spaces && flags.use_s3 && !overridden {
        return vec![CheckMessage::warning(
            "Both USE_SPACES and USE_S3 are enabled; Spaces is used.",
            Some("Set STORAGE_PROVIDER=spaces or STORAGE_PROVIDER=s3 to make the choice explicit."),
            Some("USE_S3"),
            Some("storage.W001"),
        )];
    }
    Vec::new()
}

fn check_public_acl(settings: &Settings, _env: &EnvSnapshot) -> Vec<CheckMessage> {
    let public = settings
        .object_storage
        .as_ref()
        .and_then(|os| os.default_acl.as_deref())
        == Some(PUBLIC_READ_ACL);
    if public {
        return vec![CheckMessage::warning(
            "Uploaded objects are created with the public-read ACL.",
            Some("Prefer a bucket policy for public access and unset STORAGE_PUBLIC."),
            Some("STORAGE_PUBLIC"),
            Some("storage.W002"),
        )];
    }
    Vec::new()
}

fn check_unknown_provider(_settings: &Settings, env: &EnvSnapshot) -> Vec<CheckMessage> {
    match env.get_non_empty(vars::STORAGE_PROVIDER) {
        Some(value) if ProviderChoice::from_identifier(value).is_none() => {
            vec![CheckMessage::warning(
                format!("STORAGE_PROVIDER={value:?} is not recognised and was ignored."),
                Some("Use 'spaces' or 's3', or unset STORAGE_PROVIDER."),
                Some("STORAGE_PROVIDER"),
                Some("storage.W003"),
            )]
        }
        _ => Vec::new(),
    }
}

fn check_insecure_public_urls(settings: &Settings, _env: &EnvSnapshot) -> Vec<CheckMessage> {
    [("STATIC_URL", &settings.static_url), ("MEDIA_URL", &settings.media_url)]
        .into_iter()
        .filter(|(_, url)| url.starts_with("http://"))
        .map(|(name, url)| {
            CheckMessage::warning(
                format!("{name} is served over plain HTTP: {url}"),
                Some("Use an https:// custom domain or endpoint."),
                Some(name),
                Some("storage.W004"),
            )
        })
        .collect()
}
