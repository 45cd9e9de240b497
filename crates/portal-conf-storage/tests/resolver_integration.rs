//! Integration tests for the storage resolver.
//!
//! Tests cover: provider selection from the environment, public URL
//! derivation for Spaces and S3, custom domains, the static/media asymmetry,
//! ACL handling, fail-fast on missing variables, and determinism.

use portal_conf_core::settings::{
    Settings, MANIFEST_STATIC_BACKEND, S3_STORAGE_BACKEND, STATICFILES_STORAGE_ALIAS,
};
use portal_conf_core::{ConfError, EnvSnapshot};
use portal_conf_storage::{normalize_domain, resolve, ProviderChoice};

fn spaces_env() -> EnvSnapshot {
    EnvSnapshot::from_pairs([
        ("USE_SPACES", "true"),
        ("SPACES_ENDPOINT", "https://nyc3.digitaloceanspaces.com"),
        ("SPACES_BUCKET", "mybucket"),
        ("SPACES_KEY", "spaces-key"),
        ("SPACES_SECRET", "spaces-secret"),
    ])
}

fn s3_credentials(env: EnvSnapshot) -> EnvSnapshot {
    env.with("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE")
        .with("AWS_SECRET_ACCESS_KEY", "aws-secret")
        .with("AWS_STORAGE_BUCKET", "portal-media")
}

// ═════════════════════════════════════════════════════════════════════
// 1. Provider selection
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_no_flags_resolves_to_local_storage() {
    let env = EnvSnapshot::from_pairs([("USE_SPACES", "false"), ("USE_S3", "no")]);
    let resolved = resolve(&env).unwrap();
    assert_eq!(resolved.provider, ProviderChoice::None);
    assert!(resolved.static_url.is_none());
    assert!(resolved.media_url.is_none());

    let map = resolved.to_settings_map();
    assert!(!map.contains_key("STATIC_URL"));
    assert!(!map.contains_key("MEDIA_URL"));
    assert!(!map.contains_key("AWS_ACCESS_KEY_ID"));
}

#[test]
fn test_explicit_s3_override_beats_flags() {
    for (spaces, s3) in [("false", "false"), ("true", "false"), ("true", "true")] {
        let env = s3_credentials(EnvSnapshot::from_pairs([
            ("STORAGE_PROVIDER", "S3"),
            ("USE_SPACES", spaces),
            ("USE_S3", s3),
        ]));
        assert_eq!(resolve(&env).unwrap().provider, ProviderChoice::S3);
    }
}

#[test]
fn test_both_flags_prefer_spaces() {
    let env = s3_credentials(spaces_env().with("USE_S3", "true"));
    let resolved = resolve(&env).unwrap();
    assert_eq!(resolved.provider, ProviderChoice::Spaces);
    assert_eq!(
        resolved.object_storage.unwrap().storage_bucket_name,
        "mybucket"
    );
}

// ═════════════════════════════════════════════════════════════════════
// 2. Domain normalization
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_normalize_domain_properties() {
    assert_eq!(
        normalize_domain("cdn.example.com").as_pair(),
        ("https://cdn.example.com", "cdn.example.com")
    );
    assert_eq!(
        normalize_domain("https://cdn.example.com/").as_pair(),
        ("https://cdn.example.com", "cdn.example.com")
    );
    assert_eq!(normalize_domain("").as_pair(), ("", ""));
}

// ═════════════════════════════════════════════════════════════════════
// 3. Public URLs
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_spaces_media_url_from_bucket() {
    let resolved = resolve(&spaces_env()).unwrap();
    assert_eq!(
        resolved.media_url.as_deref(),
        Some("https://nyc3.digitaloceanspaces.com/mybucket/media/")
    );
}

#[test]
fn test_spaces_media_url_from_custom_domain() {
    let env = spaces_env().with("SPACES_MEDIA_DOMAIN", "media.example.com");
    let resolved = resolve(&env).unwrap();
    assert_eq!(
        resolved.media_url.as_deref(),
        Some("https://media.example.com/media/")
    );
    let options = resolved.storages["default"].options.clone().unwrap();
    assert_eq!(options.custom_domain.as_deref(), Some("media.example.com"));
    assert_eq!(options.file_overwrite, Some(false));
}

#[test]
fn test_generic_paths_and_domains_for_s3() {
    let env = s3_credentials(EnvSnapshot::from_pairs([
        ("USE_S3", "1"),
        ("USE_REMOTE_STATIC", "1"),
        ("STATIC_PATH", "/assets/"),
        ("MEDIA_PATH", "uploads"),
        ("STATIC_DOMAIN", "https://static.example.com"),
        ("AWS_MEDIA_DOMAIN", "http://media.example.com/"),
    ]));
    let resolved = resolve(&env).unwrap();
    assert_eq!(
        resolved.static_url.as_deref(),
        Some("https://static.example.com/assets/")
    );
    assert_eq!(
        resolved.media_url.as_deref(),
        Some("http://media.example.com/uploads/")
    );
    assert_eq!(resolved.static_path, "assets");
    assert_eq!(resolved.media_path, "uploads");
}

#[test]
fn test_static_url_untouched_without_remote_static() {
    let env = spaces_env()
        .with("USE_REMOTE_STATIC", "false")
        .with("SPACES_STATIC_DOMAIN", "static.example.com");
    let resolved = resolve(&env).unwrap();
    assert!(resolved.static_url.is_none());
    assert_eq!(
        resolved.storages[STATICFILES_STORAGE_ALIAS].backend,
        MANIFEST_STATIC_BACKEND
    );

    let mut settings = Settings::default();
    resolved.apply_to(&mut settings);
    assert_eq!(settings.static_url, "/static/");
    // Media follows the static domain even when static stays local.
    assert_eq!(settings.media_url, "https://static.example.com/media/");
}

#[test]
fn test_remote_static_switches_backend() {
    let env = spaces_env().with("USE_REMOTE_STATIC", "on");
    let resolved = resolve(&env).unwrap();
    assert_eq!(
        resolved.static_url.as_deref(),
        Some("https://nyc3.digitaloceanspaces.com/mybucket/static/")
    );
    assert_eq!(
        resolved.storages[STATICFILES_STORAGE_ALIAS].backend,
        S3_STORAGE_BACKEND
    );
}

// ═════════════════════════════════════════════════════════════════════
// 4. ACL
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_storage_public_sets_both_acls() {
    let public = resolve(&spaces_env().with("STORAGE_PUBLIC", "true")).unwrap();
    let map = public.to_settings_map();
    assert_eq!(map["AWS_DEFAULT_ACL"], "public-read");
    assert_eq!(map["AWS_S3_OBJECT_PARAMETERS"]["ACL"], "public-read");

    let private = resolve(&spaces_env().with("STORAGE_PUBLIC", "false")).unwrap();
    let map = private.to_settings_map();
    assert!(map["AWS_DEFAULT_ACL"].is_null());
    assert!(map["AWS_S3_OBJECT_PARAMETERS"].get("ACL").is_none());
    assert_eq!(map["AWS_QUERYSTRING_AUTH"], false);
}

// ═════════════════════════════════════════════════════════════════════
// 5. Failure semantics
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_required_variables_fail_fast() {
    let env = EnvSnapshot::from_pairs([("USE_S3", "true"), ("AWS_ACCESS_KEY_ID", "AKIA")]);
    let err = resolve(&env).unwrap_err();
    assert!(matches!(
        err,
        ConfError::MissingVariable { ref name, .. } if name == "AWS_SECRET_ACCESS_KEY"
    ));

    let env = spaces_env().with("SPACES_BUCKET", "");
    let err = resolve(&env).unwrap_err();
    assert!(err.to_string().contains("SPACES_BUCKET"));
}

#[test]
fn test_missing_variables_ignored_when_provider_is_none() {
    let env = EnvSnapshot::from_pairs([("SPACES_ENDPOINT", "https://x")]);
    assert!(resolve(&env).is_ok());
}

// ═════════════════════════════════════════════════════════════════════
// 6. Determinism
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_resolution_is_byte_identical() {
    let env = s3_credentials(spaces_env())
        .with("USE_REMOTE_STATIC", "yes")
        .with("STORAGE_PUBLIC", "yes")
        .with("SPACES_MEDIA_DOMAIN", "media.example.com");
    let first = serde_json::to_string(&resolve(&env).unwrap().to_settings_map()).unwrap();
    let second = serde_json::to_string(&resolve(&env).unwrap().to_settings_map()).unwrap();
    assert_eq!(first, second);
    assert_eq!(resolve(&env).unwrap(), resolve(&env).unwrap());
}
