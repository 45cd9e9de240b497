//! Media-library (filer) settings.
//!
//! Public files and their thumbnails always live on the remote backend.

use std::collections::BTreeMap;

use portal_conf_core::settings::{FilerSettings, FilerStorage, S3_STORAGE_BACKEND};

/// Canonical URL prefix for public files.
pub const FILER_CANONICAL_URL: &str = "public/";

/// Thumbnail pipeline, applied in order.
pub const THUMBNAIL_PROCESSORS: [&str; 4] = [
    "easy_thumbnails.processors.colorspace",
    "easy_thumbnails.processors.autocrop",
    "filer.thumbnail_processors.scale_and_crop_with_subject_location",
    "easy_thumbnails.processors.filters",
];

/// Returns the fixed media-library configuration.
pub fn filer_settings() -> FilerSettings {
    let public: BTreeMap<String, FilerStorage> = ["main", "thumbnails"]
        .into_iter()
        .map(|role| {
            (
                role.to_string(),
                FilerStorage {
                    engine: S3_STORAGE_BACKEND.to_string(),
                },
            )
        })
        .collect();

    let mut storages = BTreeMap::new();
    storages.insert("public".to_string(), public);

    FilerSettings {
        storages,
        canonical_url: FILER_CANONICAL_URL.to_string(),
        thumbnail_processors: THUMBNAIL_PROCESSORS.iter().map(ToString::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_storages_use_remote_backend() {
        let filer = filer_settings();
        let public = &filer.storages["public"];
        assert_eq!(public.len(), 2);
        assert_eq!(public["main"].engine, S3_STORAGE_BACKEND);
        assert_eq!(public["thumbnails"].engine, S3_STORAGE_BACKEND);
        assert!(!filer.storages.contains_key("private"));
    }

    #[test]
    fn test_canonical_url_and_processors() {
        let filer = filer_settings();
        assert_eq!(filer.canonical_url, "public/");
        assert_eq!(filer.thumbnail_processors.len(), 4);
        assert_eq!(filer.thumbnail_processors[0], "easy_thumbnails.processors.colorspace");
        assert_eq!(
            filer.thumbnail_processors.last().map(String::as_str),
            Some("easy_thumbnails.processors.filters")
        );
    }
}
