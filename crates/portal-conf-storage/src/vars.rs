//! Environment variable names read by the storage resolver.

/// Flag: enable DigitalOcean Spaces.
pub const USE_SPACES: &str = "USE_SPACES";
/// Flag: enable AWS S3.
pub const USE_S3: &str = "USE_S3";
/// Flag: serve static files from the bucket as well.
pub const USE_REMOTE_STATIC: &str = "USE_REMOTE_STATIC";
/// Explicit provider override (`spaces` or `s3`, case-insensitive).
pub const STORAGE_PROVIDER: &str = "STORAGE_PROVIDER";
/// Flag: upload objects with the `public-read` ACL.
pub const STORAGE_PUBLIC: &str = "STORAGE_PUBLIC";

/// Spaces endpoint, e.g. `https://nyc3.digitaloceanspaces.com`.
pub const SPACES_ENDPOINT: &str = "SPACES_ENDPOINT";
/// Spaces region.
pub const SPACES_REGION: &str = "SPACES_REGION";
/// Spaces bucket name.
pub const SPACES_BUCKET: &str = "SPACES_BUCKET";
/// Spaces access key.
pub const SPACES_KEY: &str = "SPACES_KEY";
/// Spaces secret key.
pub const SPACES_SECRET: &str = "SPACES_SECRET";
/// Spaces static path prefix.
pub const SPACES_STATIC_PATH: &str = "SPACES_STATIC_PATH";
/// Spaces media path prefix.
pub const SPACES_MEDIA_PATH: &str = "SPACES_MEDIA_PATH";
/// Spaces static custom domain.
pub const SPACES_STATIC_DOMAIN: &str = "SPACES_STATIC_DOMAIN";
/// Spaces media custom domain.
pub const SPACES_MEDIA_DOMAIN: &str = "SPACES_MEDIA_DOMAIN";

/// S3 access key id.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// S3 secret access key.
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// S3 bucket name.
pub const AWS_STORAGE_BUCKET: &str = "AWS_STORAGE_BUCKET";
/// S3 region.
pub const AWS_S3_REGION: &str = "AWS_S3_REGION";
/// S3-compatible endpoint override.
pub const AWS_S3_ENDPOINT_URL: &str = "AWS_S3_ENDPOINT_URL";
/// S3 static custom domain.
pub const AWS_STATIC_DOMAIN: &str = "AWS_STATIC_DOMAIN";
/// S3 media custom domain.
pub const AWS_MEDIA_DOMAIN: &str = "AWS_MEDIA_DOMAIN";

/// Generic static path prefix.
pub const STATIC_PATH: &str = "STATIC_PATH";
/// Generic media path prefix.
pub const MEDIA_PATH: &str = "MEDIA_PATH";
/// Generic static custom domain.
pub const STATIC_DOMAIN: &str = "STATIC_DOMAIN";
/// Generic media custom domain.
pub const MEDIA_DOMAIN: &str = "MEDIA_DOMAIN";
