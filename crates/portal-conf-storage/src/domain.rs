//! Custom-domain normalization.

use serde::Serialize;

/// A custom domain split into its public URL and bare host.
///
/// Both parts are empty when no domain was configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainDescriptor {
    /// The domain with its protocol, e.g. `https://cdn.example.com`.
    pub url: String,
    /// The domain without protocol, e.g. `cdn.example.com`.
    pub domain: String,
}

impl DomainDescriptor {
    /// Returns `true` when no domain was configured.
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }

    /// Borrows the descriptor as a `(url, domain)` pair.
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.url, &self.domain)
    }

    /// The bare domain, or `None` when empty.
    pub fn domain_opt(&self) -> Option<String> {
        (!self.domain.is_empty()).then(|| self.domain.clone())
    }
}

/// Splits a custom domain into `(url, domain)`.
///
/// Trailing slashes are dropped. A value that already carries `http://` or
/// `https://` keeps its protocol; anything else is assumed to be `https`.
/// Normalizing the returned `url` again yields the same pair.
///
/// # Examples
///
/// ```
/// use portal_conf_storage::domain::normalize_domain;
///
/// assert_eq!(
///     normalize_domain("cdn.example.com").as_pair(),
///     ("https://cdn.example.com", "cdn.example.com")
/// );
/// assert_eq!(
///     normalize_domain("https://cdn.example.com/").as_pair(),
///     ("https://cdn.example.com", "cdn.example.com")
/// );
/// assert_eq!(normalize_domain("").as_pair(), ("", ""));
/// ```
pub fn normalize_domain(raw: &str) -> DomainDescriptor {
    let cleaned = raw.trim_end_matches('/');
    if cleaned.is_empty() {
        return DomainDescriptor::default();
    }

    if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
        if let Some((protocol, domain)) = cleaned.split_once("://") {
            return DomainDescriptor {
                url: format!("{protocol}://{domain}"),
                domain: domain.to_string(),
            };
        }
    }

    DomainDescriptor {
        url: format!("https://{cleaned}"),
        domain: cleaned.to_string(),
    }
}
