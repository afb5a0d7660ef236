//! Absolute URL construction.

use url::Url;

/// Scheme, host and path prefix that absolute URLs are built from.
///
/// The server derives one per request; the exporter builds one from the
/// configured site URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOrigin {
    scheme: String,
    host: String,
    prefix: String,
}

impl SiteOrigin {
    /// Create an origin. `host` may include a port.
    ///
    /// The prefix is normalised to either empty or `/segment` without a
    /// trailing slash.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        let prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self {
            scheme: scheme.into(),
            host: host.into(),
            prefix,
        }
    }

    /// Build an origin from a parsed URL. Query and fragment are ignored.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_owned(),
            (None, _) => String::new(),
        };
        Self::new(url.scheme(), host, url.path())
    }

    /// Parse an origin from a URL string.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `url` is not an absolute URL.
    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Url::parse(url).map(|u| Self::from_url(&u))
    }

    /// URL scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host, including a non-default port.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Path prefix (empty or `/segment`).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Absolute URL for a site path starting with `/`.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}://{}{}{}", self.scheme, self.host, self.prefix, path)
    }
}
