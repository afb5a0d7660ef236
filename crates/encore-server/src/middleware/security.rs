//! Response security headers.
//!
//! No Content-Security-Policy: the admin editor loads its bundle from a CDN.

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Headers set on every response, overriding any handler value.
///
/// `SAMEORIGIN` rather than `DENY` keeps the editor's preview frames working.
pub(crate) const SECURITY_HEADERS: [(&str, &str); 2] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
];

/// Wrap `router` with one header layer per [`SECURITY_HEADERS`] entry.
pub(crate) fn with_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SECURITY_HEADERS
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
}
