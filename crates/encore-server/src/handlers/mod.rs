//! HTTP request handlers.

pub(crate) mod discovery;
pub(crate) mod pages;

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header};
use axum::http::request::Parts;
use encore_site::SiteOrigin;

use crate::state::AppState;

/// Origin of the current request, for building absolute URLs.
///
/// A [`SiteOrigin`] request extension wins; the exporter sets one for every
/// frozen route. Otherwise the origin is `http://` plus the `Host` header.
/// `X-Forwarded-*` headers are client-controlled and never consulted.
pub(crate) struct RequestOrigin(pub(crate) SiteOrigin);

impl FromRequestParts<Arc<AppState>> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(origin) = parts.extensions.get::<SiteOrigin>() {
            return Ok(Self(origin.clone()));
        }
        Ok(Self(origin_from_headers(
            &parts.headers,
            state.fallback_origin.as_ref(),
        )))
    }
}

/// Derive the origin from the `Host` header, falling back to the configured
/// site URL (or `http://localhost`) when no host is present.
pub(crate) fn origin_from_headers(headers: &HeaderMap, fallback: Option<&SiteOrigin>) -> SiteOrigin {
    match host_header(headers) {
        Some(host) => SiteOrigin::new("http", host, ""),
        None => fallback
            .cloned()
            .unwrap_or_else(|| SiteOrigin::new("http", "localhost", "")),
    }
}

/// Trimmed, non-empty `Host` header.
fn host_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
