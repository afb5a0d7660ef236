//! `robots.txt` and `sitemap.xml` endpoints.

use axum::http::header;
use axum::response::IntoResponse;

use crate::handlers::RequestOrigin;

/// Handle GET /robots.txt.
pub(crate) async fn get_robots(RequestOrigin(origin): RequestOrigin) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        encore_site::robots_for(&origin),
    )
}

/// Handle GET /sitemap.xml.
pub(crate) async fn get_sitemap(RequestOrigin(origin): RequestOrigin) -> impl IntoResponse {
    let entries = encore_site::sitemap_entries(&origin);
    (
        [(header::CONTENT_TYPE, "text/xml; charset=utf-8")],
        encore_site::sitemap_xml(&entries),
    )
}
