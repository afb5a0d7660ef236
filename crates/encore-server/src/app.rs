//! Router construction.
//!
//! Mounts one handler per entry in the shared route table and adds the
//! response middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use encore_site::{ROUTES, RouteKind};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let router = ROUTES
        .iter()
        .fold(Router::new(), |router, route| match route.kind {
            RouteKind::Home => router.route(route.path, get(handlers::pages::get_home)),
            RouteKind::StaticAsset => router.route(route.path, get(static_files::serve_static)),
            RouteKind::AdminRedirect => {
                router.route(route.path, get(handlers::pages::redirect_admin))
            }
            RouteKind::AdminIndex => {
                router.route(route.path, get(static_files::serve_admin_index))
            }
            RouteKind::AdminAsset => router.route(route.path, get(static_files::serve_admin)),
            RouteKind::Robots => router.route(route.path, get(handlers::discovery::get_robots)),
            RouteKind::Sitemap => {
                router.route(route.path, get(handlers::discovery::get_sitemap))
            }
        });

    security::with_security_headers(router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
