//! Rendered pages.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Redirect};
use encore_site::RouteKind;

use super::RequestOrigin;
use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /.
///
/// Section documents and SEO metadata are read fresh on every request.
pub(crate) async fn get_home(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let html = state.site.render_home()?;
    Ok(Html(html))
}

/// Handle GET /admin by redirecting to the admin index.
pub(crate) async fn redirect_admin(RequestOrigin(origin): RequestOrigin) -> Redirect {
    let index = encore_site::path_for(RouteKind::AdminIndex);
    Redirect::permanent(&format!("{}{index}", origin.prefix()))
}
