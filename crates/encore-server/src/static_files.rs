//! Static and admin asset serving.
//!
//! Both trees are served verbatim with `tower-http`'s `ServeDir`, which
//! resolves paths safely inside the root and answers 404 for anything that
//! is not a file there. Directories are never listed or redirected: only
//! the admin root maps to its `index.html`, any other directory is a 404.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::state::AppState;

const ADMIN_MOUNT: &str = "/admin";
const STATIC_MOUNT: &str = "/static";

const ADMIN_INDEX: &str = "/index.html";

/// Handle GET /admin/.
pub(crate) async fn serve_admin_index(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Response {
    serve_file(&state.admin_dir, ADMIN_INDEX, req).await
}

/// Handle GET /admin/{*path}.
pub(crate) async fn serve_admin(State(state): State<Arc<AppState>>, req: Request) -> Response {
    serve_tree(&state.admin_dir, ADMIN_MOUNT, req).await
}

/// Handle GET /static/{*path}.
pub(crate) async fn serve_static(State(state): State<Arc<AppState>>, req: Request) -> Response {
    serve_tree(&state.static_dir, STATIC_MOUNT, req).await
}

/// Serve `req` from `root` after removing `mount` from its path.
async fn serve_tree(root: &Path, mount: &str, req: Request) -> Response {
    let path = relative_path(req.uri().path(), mount).to_owned();
    serve_file(root, &path, req).await
}

/// Serve the file at `path` (relative to `root`, percent-encoded).
async fn serve_file(root: &Path, path: &str, mut req: Request) -> Response {
    let Ok(uri) = path.parse::<Uri>() else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    *req.uri_mut() = uri;

    let service = ServeDir::new(root).append_index_html_on_directories(false);
    match service.oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Strip a mount point, keeping the percent-encoded remainder.
///
/// With mount `/admin`, `/admin/` becomes `/` and `/admin/css/app.css`
/// becomes `/css/app.css`.
fn relative_path<'a>(path: &'a str, mount: &str) -> &'a str {
    path.strip_prefix(mount)
        .filter(|rest| rest.starts_with('/'))
        .unwrap_or("/")
}
