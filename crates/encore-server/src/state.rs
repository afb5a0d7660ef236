//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;

use encore_site::{Site, SiteOrigin};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Content store and template renderer.
    pub(crate) site: Site,
    /// Static tree root.
    pub(crate) static_dir: PathBuf,
    /// Admin asset tree root.
    pub(crate) admin_dir: PathBuf,
    /// Origin used when a request carries no host header.
    pub(crate) fallback_origin: Option<SiteOrigin>,
}
