//! HTTP server for the Encore site generator.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - the rendered home page
//! - the static tree under `/static/`
//! - the admin asset tree under `/admin/`
//! - `robots.txt` and `sitemap.xml` with absolute URLs for the requesting host
//!
//! The same router is driven in-process by `encore-export` to freeze the
//! site into static files.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use encore_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 5000,
//!         content_dir: PathBuf::from("content"),
//!         templates_dir: PathBuf::from("templates"),
//!         static_dir: PathBuf::from("static"),
//!         admin_dir: PathBuf::from("static/admin"),
//!         site_url: None,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (encore-server)
//!                        │
//!                        ├─► /            ──► Site::render_home (encore-site)
//!                        ├─► /robots.txt  ──► robots_for(request origin)
//!                        ├─► /sitemap.xml ──► sitemap_xml(indexable routes)
//!                        ├─► /static/*    ──► tower-http ServeDir
//!                        ├─► /admin       ──► 308 to /admin/
//!                        └─► /admin/*     ──► tower-http ServeDir
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use encore_site::{Site, SiteOrigin};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory of YAML section documents.
    pub content_dir: PathBuf,
    /// Directory of page templates.
    pub templates_dir: PathBuf,
    /// Static tree served under `/static/`.
    pub static_dir: PathBuf,
    /// Admin asset tree served under `/admin/`.
    pub admin_dir: PathBuf,
    /// Canonical site URL, used as the origin when a request has no host.
    pub site_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            content_dir: PathBuf::from("content"),
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
            admin_dir: PathBuf::from("static/admin"),
            site_url: None,
        }
    }
}

/// Build the application router.
///
/// # Errors
///
/// Returns an error if `site_url` is set but is not an absolute URL.
pub fn create_app(config: &ServerConfig) -> Result<Router, url::ParseError> {
    let fallback_origin = config
        .site_url
        .as_deref()
        .map(SiteOrigin::parse)
        .transpose()?;

    let state = Arc::new(AppState {
        site: Site::new(config.content_dir.clone(), config.templates_dir.clone()),
        static_dir: config.static_dir.clone(),
        admin_dir: config.admin_dir.clone(),
        fallback_origin,
    });

    Ok(app::create_router(state))
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_app(&config)?;

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Encore config.
#[must_use]
pub fn server_config_from_config(config: &encore_config::Config) -> ServerConfig {
    let paths = &config.layout;
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        content_dir: paths.content_dir.clone(),
        templates_dir: paths.templates_dir.clone(),
        static_dir: paths.static_dir.clone(),
        admin_dir: paths.admin_dir.clone(),
        site_url: config.site_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_server_config_from_config() {
        let mut config = encore_config::Config::rooted_at(Path::new("/site"));
        config.site_url = Some("https://example.com".to_owned());

        let server = server_config_from_config(&config);

        assert_eq!(server.port, 5000);
        assert_eq!(server.content_dir, PathBuf::from("/site/content"));
        assert_eq!(server.templates_dir, PathBuf::from("/site/templates"));
        assert_eq!(server.static_dir, PathBuf::from("/site/static"));
        assert_eq!(server.admin_dir, PathBuf::from("/site/static/admin"));
        assert_eq!(server.site_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_create_app_rejects_relative_site_url() {
        let config = ServerConfig {
            site_url: Some("example.com".to_owned()),
            ..ServerConfig::default()
        };
        assert!(create_app(&config).is_err());
    }
}
