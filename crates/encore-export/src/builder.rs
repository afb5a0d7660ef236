//! Static site export.
//!
//! Freezes the site by sending an in-process request for every route
//! without path parameters through the server's router and writing each
//! response body to a mirrored file under the build directory.

use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use encore_server::ServerConfig;
use encore_site::{Route, SiteOrigin};
use tower::ServiceExt;

use crate::admin_config::{self, RewriteSummary};
use crate::error::ExportError;

/// Location of the admin config inside the build directory.
const BUILD_ADMIN_CONFIG: &str = "admin/config.yml";

/// Directory the static tree is copied to inside the build directory.
const BUILD_STATIC_DIR: &str = "static";

/// Configuration for a static export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Deployment URL, written verbatim into the admin config.
    pub site_url: String,
    /// Directory of YAML section documents.
    pub content_dir: PathBuf,
    /// Directory of page templates.
    pub templates_dir: PathBuf,
    /// Static files copied into the build.
    pub static_dir: PathBuf,
    /// Admin asset tree.
    pub admin_dir: PathBuf,
    /// Admin configuration file, rewritten in place.
    pub admin_config: PathBuf,
    /// Output directory, replaced on every run.
    pub build_dir: PathBuf,
}

impl ExportConfig {
    /// Create export configuration from Encore config.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingSiteUrl`] if no site URL is configured.
    pub fn from_config(config: &encore_config::Config) -> Result<Self, ExportError> {
        let site_url = config.site_url.clone().ok_or(ExportError::MissingSiteUrl)?;
        let paths = &config.layout;
        Ok(Self {
            site_url,
            content_dir: paths.content_dir.clone(),
            templates_dir: paths.templates_dir.clone(),
            static_dir: paths.static_dir.clone(),
            admin_dir: paths.admin_dir.clone(),
            admin_config: paths.admin_config.clone(),
            build_dir: paths.build_dir.clone(),
        })
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            content_dir: self.content_dir.clone(),
            templates_dir: self.templates_dir.clone(),
            static_dir: self.static_dir.clone(),
            admin_dir: self.admin_dir.clone(),
            site_url: Some(self.site_url.clone()),
            ..ServerConfig::default()
        }
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Files written, relative to the build directory.
    pub files: Vec<PathBuf>,
    /// URL keys replaced in the admin config.
    pub rewritten: RewriteSummary,
}

/// Builds a static copy of the site.
pub struct StaticExporter {
    config: ExportConfig,
}

impl StaticExporter {
    /// Create an exporter.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Run the export.
    ///
    /// Steps, in order: check the build directory holds no input, clear the
    /// build directory, rewrite the admin config
    /// in place, freeze every static route, copy the static tree, copy the
    /// rewritten admin config into the build.
    ///
    /// # Errors
    ///
    /// Returns the first [`ExportError`]; the build directory is left as is.
    pub async fn export(&self) -> Result<ExportReport, ExportError> {
        let config = &self.config;
        let origin = SiteOrigin::parse(&config.site_url).map_err(|source| {
            ExportError::InvalidSiteUrl {
                url: config.site_url.clone(),
                source,
            }
        })?;

        check_build_dir(config)?;
        reset_dir(&config.build_dir)?;

        let rewritten = admin_config::rewrite_file(&config.admin_config, &config.site_url)?;

        let app = encore_server::create_app(&config.server_config()).map_err(|source| {
            ExportError::InvalidSiteUrl {
                url: config.site_url.clone(),
                source,
            }
        })?;

        let mut files = Vec::new();
        for route in encore_site::static_routes() {
            let body = freeze_route(&app, route, &origin).await?;
            let relative = output_path(route.path);
            write_file(&config.build_dir.join(&relative), &body)?;
            tracing::info!(route = route.path, file = %relative.display(), "Froze route");
            files.push(relative);
        }

        if config.static_dir.is_dir() {
            let target = config.build_dir.join(BUILD_STATIC_DIR);
            for copied in copy_tree(&config.static_dir, &target)? {
                files.push(Path::new(BUILD_STATIC_DIR).join(copied));
            }
        } else {
            tracing::debug!(dir = %config.static_dir.display(), "No static directory to copy");
        }

        let admin_target = config.build_dir.join(BUILD_ADMIN_CONFIG);
        copy_file(&config.admin_config, &admin_target)?;
        files.push(PathBuf::from(BUILD_ADMIN_CONFIG));

        Ok(ExportReport { files, rewritten })
    }
}

/// Request a route in-process as if it were served from `origin`.
///
/// The origin travels as a request extension, which the router prefers over
/// the `Host` header.
async fn freeze_route(
    app: &Router,
    route: &Route,
    origin: &SiteOrigin,
) -> Result<Vec<u8>, ExportError> {
    let request = Request::builder()
        .uri(route.path)
        .header(header::HOST, origin.host())
        .extension(origin.clone())
        .body(Body::empty())?;

    let response = match app.clone().oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    let status = response.status();
    if !status.is_success() {
        return Err(ExportError::Route {
            path: route.path.to_owned(),
            status: status.as_u16(),
        });
    }

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|source| ExportError::Body {
            path: route.path.to_owned(),
            source,
        })?;
    Ok(bytes.to_vec())
}

/// Map a route path to a file path relative to the build directory.
///
/// Directory-like paths get an `index.html`.
fn output_path(route_path: &str) -> PathBuf {
    let relative = route_path.trim_start_matches('/');
    if relative.is_empty() || relative.ends_with('/') {
        PathBuf::from(format!("{relative}index.html"))
    } else {
        PathBuf::from(relative)
    }
}

/// Refuse a build directory that overlaps any input.
///
/// The build directory is deleted before the export, so it must not be or
/// contain an input; an input containing it would be copied into itself.
fn check_build_dir(config: &ExportConfig) -> Result<(), ExportError> {
    let build = resolve(&config.build_dir)?;
    let inputs = [
        &config.content_dir,
        &config.templates_dir,
        &config.static_dir,
        &config.admin_dir,
        &config.admin_config,
    ];
    for input in inputs {
        let resolved = resolve(input)?;
        if resolved.starts_with(&build) || build.starts_with(&resolved) {
            return Err(ExportError::UnsafeBuildDir {
                build_dir: config.build_dir.clone(),
                input: input.clone(),
            });
        }
    }
    Ok(())
}

/// Absolute path with symlinks resolved in its longest existing ancestor.
fn resolve(path: &Path) -> Result<PathBuf, ExportError> {
    let absolute = std::path::absolute(path).map_err(|e| ExportError::io("resolve", path, e))?;
    for ancestor in absolute.ancestors() {
        if let Ok(real) = ancestor.canonicalize() {
            return Ok(match absolute.strip_prefix(ancestor) {
                Ok(rest) if !rest.as_os_str().is_empty() => real.join(rest),
                _ => real,
            });
        }
    }
    Ok(absolute)
}

/// Remove `dir` if present and recreate it empty.
fn reset_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).map_err(|e| ExportError::io("remove", dir, e))?;
    }
    std::fs::create_dir_all(dir).map_err(|e| ExportError::io("create", dir, e))
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ExportError::io("create", parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| ExportError::io("write", path, e))
}

fn copy_file(from: &Path, to: &Path) -> Result<(), ExportError> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ExportError::io("create", parent, e))?;
    }
    std::fs::copy(from, to).map_err(|e| ExportError::io("copy", from, e))?;
    Ok(())
}

/// Recursively copy `from` into `to`, returning copied paths relative to `from`.
fn copy_tree(from: &Path, to: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let mut copied = Vec::new();
    copy_tree_inner(from, from, to, &mut copied)?;
    Ok(copied)
}

fn copy_tree_inner(
    base: &Path,
    dir: &Path,
    to: &Path,
    copied: &mut Vec<PathBuf>,
) -> Result<(), ExportError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ExportError::io("read", dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| ExportError::io("read", dir, e))?.path();
        if path.is_dir() {
            copy_tree_inner(base, &path, to, copied)?;
        } else if let Ok(rel) = path.strip_prefix(base) {
            copy_file(&path, &to.join(rel))?;
            copied.push(rel.to_path_buf());
        }
    }
    Ok(())
}
