//! Export error type.

use std::path::{Path, PathBuf};

/// Error returned by the static exporter.
///
/// Every variant aborts the export; files already written stay in place.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// No deployment URL configured.
    #[error("site URL is not configured (set SITE_URL or site_url in encore.toml)")]
    MissingSiteUrl,

    /// Deployment URL could not be parsed.
    #[error("Invalid site URL {url:?}: {source}")]
    InvalidSiteUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Filesystem operation failed.
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Admin configuration is not valid YAML.
    #[error("Invalid admin config {}: {source}", path.display())]
    AdminConfig {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Build directory is, contains or lies inside an input.
    #[error("Refusing to use build directory {} because it overlaps {}", build_dir.display(), input.display())]
    UnsafeBuildDir { build_dir: PathBuf, input: PathBuf },

    /// Request for a route could not be built.
    #[error("Invalid request: {0}")]
    Request(#[from] axum::http::Error),

    /// Route answered with a non-success status.
    #[error("Route {path} returned {status}")]
    Route { path: String, status: u16 },

    /// Route body could not be collected.
    #[error("Failed to read body of {path}: {source}")]
    Body {
        path: String,
        #[source]
        source: axum::Error,
    },
}

impl ExportError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}
