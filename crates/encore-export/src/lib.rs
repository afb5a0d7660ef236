//! Static export for Encore.
//!
//! Rewrites the admin configuration's URL fields to the deployment URL,
//! freezes every parameterless route into the build directory, and copies
//! the static tree and rewritten admin config alongside.

mod admin_config;
mod builder;
mod error;

pub use admin_config::{RewriteSummary, URL_KEYS, rewrite_file, rewrite_urls};
pub use builder::{ExportConfig, ExportReport, StaticExporter};
pub use error::ExportError;
