//! Content loading and page rendering for Encore.
//!
//! This crate provides:
//! - [`ContentStore`]: YAML section documents, re-read on every call
//! - [`HomePage`]: the index route's sections with their fallbacks
//! - [`PageRenderer`]: `minijinja` templates with `seo` merged into every context
//! - [`Site`]: the store and renderer together
//! - [`ROUTES`]: the fixed route table shared by the server and exporter
//! - `robots.txt` and `sitemap.xml` generators
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use encore_site::Site;
//!
//! let site = Site::new("content", "templates");
//! let html = site.render_home()?;
//! # Ok(())
//! # }
//! ```

mod content;
mod discovery;
mod home;
mod origin;
mod renderer;
mod routes;
mod site;

pub use content::{ContentError, ContentStore, Section, SiteMetadata};
pub use discovery::{robots_for, robots_txt, sitemap_entries, sitemap_xml, SitemapEntry};
pub use home::{
    DEFAULT_SHOWS_HEADING, DEFAULT_TESTIMONIALS_HEADING, DEFAULT_WORK_HEADING, HomePage,
};
pub use origin::SiteOrigin;
pub use renderer::{PageContext, PageRenderer, RenderError, SEO_VAR};
pub use routes::{path_for, static_routes, Route, RouteKind, ROUTES};
pub use site::{HOME_TEMPLATE, Site};
