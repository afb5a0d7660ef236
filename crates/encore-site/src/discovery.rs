//! `robots.txt` and `sitemap.xml` generation.

use std::fmt::Write;

use crate::origin::SiteOrigin;
use crate::routes::{self, RouteKind, ROUTES};

/// Sitemap protocol namespace.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` entry in the sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Absolute page URL.
    pub loc: String,
    /// Priority relative to other pages, e.g. `1.0`.
    pub priority: String,
}

/// Render `robots.txt`: allow everything and point at the sitemap.
#[must_use]
pub fn robots_txt(sitemap_url: &str) -> String {
    let sitemap = format!("Sitemap: {sitemap_url}");
    ["User-agent: *", "Disallow:", sitemap.as_str()].join("\n")
}

/// Render `robots.txt` for an origin.
#[must_use]
pub fn robots_for(origin: &SiteOrigin) -> String {
    robots_txt(&origin.url_for(routes::path_for(RouteKind::Sitemap)))
}

/// Sitemap entries for every indexable route.
#[must_use]
pub fn sitemap_entries(origin: &SiteOrigin) -> Vec<SitemapEntry> {
    ROUTES
        .iter()
        .filter_map(|route| {
            route.sitemap_priority.map(|priority| SitemapEntry {
                loc: origin.url_for(route.path),
                priority: priority.to_owned(),
            })
        })
        .collect()
}

/// Render a sitemap document.
#[must_use]
pub fn sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(256);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(xml, "<urlset xmlns=\"{SITEMAP_NS}\">");
    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape(&entry.loc));
        let _ = writeln!(xml, "    <priority>{}</priority>", escape(&entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>");
    xml
}

/// Escape XML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(c),
        }
    }
    result
}
