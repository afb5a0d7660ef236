//! Unified site rendering.

use std::path::PathBuf;

use crate::content::ContentStore;
use crate::home::HomePage;
use crate::renderer::{PageContext, PageRenderer, RenderError};

/// Template rendered for the home page.
pub const HOME_TEMPLATE: &str = "index.html";

/// Content store plus renderer.
///
/// Every page render goes through [`Site::render_page`], which loads the
/// SEO metadata fresh and passes it to the renderer alongside the page's
/// own variables.
pub struct Site {
    content: ContentStore,
    renderer: PageRenderer,
}

impl Site {
    /// Create a site over a content directory and a templates directory.
    pub fn new(content_dir: impl Into<PathBuf>, templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            content: ContentStore::new(content_dir),
            renderer: PageRenderer::new(templates_dir),
        }
    }

    /// Section document store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Render `template` with `page` variables and the site metadata.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if `seo.yml` cannot be loaded or the template
    /// fails.
    pub fn render_page(&self, template: &str, page: PageContext) -> Result<String, RenderError> {
        let seo = self.content.load_seo()?;
        self.renderer.render(template, page, &seo)
    }

    /// Compose and render the home page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if any section is missing or malformed, or
    /// the template fails.
    pub fn render_home(&self) -> Result<String, RenderError> {
        let page = HomePage::compose(&self.content)?;
        self.render_page(HOME_TEMPLATE, page.into_context())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentError;

    const INDEX: &str = "<title>{{ seo.title }}</title>\
                         <h2>{{ work_heading }}</h2>\
                         <h2>{{ shows_heading }}</h2>\
                         <h2>{{ testimonials_heading }}</h2>\
                         <p>{{ hero.name }}</p>";

    fn site_with(sections: &[(&str, &str)]) -> (tempfile::TempDir, Site) {
        let temp = tempfile::tempdir().unwrap();
        let content = temp.path().join("content");
        let templates = temp.path().join("templates");
        std::fs::create_dir_all(&content).unwrap();
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(templates.join(HOME_TEMPLATE), INDEX).unwrap();
        for name in ["hero", "about", "work", "shows", "testimonials", "contact"] {
            std::fs::write(content.join(format!("{name}.yml")), "{}\n").unwrap();
        }
        std::fs::write(content.join("seo.yml"), "title: Jane Doe Live\n").unwrap();
        for (name, body) in sections {
            std::fs::write(content.join(format!("{name}.yml")), body).unwrap();
        }
        let site = Site::new(content, templates);
        (temp, site)
    }

    #[test]
    fn test_render_home_uses_default_headings() {
        let (_temp, site) = site_with(&[]);

        let html = site.render_home().unwrap();

        assert!(html.contains("<h2>MY WORK</h2>"));
        assert!(html.contains("<h2>UPCOMING SHOWS</h2>"));
        assert!(html.contains("<h2>TESTIMONIALS</h2>"));
        assert!(html.contains("<title>Jane Doe Live</title>"));
    }

    #[test]
    fn test_render_home_uses_configured_headings() {
        let (_temp, site) = site_with(&[
            ("work", "heading: Clips\n"),
            ("hero", "name: Jane\n"),
        ]);

        let html = site.render_home().unwrap();

        assert!(html.contains("<h2>Clips</h2>"));
        assert!(html.contains("<p>Jane</p>"));
    }

    #[test]
    fn test_render_home_missing_seo_fails() {
        let (temp, site) = site_with(&[]);
        std::fs::remove_file(temp.path().join("content/seo.yml")).unwrap();

        let err = site.render_home().unwrap_err();

        assert!(matches!(
            err,
            RenderError::Content(ContentError::NotFound { ref section, .. }) if section == "seo"
        ));
    }

    #[test]
    fn test_render_home_malformed_section_fails() {
        let (_temp, site) = site_with(&[("shows", "shows: [oops\n")]);

        let err = site.render_home().unwrap_err();

        assert!(matches!(err, RenderError::Content(ContentError::Parse { .. })));
    }

    #[test]
    fn test_render_page_injects_seo_for_other_templates() {
        let (temp, site) = site_with(&[]);
        std::fs::write(temp.path().join("templates/press.html"), "{{ seo.title }}|{{ quote }}")
            .unwrap();
        let mut ctx = PageContext::new();
        ctx.insert("quote", "Hilarious");

        let html = site.render_page("press.html", ctx).unwrap();

        assert_eq!(html, "Jane Doe Live|Hilarious");
    }
}
