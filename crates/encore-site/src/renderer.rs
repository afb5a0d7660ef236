//! Template rendering.
//!
//! Templates are Jinja-style files loaded from the templates directory with
//! `minijinja`. Every render receives the page's own variables merged with
//! the site-wide SEO metadata under the name `seo`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use minijinja::{Environment, Value};
use serde::Serialize;

use crate::content::{ContentError, SiteMetadata};

/// Name under which site metadata is exposed to templates.
pub const SEO_VAR: &str = "seo";

/// Error returned when a page cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A section document failed to load.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Template lookup or evaluation failed.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Named variables for a single page render.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    vars: BTreeMap<String, Value>,
}

impl PageContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn insert<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) {
        self.vars
            .insert(name.to_owned(), Value::from_serialize(value));
    }

    /// Variable names in the context.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Whether a variable is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }
}

/// Renders templates from a directory.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// Create a renderer loading templates from `templates_dir`.
    ///
    /// Templates ending in `.html` are auto-escaped.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(templates_dir.into()));
        Self { env }
    }

    /// Render `template` with the page variables and site metadata.
    ///
    /// A page variable named `seo` takes precedence over the metadata.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the template is missing or fails
    /// to evaluate.
    pub fn render(
        &self,
        template: &str,
        page: PageContext,
        seo: &SiteMetadata,
    ) -> Result<String, RenderError> {
        let mut vars = page.vars;
        vars.entry(SEO_VAR.to_owned())
            .or_insert_with(|| Value::from_serialize(seo));

        let tmpl = self.env.get_template(template)?;
        Ok(tmpl.render(Value::from_serialize(&vars))?)
    }
}
