//! Section document loading.
//!
//! Every page region (hero, about, work, ...) is backed by one YAML file in
//! the content directory. Files are re-read on every call so edits made in
//! the admin UI show up on the next request.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::Value;

/// File extension of section documents.
const SECTION_EXTENSION: &str = "yml";

/// Section holding site-wide SEO metadata.
const SEO_SECTION: &str = "seo";

/// Error returned when a section document cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Section name is not a plain file stem.
    #[error("Invalid section name: {0:?}")]
    InvalidName(String),

    /// Section file does not exist.
    #[error("Section '{section}' not found at {}", path.display())]
    NotFound {
        /// Requested section name.
        section: String,
        /// Resolved file path.
        path: PathBuf,
    },

    /// Section file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Resolved file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Section file is not valid YAML.
    #[error("Invalid YAML in {}: {source}", path.display())]
    Parse {
        /// Resolved file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Directory of YAML section documents.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Content root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path backing a section.
    #[must_use]
    pub fn section_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{SECTION_EXTENSION}"))
    }

    /// Load and parse a section document.
    ///
    /// An empty file yields an empty document rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the name is invalid, the file is missing
    /// or unreadable, or its content is not valid YAML.
    pub fn load_section(&self, name: &str) -> Result<Section, ContentError> {
        validate_name(name)?;
        let path = self.section_path(name);

        let content = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ContentError::NotFound {
                    section: name.to_owned(),
                    path: path.clone(),
                }
            } else {
                ContentError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let value = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(&content).map_err(|source| ContentError::Parse {
                path: path.clone(),
                source,
            })?
        };

        tracing::debug!(section = name, path = %path.display(), "Loaded section");
        Ok(Section {
            name: name.to_owned(),
            value,
        })
    }

    /// Load the site-wide SEO metadata document.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if `seo.yml` is missing or malformed.
    pub fn load_seo(&self) -> Result<SiteMetadata, ContentError> {
        self.load_section(SEO_SECTION)
            .map(|section| SiteMetadata(section.value))
    }
}

/// Reject names that would escape the content root.
fn validate_name(name: &str) -> Result<(), ContentError> {
    let invalid = name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(ContentError::InvalidName(name.to_owned()));
    }
    Ok(())
}

/// A parsed section document.
///
/// The schema is section-specific and undeclared; accessors fall back to
/// defaults instead of failing. A YAML `null` counts as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    value: Value,
}

impl Section {
    /// Section name (file stem).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The whole document.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume the section, returning the whole document.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Look up a top-level key, treating `null` as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key).filter(|v| !v.is_null())
    }

    /// Sequence under `key`, or an empty list.
    #[must_use]
    pub fn list_or_empty(&self, key: &str) -> Vec<Value> {
        match self.get(key) {
            Some(Value::Sequence(items)) => items.clone(),
            Some(other) => {
                tracing::warn!(
                    section = %self.name,
                    key,
                    kind = value_kind(other),
                    "Expected a list, using empty default"
                );
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Scalar under `key` as text, or `default`.
    ///
    /// Numbers and booleans are stringified.
    #[must_use]
    pub fn text_or(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => {
                tracing::warn!(
                    section = %self.name,
                    key,
                    kind = value_kind(other),
                    "Expected text, using default"
                );
                default.to_owned()
            }
            None => default.to_owned(),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

/// Site-wide SEO metadata, exposed to every template as `seo`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SiteMetadata(Value);

impl SiteMetadata {
    /// Wrap an already-parsed document.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The whole document.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.0
    }
}
