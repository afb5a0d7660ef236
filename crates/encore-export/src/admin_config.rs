//! Admin configuration rewrite.
//!
//! The admin editor's `config.yml` carries the site's public URL in
//! `site_url`, `display_url` and `base_url` (the last one nested under
//! `backend`). Before export, every occurrence is pointed at the deployment
//! URL. The file is edited as YAML rather than as text, so each key's whole
//! value is replaced and nothing else on the line survives. Comments are
//! not preserved.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;

use crate::error::ExportError;

/// Keys whose values are replaced with the site URL.
pub const URL_KEYS: [&str; 3] = ["site_url", "display_url", "base_url"];

/// How many occurrences of each URL key were replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    counts: BTreeMap<&'static str, usize>,
}

impl RewriteSummary {
    /// Replacements made for `key`.
    #[must_use]
    pub fn count(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// URL keys that were not found anywhere in the document.
    pub fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
        URL_KEYS.into_iter().filter(|key| self.count(key) == 0)
    }
}

/// Point every URL key in `source` at `site_url`.
///
/// Returns the re-serialised document and what was replaced. An empty
/// document is returned unchanged.
///
/// # Errors
///
/// Returns the YAML error if `source` cannot be parsed or serialised.
pub fn rewrite_urls(source: &str, site_url: &str) -> Result<(String, RewriteSummary), serde_yaml::Error> {
    let mut summary = RewriteSummary::default();
    if source.trim().is_empty() {
        return Ok((source.to_owned(), summary));
    }

    let mut doc: Value = serde_yaml::from_str(source)?;
    replace_keys(&mut doc, site_url, &mut summary);
    Ok((serde_yaml::to_string(&doc)?, summary))
}

fn replace_keys(value: &mut Value, site_url: &str, summary: &mut RewriteSummary) {
    match value {
        Value::Mapping(map) => {
            for (key, entry) in map.iter_mut() {
                match key.as_str().and_then(|k| URL_KEYS.into_iter().find(|u| *u == k)) {
                    Some(url_key) => {
                        *entry = Value::String(site_url.to_owned());
                        *summary.counts.entry(url_key).or_default() += 1;
                    }
                    None => replace_keys(entry, site_url, summary),
                }
            }
        }
        Value::Sequence(items) => {
            for item in items {
                replace_keys(item, site_url, summary);
            }
        }
        Value::Tagged(tagged) => replace_keys(&mut tagged.value, site_url, summary),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// Rewrite the admin configuration file in place.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be read, parsed or written.
pub fn rewrite_file(path: &Path, site_url: &str) -> Result<RewriteSummary, ExportError> {
    let source = std::fs::read_to_string(path).map_err(|e| ExportError::io("read", path, e))?;

    let (rewritten, summary) =
        rewrite_urls(&source, site_url).map_err(|source| ExportError::AdminConfig {
            path: path.to_path_buf(),
            source,
        })?;

    for key in summary.missing() {
        tracing::warn!(key, path = %path.display(), "URL key not found in admin config");
    }

    std::fs::write(path, rewritten).map_err(|e| ExportError::io("write", path, e))?;
    tracing::info!(path = %path.display(), site_url, "Rewrote admin config URLs");
    Ok(summary)
}
