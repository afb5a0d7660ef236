//! `encore.toml` loading for Encore.
//!
//! A site is a directory holding `content/`, `templates/` and `static/`.
//! The config file is optional; when present (passed explicitly or found in
//! the working directory or one of its parents) its directory becomes the
//! site root, otherwise the working directory does.
//!
//! The canonical deployment URL comes from, in order of precedence:
//!
//! 1. [`CliSettings::site_url`]
//! 2. `site_url` in `encore.toml`
//! 3. the `SITE_URL` environment variable
//!
//! `site_url` and `server.host` accept `${VAR}` and `${VAR:-default}`
//! references, expanded when the file is read.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

/// Config file name looked up from the working directory upwards.
const CONFIG_FILENAME: &str = "encore.toml";

/// Environment variable holding the deployment site URL.
pub const SITE_URL_ENV: &str = "SITE_URL";

/// Command-line overrides, applied after the file and the environment.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Bind address for `serve`.
    pub host: Option<String>,
    /// Port for `serve`.
    pub port: Option<u16>,
    /// Deployment site URL.
    pub site_url: Option<String>,
    /// Export output directory, taken as given (not resolved against the
    /// site root).
    pub build_dir: Option<PathBuf>,
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Canonical deployment URL, kept exactly as configured.
    pub site_url: Option<String>,
    /// Development server settings.
    pub server: ServerConfig,
    /// `[paths]` table, relative to the site root.
    #[serde(rename = "paths")]
    raw_layout: RawLayout,

    /// Absolute site layout, filled in once the site root is known.
    #[serde(skip)]
    pub layout: SiteLayout,
    /// File the configuration was read from, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::rooted_at(Path::new("."))
    }
}

/// `[server]` table.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawLayout {
    content_dir: Option<String>,
    templates_dir: Option<String>,
    static_dir: Option<String>,
    admin_dir: Option<String>,
    admin_config: Option<String>,
    build_dir: Option<String>,
}

/// Where a site's inputs and outputs live.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    /// Directory of YAML section documents.
    pub content_dir: PathBuf,
    /// Directory of page templates.
    pub templates_dir: PathBuf,
    /// Static tree, served under `/static/` and copied into the export.
    pub static_dir: PathBuf,
    /// Admin asset tree served under `/admin/`.
    pub admin_dir: PathBuf,
    /// Admin configuration file rewritten during export.
    pub admin_config: PathBuf,
    /// Export output directory.
    pub build_dir: PathBuf,
}

impl SiteLayout {
    /// Resolve `raw` against `root`, filling in the default layout.
    ///
    /// `admin_config` defaults to `config.yml` inside the admin directory,
    /// so moving `admin_dir` moves the config with it.
    fn resolve(raw: &RawLayout, root: &Path) -> Self {
        let under = |path: Option<&String>, default: &str| {
            root.join(path.map_or(default, String::as_str))
        };
        let admin_dir = under(raw.admin_dir.as_ref(), "static/admin");
        let admin_config = raw
            .admin_config
            .as_ref()
            .map_or_else(|| admin_dir.join("config.yml"), |p| root.join(p));

        Self {
            content_dir: under(raw.content_dir.as_ref(), "content"),
            templates_dir: under(raw.templates_dir.as_ref(), "templates"),
            static_dir: under(raw.static_dir.as_ref(), "static"),
            admin_dir,
            admin_config,
            build_dir: under(raw.build_dir.as_ref(), "build"),
        }
    }
}

/// Error loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicitly requested config file does not exist.
    #[error("Config file {} does not exist", .0.display())]
    NotFound(PathBuf),
    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML for this schema.
    #[error("Invalid {CONFIG_FILENAME}: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    Validation(String),
    /// `${VAR}` reference could not be expanded.
    #[error("Cannot expand {field}: {message}")]
    EnvVar {
        /// Dotted field name, e.g. `server.host`.
        field: String,
        /// Expansion failure, e.g. `${SITE_URL} not set`.
        message: String,
    },
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Validation(message)
}

/// Absolute `http(s)` URL with a host.
fn check_site_url(value: &str, field: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| invalid(format!("{field} is not a valid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "{field} must start with http:// or https://"
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("{field} must include a host")));
    }
    Ok(())
}

impl Config {
    /// Load the site configuration.
    ///
    /// Reads `config_path` if given, else the nearest `encore.toml`, else
    /// falls back to defaults rooted at the working directory. `SITE_URL`
    /// then fills an unset site URL, and `cli_settings` override last.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` does not exist, the file
    /// cannot be read or parsed, or the result fails [`Config::validate`].
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let source = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config(),
        };

        let mut config = match source {
            Some(path) => Self::from_file(&path)?,
            None => Self::rooted_at(&std::env::current_dir().unwrap_or_default()),
        };

        config.fill_site_url_from_env(std::env::var(SITE_URL_ENV).ok());
        if let Some(settings) = cli_settings {
            config.apply_overrides(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Default configuration for a site rooted at `root`.
    #[must_use]
    pub fn rooted_at(root: &Path) -> Self {
        let raw_layout = RawLayout::default();
        Self {
            site_url: None,
            server: ServerConfig::default(),
            layout: SiteLayout::resolve(&raw_layout, root),
            raw_layout,
            config_path: None,
        }
    }

    /// Check the configured values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(invalid("server.host cannot be empty".to_owned()));
        }
        if self.server.port == 0 {
            return Err(invalid("server.port cannot be 0".to_owned()));
        }
        if let Some(site_url) = &self.site_url {
            check_site_url(site_url, "site_url")?;
        }
        Ok(())
    }

    /// Nearest `encore.toml` in the working directory or its ancestors.
    fn find_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        cwd.ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(&std::fs::read_to_string(path)?)?;

        config.server.host = expand::expand_env(&config.server.host, "server.host")?;
        if let Some(site_url) = config.site_url.take() {
            config.site_url = Some(expand::expand_env(&site_url, "site_url")?);
        }

        let root = path.parent().unwrap_or(Path::new("."));
        config.resolve_layout(root);
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn resolve_layout(&mut self, root: &Path) {
        self.layout = SiteLayout::resolve(&self.raw_layout, root);
    }

    /// A non-blank `SITE_URL` is used only when nothing set the URL yet.
    fn fill_site_url_from_env(&mut self, value: Option<String>) {
        if self.site_url.is_none() {
            self.site_url = value.filter(|v| !v.trim().is_empty());
        }
    }

    fn apply_overrides(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if settings.site_url.is_some() {
            self.site_url.clone_from(&settings.site_url);
        }
        if let Some(build_dir) = &settings.build_dir {
            self.layout.build_dir.clone_from(build_dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::rooted_at(Path::new("/site"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(config.site_url.is_none());
        assert_eq!(
            config.layout,
            SiteLayout {
                content_dir: PathBuf::from("/site/content"),
                templates_dir: PathBuf::from("/site/templates"),
                static_dir: PathBuf::from("/site/static"),
                admin_dir: PathBuf::from("/site/static/admin"),
                admin_config: PathBuf::from("/site/static/admin/config.yml"),
                build_dir: PathBuf::from("/site/build"),
            }
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(config.site_url.is_none());
    }

    #[test]
    fn test_parse_server_and_site_url() {
        let toml = r#"
site_url = "https://example.com"

[server]
host = "0.0.0.0"
port = 8000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_resolve_layout() {
        let toml = r#"
[paths]
content_dir = "data"
admin_dir = "public/cms"
build_dir = "dist"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_layout(Path::new("/project"));

        assert_eq!(config.layout.content_dir, PathBuf::from("/project/data"));
        assert_eq!(config.layout.admin_dir, PathBuf::from("/project/public/cms"));
        assert_eq!(
            config.layout.admin_config,
            PathBuf::from("/project/public/cms/config.yml")
        );
        assert_eq!(config.layout.build_dir, PathBuf::from("/project/dist"));
        assert_eq!(
            config.layout.templates_dir,
            PathBuf::from("/project/templates")
        );
    }

    #[test]
    fn test_resolve_explicit_admin_config() {
        let toml = r#"
[paths]
admin_config = "cms.yml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_layout(Path::new("/project"));

        assert_eq!(config.layout.admin_config, PathBuf::from("/project/cms.yml"));
    }

    #[test]
    fn test_env_site_url_used_when_unset() {
        let mut config = Config::rooted_at(Path::new("/site"));
        config.fill_site_url_from_env(Some("https://env.example.com".to_owned()));
        assert_eq!(config.site_url.as_deref(), Some("https://env.example.com"));
    }

    #[test]
    fn test_env_site_url_does_not_override_file() {
        let mut config: Config = toml::from_str(r#"site_url = "https://file.example.com""#).unwrap();
        config.fill_site_url_from_env(Some("https://env.example.com".to_owned()));
        assert_eq!(config.site_url.as_deref(), Some("https://file.example.com"));
    }

    #[test]
    fn test_env_site_url_blank_ignored() {
        let mut config = Config::rooted_at(Path::new("/site"));
        config.fill_site_url_from_env(Some("   ".to_owned()));
        assert!(config.site_url.is_none());
    }

    #[test]
    fn test_apply_overrides_multiple() {
        let mut config = Config::rooted_at(Path::new("/site"));
        config.site_url = Some("https://file.example.com".to_owned());

        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            site_url: Some("https://cli.example.com".to_owned()),
            build_dir: Some(PathBuf::from("/tmp/out")),
        };
        config.apply_overrides(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.site_url.as_deref(), Some("https://cli.example.com"));
        assert_eq!(config.layout.build_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_apply_overrides_empty() {
        let mut config = Config::rooted_at(Path::new("/site"));
        config.apply_overrides(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.layout.build_dir, PathBuf::from("/site/build"));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "site_url = \"https://example.com\"\n[paths]\ncontent_dir = \"copy\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.layout.content_dir, temp.path().join("copy"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/encore.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::rooted_at(Path::new("/site"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::rooted_at(Path::new("/site"));
        config.server.port = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::rooted_at(Path::new("/site"));
        config.server.host = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.host"));
    }

    #[test]
    fn test_validate_site_url_scheme() {
        let mut config = Config::rooted_at(Path::new("/site"));
        config.site_url = Some("ftp://example.com".to_owned());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_validate_site_url_not_a_url() {
        let mut config = Config::rooted_at(Path::new("/site"));
        config.site_url = Some("example.com".to_owned());
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Validation(_)
        ));
    }
}
