//! `encore serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use encore_config::{CliSettings, Config};
use encore_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover encore.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Canonical site URL (overrides config and SITE_URL).
    #[arg(long)]
    site_url: Option<String>,

    /// Enable verbose output (request and render logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            site_url: self.site_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.field(
            "Listening",
            format_args!("http://{}:{}", config.server.host, config.server.port),
        );
        output.field("Content", config.layout.content_dir.display());
        match &config.site_url {
            Some(site_url) => output.field("Site URL", site_url),
            None => output.warning("No site URL set; absolute URLs use the request host"),
        }

        run_server(server_config_from_config(&config))
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
