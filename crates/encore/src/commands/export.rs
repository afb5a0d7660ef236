//! `encore export` command implementation.

use std::path::PathBuf;

use clap::Args;
use encore_config::{CliSettings, Config};
use encore_export::{ExportConfig, StaticExporter};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args, Default)]
pub(crate) struct ExportArgs {
    /// Path to configuration file (default: auto-discover encore.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Deployment URL (overrides config and SITE_URL).
    #[arg(long)]
    pub site_url: Option<String>,

    /// Output directory (overrides config, default: build/).
    #[arg(short, long)]
    pub build_dir: Option<PathBuf>,

    /// Enable verbose output (log each frozen route).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the site URL is missing, or
    /// any export step fails.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            site_url: self.site_url,
            build_dir: self.build_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let export_config = ExportConfig::from_config(&config)?;

        output.field("Site URL", &export_config.site_url);
        output.field("Output", export_config.build_dir.display());

        let build_dir = export_config.build_dir.clone();
        let report = StaticExporter::new(export_config).export().await?;

        for key in report.rewritten.missing() {
            output.warning(&format!("Admin config has no {key} to rewrite"));
        }
        output.success(&format!(
            "Exported {} files to {}",
            report.files.len(),
            build_dir.display()
        ));
        Ok(())
    }
}
