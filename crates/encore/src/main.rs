//! Encore CLI - marketing site generator.
//!
//! Provides commands for:
//! - `export`: Freeze the site into the build directory (default)
//! - `serve`: Start the development server

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExportArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Encore - marketing site generator.
#[derive(Parser)]
#[command(name = "encore", version, about)]
struct Cli {
    /// Command to run (default: export).
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the site as static files.
    Export(ExportArgs),
    /// Start the development server.
    Serve(ServeArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Export(args) => args.verbose,
            Self::Serve(args) => args.verbose,
        }
    }
}

fn main() {
    // A missing .env file is not an error.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let output = Output::new();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Export(ExportArgs::default()));

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(command) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    match command {
        Commands::Export(args) => rt.block_on(args.execute()),
        Commands::Serve(args) => rt.block_on(args.execute()),
    }
}
