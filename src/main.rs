//! photogrid CLI entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use photogrid::commands::{self, Layout};
use photogrid::config::{Config, LogFormat, LoggingConfig};
use photogrid::ui;

#[derive(Parser)]
#[command(name = "photogrid", version, about = "Browse, upload and delete photos on a remote gallery service")]
struct Cli {
    /// Config file (default: ./photogrid.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Photo service location, overrides config and PHOTOGRID_BASE_URL
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the photo grid
    List {
        /// Print the photo records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the details panel for one photo
    Show {
        /// Grid number or photo id
        target: String,
    },
    /// Upload a photo, then re-list
    Upload {
        /// Image file to upload
        file: PathBuf,
    },
    /// Delete a photo after confirmation, then re-list
    Delete {
        /// Grid number or photo id
        target: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Uploads per month
    Stats,
    /// The whole page: header, chart and grid
    View,
    /// Interactive gallery
    Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        ui::print_error_box_with_hints(
            "photogrid failed",
            Some(&format!("{e:#}")),
            &[
                "Check the service location with --base-url or PHOTOGRID_BASE_URL",
                "Run with -vv to see each request",
            ],
        );
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    config.apply_overrides(cli.base_url.as_deref());

    init_tracing(&config.logging, cli.verbose);
    match &config.source {
        Some(path) => tracing::debug!(path = %path.display(), "Loaded config"),
        None => tracing::debug!("No config file found, using defaults"),
    }

    let validation = config.validate()?;
    for warning in &validation.warnings {
        tracing::warn!("{warning}");
    }

    let gallery = commands::connect(&config)?;
    let layout = Layout::from_config(&config);

    match cli.command {
        Commands::List { json } => commands::list::execute(&gallery, layout, json).await,
        Commands::Show { target } => commands::show::execute(&gallery, &target).await,
        Commands::Upload { file } => commands::upload::execute(&gallery, layout, &file).await,
        Commands::Delete { target, yes } => {
            commands::delete::execute(&gallery, layout, &target, yes).await
        },
        Commands::Stats => commands::stats::execute(&gallery, layout).await,
        Commands::View => commands::view::execute(&gallery, layout).await,
        Commands::Shell => commands::shell::execute(&gallery, layout).await,
    }
}

/// Initialize logging to stderr.
///
/// `RUST_LOG` wins; otherwise `-v` flags, then the configured level, then `warn`.
fn init_tracing(config: &LoggingConfig, verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = match verbose {
        0 => config.level.clone().unwrap_or_else(|| "warn".to_string()),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
