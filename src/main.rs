use std::path::PathBuf;

use aniview_ssg::{config::AppConfig, Site};
use clap::{Parser, Subcommand};
use eyre::Result;
use tracing::info;

#[derive(Parser)]
#[command(name = "aniview-ssg")]
#[command(about = "Build pipeline for the Aniview show-catalog site")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy passthrough assets and materialize the derived datasets
    Build {
        /// Override input directory path
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Override output directory path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the built site locally
    Serve {
        /// Override site directory to serve
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Override port to serve on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config_path = cli.config.as_ref().map(|p| p.to_string_lossy().to_string());
    let app_config = AppConfig::load_or_default(config_path.as_deref())?;

    info!(
        "Loaded configuration: {}",
        cli.config
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string())
    );

    match cli.command.unwrap_or(Commands::Build {
        input: None,
        output: None,
    }) {
        Commands::Build { input, output } => {
            let input_dir = input.unwrap_or_else(|| app_config.build.input_dir.clone());
            let output_dir = output.unwrap_or_else(|| app_config.build.output_dir.clone());

            info!("Building Aniview site...");
            info!("   Input:  {}", input_dir.display());
            info!("   Output: {}", output_dir.display());

            let site = Site {
                input_dir,
                output_dir,
                config: app_config,
            };
            site.build()?;

            info!("Site built successfully");
        }
        Commands::Serve { dir, port } => {
            let serve_dir = dir.unwrap_or_else(|| app_config.build.output_dir.clone());
            let serve_port = port.unwrap_or(app_config.dev.port);

            info!(
                "Serving site from {} on port {}",
                serve_dir.display(),
                serve_port
            );
            info!("   Visit: http://localhost:{}", serve_port);

            serve_directory(serve_dir, serve_port)?;
        }
    }

    Ok(())
}

/// Serve the output tree with Python's built-in file server. The built
/// site is plain static files, so nothing heavier is needed.
fn serve_directory(dir: PathBuf, port: u16) -> Result<()> {
    use std::process::Command;

    if !dir.exists() {
        eyre::bail!(
            "Directory '{}' does not exist. Run the build command first.",
            dir.display()
        );
    }

    let python = ["python3", "python"]
        .into_iter()
        .find(|cmd| Command::new(cmd).arg("--version").output().is_ok())
        .ok_or_else(|| eyre::eyre!("Python is required to serve files. Please install Python 3."))?;

    info!("Starting HTTP server...");

    let status = Command::new(python)
        .args(["-m", "http.server", &port.to_string()])
        .current_dir(&dir)
        .spawn()
        .map_err(|e| eyre::eyre!("Failed to start server in {}: {}", dir.display(), e))?
        .wait()?;

    if !status.success() {
        eyre::bail!(
            "Server on port {} exited with an error. The port might be in use; try a different one with --port <PORT>",
            port
        );
    }

    Ok(())
}
