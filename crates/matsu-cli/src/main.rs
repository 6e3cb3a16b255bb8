mod build;
mod consts;
mod logging;
mod manifest;
mod preview;
mod server_utils;

use std::path::PathBuf;
use std::process::ExitCode;

use build::start_build;
use clap::{Parser, Subcommand};
use logging::init_logging;
use manifest::{Manifest, default_manifest_path, resolve_dist_dir};
use preview::{PreviewOptions, start_preview_web_server};
use tracing::{debug, error};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site by running its binary in release mode
    Build,
    /// Serve the built site
    Preview {
        /// Expose the server to the local network
        #[arg(long)]
        host: bool,
        /// Directory to serve, defaults to the output directory of the last build
        #[arg(long)]
        dist: Option<PathBuf>,
        /// Answer unknown paths with index.html instead of 404.html
        #[arg(long)]
        spa: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging();

    match cli.command {
        Commands::Build => {
            if start_build() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Preview { host, dist, spa } => {
            let manifest_path = default_manifest_path();
            let manifest = match Manifest::read(&manifest_path) {
                Ok(manifest) => Some(manifest),
                Err(err) => {
                    debug!(name: "preview", "No usable manifest at {}: {}", manifest_path.display(), err);
                    None
                }
            };

            let dist_dir = resolve_dist_dir(dist, manifest.as_ref());
            if !dist_dir.exists() {
                error!(name: "preview", "The directory {} does not exist. Please run `matsu build` first.", dist_dir.display());
                return ExitCode::FAILURE;
            }

            let options = PreviewOptions {
                dist_dir,
                host,
                spa,
                base: manifest.and_then(|manifest| manifest.base),
            };

            match start_preview_web_server(options).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    error!(name: "preview", "Preview server failed: {}", err);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
