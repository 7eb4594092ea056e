// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use snapcam::app::{AppModel, Message, Runtime};
use snapcam::backends::camera::{CameraBackend, SyntheticCamera};
use snapcam::backends::haptics::NullHaptics;
use snapcam::backends::media_library::PicturesLibrary;
use snapcam::backends::permissions::HostPermissions;
use snapcam::config::AppConfig;
use snapcam::storage::PhotoStore;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "snapcam")]
#[command(about = "Camera capture and review workflow")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Override the blackout settle delay in milliseconds
    #[arg(long)]
    settle_delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a photo without the interactive front-end
    Snap,

    /// Export the current photo into the media library
    Save,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=snapcam=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if let Some(settle) = cli.settle_delay_ms {
        config.settle_delay_ms = settle;
    }

    match cli.command {
        Some(Commands::Snap) => snap(config),
        Some(Commands::Save) => save(config),
        None => snapcam::terminal::run(config),
    }
}

fn headless_model(config: AppConfig) -> AppModel {
    let library_root = config
        .library_dir
        .clone()
        .unwrap_or_else(PicturesLibrary::default_root);
    AppModel::new(
        config,
        PhotoStore::at_default(),
        Some(Arc::new(SyntheticCamera::new()) as Arc<dyn CameraBackend>),
        Arc::new(PicturesLibrary::new(library_root.clone())),
        Arc::new(HostPermissions::new(library_root)),
        Arc::new(NullHaptics),
    )
}

/// Headless capture: run the shutter flow to completion and print the
/// committed path.
fn snap(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut runtime = Runtime::new(headless_model(config));
        runtime.run_until_idle().await;

        runtime.dispatch(Message::Shutter);
        runtime.run_until_idle().await;

        match &runtime.model().review_photo {
            Some(photo) => {
                println!("{}", photo.path.display());
                Ok(())
            }
            None => {
                let reason = runtime
                    .model()
                    .status
                    .as_ref()
                    .map(|notice| notice.text.clone())
                    .unwrap_or_else(|| "capture did not complete".to_string());
                Err(reason.into())
            }
        }
    })
}

/// Headless export: import the current photo into the media library.
fn save(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut runtime = Runtime::new(headless_model(config));
        runtime.run_until_idle().await;

        // Enter the review screen so the save path is the same one the
        // interactive front-end takes.
        runtime.dispatch(Message::TogglePreview);
        runtime.run_until_idle().await;

        if runtime.model().review_photo.is_none() {
            return Err(snapcam::errors::ExportError::EmptyGallery.to_string().into());
        }

        runtime.dispatch(Message::SaveToLibrary);
        runtime.run_until_idle().await;

        match &runtime.model().status {
            Some(notice) if notice.kind == snapcam::app::StatusKind::Info => {
                println!("{}", notice.text);
                Ok(())
            }
            Some(notice) => Err(notice.text.clone().into()),
            None => Err("export did not complete".into()),
        }
    })
}
