mod camera;

use anyhow::{Context, Result};
use camera::{Camera, Windows};
use clap::Parser;
use fingertip_vision::cli::ConfigOverrides;
use fingertip_vision::{FrameAnalyzer, run_session};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Live centroid and fingertip tracking from a camera", long_about = None)]
struct Cli {
    /// Camera device index
    #[arg(value_name = "DEVICE")]
    device_index: Option<i32>,

    /// Camera device index (same as the positional argument)
    #[arg(short, long, conflicts_with = "device_index")]
    device: Option<i32>,

    /// Requested capture width
    #[arg(long)]
    width: Option<u32>,

    /// Requested capture height
    #[arg(long)]
    height: Option<u32>,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // --- 1. Argument Parsing & Setup ---
    let cli = Cli::parse();
    let mut config = cli.overrides.resolve().context("Failed to load configuration")?;
    if let Some(device) = cli.device.or(cli.device_index) {
        config.camera.device = device;
    }
    if let Some(width) = cli.width {
        config.camera.width = width;
    }
    if let Some(height) = cli.height {
        config.camera.height = height;
    }

    // --- 2. Vision Pipeline Initialization ---
    let analyzer = FrameAnalyzer::new(config.analyzer.clone())?;

    // --- 3. Camera & Window Initialization ---
    // Both are released on drop, whichever way the session ends.
    let mut camera = Camera::open(&config.camera)
        .with_context(|| format!("Failed to load webcam with device index {}", config.camera.device))?;
    let mut windows = Windows::open(config.session.show_mask)?;

    // --- 4. Main Processing Loop ---
    info!("Tracking started, press ESC to quit");
    let summary = run_session(&mut camera, &mut windows, &analyzer, &config.session)?;

    info!(
        "Processing complete: {} frames shown, {} skipped ({:?})",
        summary.frames_processed, summary.frames_skipped, summary.stop_reason
    );
    Ok(())
}
