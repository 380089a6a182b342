// Offline runner: analyzes a synthetic moving-disc clip and writes every
// annotated frame to disk. Useful for checking parameter changes without a camera.

use anyhow::{Context, Result};
use clap::Parser;
use fingertip_vision::cli::ConfigOverrides;
use fingertip_vision::core_modules::utils::image_helper::{save_gray_png, save_png};
use fingertip_vision::synthetic::SyntheticClip;
use fingertip_vision::{FrameAnalysis, FrameAnalyzer, FrameDisplay, run_session};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Run the fingertip analyzer over a synthetic clip", long_about = None)]
struct Cli {
    /// Directory the annotated frames are written to
    #[arg(short, long, default_value = "annotated")]
    output_dir: PathBuf,

    /// Number of frames in the clip
    #[arg(short, long, default_value_t = 30)]
    frames: u32,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

/// Writes each analysis as a numbered PNG instead of showing it.
struct PngSequence {
    dir: PathBuf,
    index: u32,
    write_masks: bool,
}

impl FrameDisplay for PngSequence {
    fn show(&mut self, analysis: &FrameAnalysis) -> fingertip_vision::Result<()> {
        save_png(&self.dir.join(format!("frame_{:04}.png", self.index)), &analysis.annotated)?;
        if self.write_masks {
            save_gray_png(&self.dir.join(format!("mask_{:04}.png", self.index)), &analysis.mask)?;
        }
        for region in &analysis.regions {
            info!(
                frame = self.index,
                centroid = ?region.centroid,
                fingertip = ?region.fingertip,
                area = region.area,
                "Region"
            );
        }
        self.index += 1;
        Ok(())
    }

    fn poll_key(&mut self, _wait_ms: i32) -> fingertip_vision::Result<Option<i32>> {
        Ok(None)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.overrides.resolve().context("Failed to load configuration")?;

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("Failed to create {}", cli.output_dir.display()))?;

    let analyzer = FrameAnalyzer::new(config.analyzer)?;
    let mut clip = SyntheticClip::default_sweep(cli.frames);
    let mut output = PngSequence {
        dir: cli.output_dir.clone(),
        index: 0,
        write_masks: config.session.show_mask,
    };

    let summary = run_session(&mut clip, &mut output, &analyzer, &config.session)?;
    info!(
        "Processing complete. {} frames written to {}",
        summary.frames_processed,
        cli.output_dir.display()
    );
    Ok(())
}
