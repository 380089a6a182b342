//! Command-line overrides shared by the tracker binaries.

use crate::config::TrackerConfig;
use clap::Args;
use std::path::PathBuf;

/// Flags that override individual values of the loaded configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Intensity above which a pixel is background
    #[arg(long)]
    pub lower_threshold: Option<u8>,

    /// Value written to foreground pixels of the mask
    #[arg(long)]
    pub upper_threshold: Option<u8>,

    /// Treat bright pixels as foreground instead of dark ones
    #[arg(long)]
    pub no_invert: bool,

    /// Minimum enclosed contour area in px²
    #[arg(long)]
    pub min_area: Option<f64>,

    /// Maximum centroid-to-fingertip distance in px
    #[arg(long)]
    pub max_distance: Option<f64>,

    /// Gaussian kernel size (odd)
    #[arg(long)]
    pub blur_size: Option<u32>,

    /// Reject fingertips within this many pixels of the frame edge
    #[arg(long)]
    pub edge_margin: Option<u32>,

    /// Also show the binary mask
    #[arg(long)]
    pub show_mask: bool,
}

impl ConfigOverrides {
    /// Loads the configured file (or defaults), then applies every flag that was given.
    pub fn resolve(&self) -> crate::error::Result<TrackerConfig> {
        let mut config = TrackerConfig::load_or_default(self.config.as_deref())?;
        self.apply(&mut config);
        config.analyzer.validate()?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut TrackerConfig) {
        let analyzer = &mut config.analyzer;
        if let Some(v) = self.lower_threshold {
            analyzer.lower_threshold = v;
        }
        if let Some(v) = self.upper_threshold {
            analyzer.upper_threshold = v;
        }
        if self.no_invert {
            analyzer.invert = false;
        }
        if let Some(v) = self.min_area {
            analyzer.min_contour_area = v;
        }
        if let Some(v) = self.max_distance {
            analyzer.max_fingertip_distance = v;
        }
        if let Some(v) = self.blur_size {
            analyzer.blur_kernel_size = v;
        }
        if let Some(v) = self.edge_margin {
            analyzer.edge_margin = v;
        }
        if self.show_mask {
            config.session.show_mask = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let overrides = ConfigOverrides {
            lower_threshold: Some(90),
            no_invert: true,
            edge_margin: Some(12),
            show_mask: true,
            ..Default::default()
        };

        let config = overrides.resolve().expect("valid");
        assert_eq!(config.analyzer.lower_threshold, 90);
        assert!(!config.analyzer.invert);
        assert_eq!(config.analyzer.edge_margin, 12);
        assert!(config.session.show_mask);
        assert_eq!(config.analyzer.min_contour_area, 40.0);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let overrides = ConfigOverrides {
            blur_size: Some(8),
            ..Default::default()
        };
        assert!(overrides.resolve().is_err());
    }
}
