// THEORY:
// Every tunable constant of the tracker lives in one of three immutable structs.
// `AnalyzerConfig` drives the per-frame transform chain, `CameraConfig` describes
// the capture device, and `SessionConfig` governs the capture/display loop.
// Nothing in the engine reads a global; a config value is passed into each call,
// so tests can run the same frame through several parameter sets side by side.
//
// All three deserialize from TOML with per-field defaults, so a config file only
// needs to name the values it changes. `TrackerConfig` groups them into the
// `[analyzer]`, `[camera]` and `[session]` tables.

use crate::error::{Result, VisionError};
use serde::Deserialize;
use std::path::Path;

/// An RGB colour used for annotation.
pub type Color = [u8; 3];

/// Parameters for the per-frame analysis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Intensities above this value are background (binary inverse mode).
    pub lower_threshold: u8,
    /// The value written to foreground pixels of the binary mask.
    pub upper_threshold: u8,
    /// `true` selects binary inverse thresholding: dark pixels become foreground.
    pub invert: bool,
    /// Contours enclosing this area or less (px²) are treated as speckle noise.
    pub min_contour_area: f64,
    /// Contour points at or beyond this distance from the centroid are never fingertips.
    pub max_fingertip_distance: f64,
    /// Side length of the square Gaussian kernel. Must be odd; 1 disables blurring.
    pub blur_kernel_size: u32,
    /// Gaussian spread. Values `<= 0` select a binomial table (sizes 3 to 7) or derive it from the size.
    pub blur_sigma: f64,
    /// Fingertips must lie strictly more than this many pixels inside the frame.
    /// Zero keeps the plain `x > 0 && x < width` rule, which only rejects row/column 0.
    pub edge_margin: u32,
    /// Stroke width of the drawn contour outline.
    pub contour_thickness: u32,
    /// Radius of the centroid and fingertip markers.
    pub marker_radius: i32,
    pub contour_color: Color,
    pub centroid_color: Color,
    pub fingertip_color: Color,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            lower_threshold: 170,
            upper_threshold: 255,
            invert: true,
            min_contour_area: 40.0,
            max_fingertip_distance: 200.0,
            blur_kernel_size: 5,
            blur_sigma: 0.0,
            edge_margin: 0,
            contour_thickness: 2,
            marker_radius: 3,
            contour_color: [0, 255, 0],
            centroid_color: [0, 255, 0],
            fingertip_color: [255, 0, 0],
        }
    }
}

impl AnalyzerConfig {
    /// Rejects parameter combinations the transform chain cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(VisionError::InvalidConfig(format!(
                "blur kernel size must be odd and positive, got {}",
                self.blur_kernel_size
            )));
        }
        if self.upper_threshold == 0 {
            return Err(VisionError::InvalidConfig(
                "upper threshold must be non-zero or the mask has no foreground".into(),
            ));
        }
        if self.min_contour_area.is_nan() {
            return Err(VisionError::InvalidConfig("minimum contour area is NaN".into()));
        }
        if self.max_fingertip_distance.is_nan() || self.max_fingertip_distance < 0.0 {
            return Err(VisionError::InvalidConfig(format!(
                "maximum fingertip distance must be non-negative, got {}",
                self.max_fingertip_distance
            )));
        }
        if self.blur_sigma.is_nan() {
            return Err(VisionError::InvalidConfig("blur sigma is NaN".into()));
        }
        Ok(())
    }

    /// The Gaussian spread for kernels not covered by a binomial table.
    pub fn effective_sigma(&self) -> f64 {
        if self.blur_sigma > 0.0 {
            self.blur_sigma
        } else {
            0.3 * ((self.blur_kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8
        }
    }
}

/// Properties requested from the capture device.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub device: i32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 1,
            width: 640,
            height: 480,
            fps: 30,
        }
    }
}

/// Controls for the capture/display loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Key code that ends the session (ESC).
    pub exit_key: i32,
    /// How long each iteration waits for a key press.
    pub poll_wait_ms: i32,
    /// Consecutive unreadable frames tolerated before the source counts as exhausted.
    pub max_consecutive_failures: u32,
    /// Also display the binary mask.
    pub show_mask: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exit_key: 27,
            poll_wait_ms: 1,
            max_consecutive_failures: 30,
            show_mask: false,
        }
    }
}

/// The full configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub analyzer: AnalyzerConfig,
    pub camera: CameraConfig,
    pub session: SessionConfig,
}

impl TrackerConfig {
    /// Loads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| VisionError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|err| match err {
            VisionError::ConfigParse { source, .. } => VisionError::ConfigParse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: TrackerConfig =
            toml::from_str(content).map_err(|source| VisionError::ConfigParse {
                path: Default::default(),
                source,
            })?;
        config.analyzer.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_tracker_constants() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.lower_threshold, 170);
        assert_eq!(config.upper_threshold, 255);
        assert_eq!(config.min_contour_area, 40.0);
        assert_eq!(config.max_fingertip_distance, 200.0);
        assert_eq!(config.blur_kernel_size, 5);
        assert_eq!(CameraConfig::default().device, 1);
        assert_eq!(SessionConfig::default().exit_key, 27);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn auto_sigma_for_five_tap_kernel() {
        let config = AnalyzerConfig::default();
        assert!((config.effective_sigma() - 1.1).abs() < 1e-9);

        let explicit = AnalyzerConfig {
            blur_sigma: 2.5,
            ..AnalyzerConfig::default()
        };
        assert_eq!(explicit.effective_sigma(), 2.5);
    }

    #[test]
    fn even_kernel_is_rejected() {
        let config = AnalyzerConfig {
            blur_kernel_size: 4,
            ..AnalyzerConfig::default()
        };
        assert!(matches!(config.validate(), Err(VisionError::InvalidConfig(_))));
    }

    #[test]
    fn negative_distance_is_rejected() {
        let config = AnalyzerConfig {
            max_fingertip_distance: -1.0,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = TrackerConfig::from_toml(
            r#"
            [analyzer]
            lower_threshold = 100
            edge_margin = 8

            [camera]
            device = 0
            "#,
        )
        .expect("valid config");

        assert_eq!(config.analyzer.lower_threshold, 100);
        assert_eq!(config.analyzer.edge_margin, 8);
        assert_eq!(config.analyzer.upper_threshold, 255);
        assert_eq!(config.camera.device, 0);
        assert_eq!(config.camera.width, 640);
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn invalid_values_in_file_fail_validation() {
        let err = TrackerConfig::from_toml("[analyzer]\nblur_kernel_size = 6\n").unwrap_err();
        assert!(matches!(err, VisionError::InvalidConfig(_)));
    }

    #[test]
    fn load_reports_the_path_on_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[analyzer\nlower_threshold = ").expect("write");

        match TrackerConfig::load(file.path()) {
            Err(VisionError::ConfigParse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = TrackerConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, VisionError::ConfigRead { .. }));
        assert_eq!(TrackerConfig::load_or_default(None).unwrap(), TrackerConfig::default());
    }
}
