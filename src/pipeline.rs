// THEORY:
// The `pipeline` module is the top-level API of the engine. It strings the
// per-frame stages together into one call:
//
//   frame -> intensity -> blur -> binary mask -> external contours
//         -> area filter -> moments / centroid / fingertip -> annotated copy
//
// The whole chain is a pure function of the frame and an `AnalyzerConfig`.
// Nothing survives from one call to the next, so frame N+1 is analysed exactly
// as it would be if it were the first frame ever seen.

use crate::config::AnalyzerConfig;
use crate::core_modules::annotate::annotate;
use crate::core_modules::contour::find_external_contours;
use crate::core_modules::intensity::binary_mask;
use crate::core_modules::region::HandRegion;
use crate::error::Result;
use image::{GrayImage, RgbImage};

// Re-export key data structures for the public API.
pub use crate::core_modules::contour::{Contour, ContourPoint};
pub use crate::core_modules::moment::SpatialMoments;

/// The output of the analyzer for a single frame.
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    /// A copy of the input frame with outlines and markers drawn on it.
    pub annotated: RgbImage,
    /// The thresholded mask the contours were extracted from.
    pub mask: GrayImage,
    /// Every region that passed the area filter, in extraction order.
    pub regions: Vec<HandRegion>,
}

impl FrameAnalysis {
    /// `(centroid, fingertip)` for every region.
    pub fn detections(&self) -> Vec<(ContourPoint, Option<ContourPoint>)> {
        self.regions.iter().map(|r| (r.centroid, r.fingertip)).collect()
    }
}

/// Runs the full transform chain on one frame.
pub fn analyze_frame(frame: &RgbImage, config: &AnalyzerConfig) -> FrameAnalysis {
    let (width, height) = frame.dimensions();
    let mask = binary_mask(frame, config);

    let regions: Vec<HandRegion> = find_external_contours(&mask)
        .into_iter()
        .filter_map(|contour| HandRegion::from_contour(contour, width, height, config))
        .collect();

    FrameAnalysis {
        annotated: annotate(frame, &regions, config),
        mask,
        regions,
    }
}

/// A validated configuration bound to the analysis function.
#[derive(Debug, Clone)]
pub struct FrameAnalyzer {
    config: AnalyzerConfig,
}

impl FrameAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn analyze(&self, frame: &RgbImage) -> FrameAnalysis {
        analyze_frame(frame, &self.config)
    }
}
