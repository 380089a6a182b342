// THEORY:
// A `HandRegion` is the per-contour summary the analyzer hands back to callers:
// the outline, how much area it encloses, its moments and centroid, and the
// fingertip candidate if one qualified.
//
// Like every other entity in the engine it is a snapshot of one frame. Regions
// carry no identifier, because nothing matches them across frames; the order of
// regions in a frame's list is simply the order contour extraction found them.

use crate::config::AnalyzerConfig;
use crate::core_modules::contour::{Contour, ContourPoint};
use crate::core_modules::fingertip::find_fingertip_with_config;
use crate::core_modules::moment::SpatialMoments;

/// A single qualifying foreground region in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HandRegion {
    /// The simplified outer boundary of the region.
    pub contour: Contour,
    /// Area enclosed by the contour polygon, in px².
    pub area: f64,
    pub moments: SpatialMoments,
    /// Integer centroid, `(0, 0)` when the moments are degenerate.
    pub centroid: ContourPoint,
    /// Farthest boundary point within the distance cap, if any.
    pub fingertip: Option<ContourPoint>,
}

impl HandRegion {
    /// Summarizes `contour`, or returns `None` if it does not enclose more than
    /// the configured minimum area.
    pub fn from_contour(
        contour: Contour,
        frame_width: u32,
        frame_height: u32,
        config: &AnalyzerConfig,
    ) -> Option<Self> {
        let area = contour.area();
        if area <= config.min_contour_area {
            return None;
        }

        let moments = SpatialMoments::from_contour(&contour);
        let centroid = moments.centroid();
        let fingertip = find_fingertip_with_config(&contour, centroid, frame_width, frame_height, config);

        Some(Self {
            contour,
            area,
            moments,
            centroid,
            fingertip,
        })
    }
}
