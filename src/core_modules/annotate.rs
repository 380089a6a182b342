// THEORY:
// Annotation is the last stage of the transform chain and the only one that
// produces something meant for a person to look at. It draws onto a copy of the
// input frame, so the caller's frame is never touched:
//
// - each region's contour as a closed polyline,
// - a filled disc at the centroid,
// - a filled disc in a distinct colour at the fingertip, when there is one.
//
// Fingertips are drawn last so they stay visible where they overlap an outline.

use crate::config::{AnalyzerConfig, Color};
use crate::core_modules::contour::Contour;
use crate::core_modules::region::HandRegion;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

/// Returns an annotated copy of `frame`.
pub fn annotate(frame: &RgbImage, regions: &[HandRegion], config: &AnalyzerConfig) -> RgbImage {
    let mut canvas = frame.clone();

    for region in regions {
        draw_contour(&mut canvas, &region.contour, config.contour_color, config.contour_thickness);
        let c = region.centroid;
        draw_filled_circle_mut(&mut canvas, (c.x, c.y), config.marker_radius, Rgb(config.centroid_color));
    }

    for tip in regions.iter().filter_map(|r| r.fingertip) {
        draw_filled_circle_mut(&mut canvas, (tip.x, tip.y), config.marker_radius, Rgb(config.fingertip_color));
    }

    canvas
}

/// Draws a closed polyline through the contour points.
pub fn draw_contour(canvas: &mut RgbImage, contour: &Contour, color: Color, thickness: u32) {
    let n = contour.points.len();
    if n == 0 {
        return;
    }
    let thickness = thickness.max(1) as i32;
    // Centred on the outline; even widths lean one pixel up and left.
    let offsets = -(thickness / 2)..thickness - thickness / 2;

    for i in 0..n {
        let a = contour.points[i];
        let b = contour.points[(i + 1) % n];
        for dy in offsets.clone() {
            for dx in offsets.clone() {
                draw_line_segment_mut(
                    canvas,
                    ((a.x + dx) as f32, (a.y + dy) as f32),
                    ((b.x + dx) as f32, (b.y + dy) as f32),
                    Rgb(color),
                );
            }
        }
    }
}
