// THEORY:
// The `contour` module turns a binary mask into a list of region outlines.
//
// Border following is delegated to `imageproc::contours::find_contours`, which
// returns every border in the mask: outer borders, hole borders, and the borders
// of regions sitting inside holes. Only top-level outer borders are kept; a hand
// with a gap between two fingers is one region, and whatever is inside that gap
// is ignored.
//
// The raw border lists every boundary pixel. Points strictly inside a straight
// run (horizontal, vertical or diagonal) carry no shape information, so the
// chain is compressed to the run endpoints. This changes neither the enclosed
// area nor the moments, and it keeps the per-point fingertip scan short.

use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};

/// A single integer point on a contour, in pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ContourPoint {
    pub x: i32,
    pub y: i32,
}

impl ContourPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &ContourPoint) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An ordered, implicitly closed boundary of one foreground region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<ContourPoint>,
}

impl Contour {
    pub fn new(points: Vec<ContourPoint>) -> Self {
        Self { points }
    }

    /// Area enclosed by the polygon through the contour points (shoelace formula).
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0i64;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            twice_area += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
        }
        twice_area.abs() as f64 / 2.0
    }
}

/// Finds the outer boundary of every top-level foreground region in `mask`.
/// Any non-zero pixel counts as foreground.
pub fn find_external_contours(mask: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            let points = c.points.iter().map(|p| ContourPoint::new(p.x, p.y)).collect();
            Contour::new(simplify_chain(points))
        })
        .collect()
}

/// Drops every point whose incoming and outgoing steps point the same way.
pub fn simplify_chain(mut points: Vec<ContourPoint>) -> Vec<ContourPoint> {
    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    let n = points.len();
    if n < 3 {
        return points;
    }

    let step = |from: ContourPoint, to: ContourPoint| ((to.x - from.x).signum(), (to.y - from.y).signum());
    let kept: Vec<ContourPoint> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let current = points[i];
            let next = points[(i + 1) % n];
            step(prev, current) != step(current, next)
        })
        .map(|i| points[i])
        .collect();

    if kept.is_empty() { points } else { kept }
}
