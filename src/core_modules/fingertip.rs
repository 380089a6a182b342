// THEORY:
// An outstretched finger is, to a first approximation, the part of the hand
// outline farthest from the hand's centroid. The `fingertip` module scans the
// contour once and keeps the farthest point subject to two filters:
//
// 1.  **Distance cap**: points at or beyond `max_fingertip_distance` are treated
//     as artifacts (a stray arm edge, a merged background region) and skipped.
// 2.  **Edge filter**: a point must lie strictly inside the frame by more than
//     `edge_margin` pixels on every side.
//
// With `edge_margin == 0` the edge filter only rejects column 0 and row 0: a
// contour point can never reach `x == width` or `y == height`, so the far edges
// pass. A hand entering from any side is truncated by the frame border, and a
// point on that cut can still come out farthest. Raising `edge_margin` pushes
// the rejection band inward on all four sides.
//
// Ties keep the earlier point in contour order, and a point exactly on the
// centroid is never chosen.

use crate::config::AnalyzerConfig;
use crate::core_modules::contour::{Contour, ContourPoint};

/// Bounds used by the edge filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBounds {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl FrameBounds {
    pub fn new(width: u32, height: u32, margin: u32) -> Self {
        Self { width, height, margin }
    }

    /// True if the point lies strictly inside the frame, more than `margin` from every edge.
    pub fn contains(&self, point: &ContourPoint) -> bool {
        let (x, y) = (point.x as i64, point.y as i64);
        let margin = self.margin as i64;
        x > margin && x < self.width as i64 - margin && y > margin && y < self.height as i64 - margin
    }
}

/// The farthest qualifying contour point from `centroid`, if any.
pub fn find_fingertip(
    contour: &Contour,
    centroid: ContourPoint,
    bounds: &FrameBounds,
    max_distance: f64,
) -> Option<ContourPoint> {
    let mut best_distance = 0.0;
    let mut best_point = None;

    for point in &contour.points {
        let distance = point.distance_to(&centroid);
        if distance > best_distance && distance < max_distance && bounds.contains(point) {
            best_distance = distance;
            best_point = Some(*point);
        }
    }

    best_point
}

/// `find_fingertip` with the cap and margin taken from the analyzer config.
pub fn find_fingertip_with_config(
    contour: &Contour,
    centroid: ContourPoint,
    width: u32,
    height: u32,
    config: &AnalyzerConfig,
) -> Option<ContourPoint> {
    let bounds = FrameBounds::new(width, height, config.edge_margin);
    find_fingertip(contour, centroid, &bounds, config.max_fingertip_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contour(points: &[(i32, i32)]) -> Contour {
        Contour::new(points.iter().map(|&(x, y)| ContourPoint::new(x, y)).collect())
    }

    fn brute_force(
        contour: &Contour,
        centroid: ContourPoint,
        bounds: &FrameBounds,
        cap: f64,
    ) -> Option<f64> {
        contour
            .points
            .iter()
            .filter(|p| bounds.contains(p))
            .map(|p| p.distance_to(&centroid))
            .filter(|&d| d > 0.0 && d < cap)
            .fold(None, |best: Option<f64>, d| Some(best.map_or(d, |b| b.max(d))))
    }

    #[test]
    fn picks_the_farthest_point() {
        let hand = contour(&[(50, 50), (60, 45), (90, 52), (62, 58), (48, 60)]);
        let centroid = ContourPoint::new(55, 52);
        let bounds = FrameBounds::new(200, 200, 0);

        let tip = find_fingertip(&hand, centroid, &bounds, 200.0);
        assert_eq!(tip, Some(ContourPoint::new(90, 52)));
    }

    #[test]
    fn matches_brute_force_search() {
        let star = contour(&[
            (100, 40),
            (110, 90),
            (160, 100),
            (112, 110),
            (120, 170),
            (100, 118),
            (45, 150),
            (88, 105),
            (30, 80),
            (92, 92),
        ]);
        let centroid = ContourPoint::new(100, 100);
        let bounds = FrameBounds::new(320, 240, 0);

        let tip = find_fingertip(&star, centroid, &bounds, 200.0).expect("a fingertip");
        let expected = brute_force(&star, centroid, &bounds, 200.0).expect("a maximum");
        assert_eq!(tip.distance_to(&centroid), expected);
    }

    #[test]
    fn points_beyond_the_cap_are_skipped() {
        let arm = contour(&[(100, 100), (100, 260), (100, 180), (130, 100)]);
        let centroid = ContourPoint::new(100, 40);
        let bounds = FrameBounds::new(400, 400, 0);

        // (100, 260) is 220 away; the next farthest is (100, 180) at 140.
        let tip = find_fingertip(&arm, centroid, &bounds, 200.0);
        assert_eq!(tip, Some(ContourPoint::new(100, 180)));
    }

    #[test]
    fn row_and_column_zero_are_excluded() {
        let touching = contour(&[(0, 30), (20, 0), (10, 12)]);
        let centroid = ContourPoint::new(12, 14);
        let bounds = FrameBounds::new(64, 48, 0);

        assert_eq!(find_fingertip(&touching, centroid, &bounds, 200.0), Some(ContourPoint::new(10, 12)));
    }

    #[test]
    fn far_edges_pass_without_a_margin() {
        let truncated = contour(&[(63, 20), (40, 20)]);
        let centroid = ContourPoint::new(30, 20);
        let without_margin = FrameBounds::new(64, 48, 0);
        let with_margin = FrameBounds::new(64, 48, 4);

        assert_eq!(
            find_fingertip(&truncated, centroid, &without_margin, 200.0),
            Some(ContourPoint::new(63, 20))
        );
        assert_eq!(
            find_fingertip(&truncated, centroid, &with_margin, 200.0),
            Some(ContourPoint::new(40, 20))
        );
    }

    #[test]
    fn no_qualifying_point_yields_none() {
        let at_centroid = contour(&[(10, 10)]);
        let bounds = FrameBounds::new(64, 48, 0);
        assert_eq!(find_fingertip(&at_centroid, ContourPoint::new(10, 10), &bounds, 200.0), None);

        let too_far = contour(&[(10, 10), (50, 40)]);
        assert_eq!(find_fingertip(&too_far, ContourPoint::new(300, 300), &bounds, 200.0), None);
    }

    #[test]
    fn ties_keep_the_first_point() {
        let symmetric = contour(&[(20, 10), (10, 20), (1, 10), (10, 1)]);
        let centroid = ContourPoint::new(10, 10);
        let bounds = FrameBounds::new(64, 48, 0);
        assert_eq!(find_fingertip(&symmetric, centroid, &bounds, 200.0), Some(ContourPoint::new(20, 10)));
    }

    #[test]
    fn config_supplies_cap_and_margin() {
        let line = contour(&[(10, 10), (30, 10), (58, 10)]);
        let config = AnalyzerConfig {
            edge_margin: 8,
            max_fingertip_distance: 25.0,
            ..AnalyzerConfig::default()
        };
        let tip = find_fingertip_with_config(&line, ContourPoint::new(12, 10), 64, 48, &config);
        assert_eq!(tip, Some(ContourPoint::new(30, 10)));
    }
}
