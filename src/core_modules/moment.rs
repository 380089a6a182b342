// THEORY:
// The `moment` module computes the spatial moments of the region a contour
// encloses, and from them the region's centroid.
//
// The moments are integrated over the polygon through the contour points using
// Green's theorem, so the cost is linear in the number of contour points rather
// than in the number of enclosed pixels. Contour orientation only flips the sign
// of every moment; the results are normalized so `m00` is never negative.
//
// A contour that encloses nothing (a single point, or a run of collinear points)
// has `m00 == 0`. Its centroid is defined as the origin rather than treated as an
// error, which keeps the per-frame path free of failure branches.

use crate::core_modules::contour::{Contour, ContourPoint};

/// Zeroth and first order spatial moments of a contour's enclosed region.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpatialMoments {
    /// Enclosed area.
    pub m00: f64,
    /// First moment about the y axis (sum of x).
    pub m10: f64,
    /// First moment about the x axis (sum of y).
    pub m01: f64,
}

impl SpatialMoments {
    pub fn from_contour(contour: &Contour) -> Self {
        let points = &contour.points;
        let Some(&last) = points.last() else {
            return Self::default();
        };

        let mut a00 = 0.0;
        let mut a10 = 0.0;
        let mut a01 = 0.0;
        let mut prev = last;
        for &current in points {
            let (xp, yp) = (prev.x as f64, prev.y as f64);
            let (xc, yc) = (current.x as f64, current.y as f64);
            let cross = xp * yc - xc * yp;
            a00 += cross;
            a10 += cross * (xp + xc);
            a01 += cross * (yp + yc);
            prev = current;
        }

        if a00.abs() <= f32::EPSILON as f64 {
            return Self::default();
        }
        let sign = a00.signum();
        Self {
            m00: sign * a00 / 2.0,
            m10: sign * a10 / 6.0,
            m01: sign * a01 / 6.0,
        }
    }

    /// Centroid truncated toward zero, or the origin when the region has no area.
    pub fn centroid(&self) -> ContourPoint {
        if self.m00 == 0.0 {
            return ContourPoint::default();
        }
        ContourPoint::new((self.m10 / self.m00) as i32, (self.m01 / self.m00) as i32)
    }
}
