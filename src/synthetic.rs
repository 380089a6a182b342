// THEORY:
// `SyntheticClip` is a deterministic stand-in for a camera: a filled disc sliding
// in a straight line across a uniform background. Every frame is rendered from
// its index alone, and the true disc centre is available for each frame, which
// makes the clip the ground truth for end-to-end checks and the input of the
// offline demo.

use crate::error::Result;
use crate::session::FrameSource;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

/// A disc moving linearly from `start` to `end` over `frame_count` frames.
#[derive(Debug, Clone)]
pub struct SyntheticClip {
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    pub radius: i32,
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub disc_color: Rgb<u8>,
    pub background: Rgb<u8>,
    next_index: u32,
}

impl SyntheticClip {
    pub fn new(width: u32, height: u32, frame_count: u32, radius: i32, start: (f64, f64), end: (f64, f64)) -> Self {
        Self {
            width,
            height,
            frame_count,
            radius,
            start,
            end,
            disc_color: Rgb([20, 20, 20]),
            background: Rgb([235, 235, 235]),
            next_index: 0,
        }
    }

    /// A dark disc crossing a bright 320x240 frame left to right.
    pub fn default_sweep(frame_count: u32) -> Self {
        Self::new(320, 240, frame_count, 24, (50.0, 80.0), (270.0, 160.0))
    }

    pub fn with_colors(mut self, disc_color: Rgb<u8>, background: Rgb<u8>) -> Self {
        self.disc_color = disc_color;
        self.background = background;
        self
    }

    /// Ground-truth disc centre in frame `index`, rounded to whole pixels.
    pub fn disc_center(&self, index: u32) -> (i32, i32) {
        let t = if self.frame_count > 1 {
            index as f64 / (self.frame_count - 1) as f64
        } else {
            0.0
        };
        let x = self.start.0 + (self.end.0 - self.start.0) * t;
        let y = self.start.1 + (self.end.1 - self.start.1) * t;
        (x.round() as i32, y.round() as i32)
    }

    /// Renders frame `index` without advancing the clip.
    pub fn render(&self, index: u32) -> RgbImage {
        let mut frame = RgbImage::from_pixel(self.width, self.height, self.background);
        draw_filled_circle_mut(&mut frame, self.disc_center(index), self.radius, self.disc_color);
        frame
    }

    /// Index of the frame the next `next_frame` call returns.
    pub fn position(&self) -> u32 {
        self.next_index
    }
}

impl FrameSource for SyntheticClip {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        if self.next_index >= self.frame_count {
            return Ok(None);
        }
        let frame = self.render(self.next_index);
        self.next_index += 1;
        Ok(Some(frame))
    }
}
