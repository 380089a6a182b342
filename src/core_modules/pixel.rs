// THEORY (single-pixel heuristics):
// The `Pixel` module is the most fundamental unit of the vision system. It is a
// "dumb" data container for one colour sample plus the single-pixel metric the
// tracker needs: luminance. Anything that reads neighbours (blurring, contour
// following) belongs in higher-level modules.
//
// Luminance uses the Rec. 601 weights (0.299, 0.587, 0.114) applied directly to
// the gamma-encoded 0..255 channels. This is the same mapping camera pipelines
// use for their grey output, so threshold constants tuned against a camera's
// grey view carry over unchanged.
//
// The stored byte comes from the 14-bit fixed-point form of those weights
// (4899, 9617, 1868) with round-half-up, which is what 8-bit BGR->grey
// conversions compute. Float rounding disagrees with it by one on inputs whose
// luma sits just above a half, and at the threshold that one step decides
// foreground versus background.

pub type Channel = u8;
pub type Luminance = f64;

const RED_WEIGHT: f64 = 0.299;
const GREEN_WEIGHT: f64 = 0.587;
const BLUE_WEIGHT: f64 = 0.114;

const FIXED_SHIFT: u32 = 14;
const FIXED_RED: u32 = 4899;
const FIXED_GREEN: u32 = 9617;
const FIXED_BLUE: u32 = 1868;

/// A "dumb" data container representing a single RGB pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pixel {
    /// The red channel value (0-255).
    pub red: Channel,
    /// The green channel value (0-255).
    pub green: Channel,
    /// The blue channel value (0-255).
    pub blue: Channel,
}

impl Pixel {
    pub fn new(red: Channel, green: Channel, blue: Channel) -> Self {
        Self { red, green, blue }
    }

    /// Rec. 601 luma on the 0..255 scale.
    pub fn luminance(&self) -> Luminance {
        RED_WEIGHT * self.red as f64 + GREEN_WEIGHT * self.green as f64 + BLUE_WEIGHT * self.blue as f64
    }

    /// Luminance as stored in an intensity map, in 14-bit fixed point.
    pub fn intensity(&self) -> Channel {
        let weighted = FIXED_RED * self.red as u32
            + FIXED_GREEN * self.green as u32
            + FIXED_BLUE * self.blue as u32;
        ((weighted + (1 << (FIXED_SHIFT - 1))) >> FIXED_SHIFT) as Channel
    }
}

impl From<image::Rgb<u8>> for Pixel {
    fn from(rgb: image::Rgb<u8>) -> Self {
        let [red, green, blue] = rgb.0;
        Self { red, green, blue }
    }
}
