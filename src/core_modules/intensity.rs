// THEORY:
// The `intensity` module holds the first three stages of the transform chain, each
// a function from one image to the next:
//
// 1.  **Grayscale**: colour frame -> intensity map, one `Pixel::intensity` per sample.
// 2.  **Blur**: a fixed-size separable Gaussian kernel suppresses sensor noise so the
//     threshold does not fragment edges into speckles. Without an explicit sigma the
//     small kernels are the binomial tables camera pipelines use, and the border is
//     reflected without repeating the edge pixel (`dcb|abcd|cba`).
// 3.  **Threshold**: intensity map -> binary mask. In inverse mode anything brighter
//     than the lower threshold is background, so a dark subject in front of a bright
//     scene becomes foreground.
//
// All three are stateless and allocate a fresh output image.

use crate::config::AnalyzerConfig;
use crate::core_modules::pixel::Pixel;
use image::{GrayImage, Luma, RgbImage, imageops};

const BINOMIAL_3: [f32; 3] = [0.25, 0.5, 0.25];
const BINOMIAL_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];
const BINOMIAL_7: [f32; 7] = [0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125];

/// Converts a colour frame to a single-channel intensity map.
pub fn to_intensity(frame: &RgbImage) -> GrayImage {
    imageproc::map::map_colors(frame, |rgb| Luma([Pixel::from(rgb).intensity()]))
}

/// Builds a normalized 1D Gaussian kernel with `size` taps.
pub fn gaussian_kernel(size: u32, sigma: f64) -> Vec<f32> {
    let radius = (size / 2) as i64;
    let denominator = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-((x * x) as f64) / denominator).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.iter().map(|w| (w / total) as f32).collect()
}

/// The kernel `blur` applies: a binomial table for sizes up to 7 when sigma is
/// derived, otherwise a sampled Gaussian.
pub fn blur_kernel(config: &AnalyzerConfig) -> Vec<f32> {
    if config.blur_sigma <= 0.0 {
        let table: Option<&[f32]> = match config.blur_kernel_size {
            3 => Some(&BINOMIAL_3[..]),
            5 => Some(&BINOMIAL_5[..]),
            7 => Some(&BINOMIAL_7[..]),
            _ => None,
        };
        if let Some(table) = table {
            return table.to_vec();
        }
    }
    gaussian_kernel(config.blur_kernel_size, config.effective_sigma())
}

/// Mirrors an out-of-range coordinate back into `0..len` without repeating the edge.
fn reflect_101(mut i: i64, len: i64) -> u32 {
    if len == 1 {
        return 0;
    }
    loop {
        if i < 0 {
            i = -i;
        } else if i >= len {
            i = 2 * (len - 1) - i;
        } else {
            return i as u32;
        }
    }
}

/// Smooths the intensity map with the configured Gaussian kernel.
pub fn blur(intensity: &GrayImage, config: &AnalyzerConfig) -> GrayImage {
    if config.blur_kernel_size <= 1 {
        return intensity.clone();
    }
    let kernel = blur_kernel(config);
    let radius = config.blur_kernel_size / 2;
    let (width, height) = intensity.dimensions();

    // Pad so the filter never reaches its own clamped border.
    let padded = GrayImage::from_fn(width + 2 * radius, height + 2 * radius, |x, y| {
        let sx = reflect_101(x as i64 - radius as i64, width as i64);
        let sy = reflect_101(y as i64 - radius as i64, height as i64);
        *intensity.get_pixel(sx, sy)
    });
    let filtered = imageproc::filter::separable_filter_equal(&padded, &kernel);
    imageops::crop_imm(&filtered, radius, radius, width, height).to_image()
}

/// Binarizes the intensity map. Foreground pixels carry `upper_threshold`, background is 0.
pub fn threshold(intensity: &GrayImage, config: &AnalyzerConfig) -> GrayImage {
    let lower = config.lower_threshold;
    let (above, at_or_below) = if config.invert {
        (0, config.upper_threshold)
    } else {
        (config.upper_threshold, 0)
    };
    imageproc::map::map_colors(intensity, |p| {
        if p[0] > lower {
            Luma([above])
        } else {
            Luma([at_or_below])
        }
    })
}

/// Grayscale, blur and threshold in sequence.
pub fn binary_mask(frame: &RgbImage, config: &AnalyzerConfig) -> GrayImage {
    let intensity = to_intensity(frame);
    let smoothed = blur(&intensity, config);
    threshold(&smoothed, config)
}
