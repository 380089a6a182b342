use fingertip_vision::{CameraConfig, FrameAnalysis, FrameDisplay, FrameSource, VisionError};
use image::{GrayImage, RgbImage};
use opencv::{
    core::{self, Mat, Scalar},
    highgui, imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};
use tracing::{info, warn};

pub const OUTPUT_WINDOW: &str = "Output";
pub const MASK_WINDOW: &str = "Binary";

fn capture_error(e: opencv::Error) -> VisionError {
    VisionError::Capture(e.to_string())
}

fn display_error(e: opencv::Error) -> VisionError {
    VisionError::Display(e.to_string())
}

/// An open capture device. The device is released when the camera is dropped.
pub struct Camera {
    capture: VideoCapture,
    device: i32,
}

impl Camera {
    /// Opens the device and requests the configured size and frame rate.
    pub fn open(config: &CameraConfig) -> fingertip_vision::Result<Self> {
        let mut capture = VideoCapture::new(config.device, videoio::CAP_ANY).map_err(capture_error)?;
        if !capture.is_opened().map_err(capture_error)? {
            return Err(VisionError::Capture(format!(
                "Failed to open camera with device index {}",
                config.device
            )));
        }

        // The driver may ignore any of these; the negotiated values are logged below.
        capture.set(videoio::CAP_PROP_FPS, config.fps as f64).map_err(capture_error)?;
        capture.set(videoio::CAP_PROP_FRAME_WIDTH, config.width as f64).map_err(capture_error)?;
        capture.set(videoio::CAP_PROP_FRAME_HEIGHT, config.height as f64).map_err(capture_error)?;

        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH).map_err(capture_error)?;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT).map_err(capture_error)?;
        let fps = capture.get(videoio::CAP_PROP_FPS).map_err(capture_error)?;
        info!("Loaded camera {} ({}x{}@{})", config.device, width, height, fps);

        Ok(Self {
            capture,
            device: config.device,
        })
    }
}

impl FrameSource for Camera {
    fn next_frame(&mut self) -> fingertip_vision::Result<Option<RgbImage>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame).map_err(capture_error)? || frame.empty() {
            return Ok(None);
        }
        mat_to_rgb(&frame).map(Some)
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        if let Err(e) = self.capture.release() {
            warn!("Failed to release camera {}: {}", self.device, e);
        } else {
            info!("Released camera {}", self.device);
        }
    }
}

/// On-screen windows for the annotated frame and, optionally, the mask.
pub struct Windows {
    show_mask: bool,
}

impl Windows {
    pub fn open(show_mask: bool) -> fingertip_vision::Result<Self> {
        highgui::named_window(OUTPUT_WINDOW, highgui::WINDOW_AUTOSIZE).map_err(display_error)?;
        if show_mask {
            highgui::named_window(MASK_WINDOW, highgui::WINDOW_AUTOSIZE).map_err(display_error)?;
        }
        Ok(Self { show_mask })
    }
}

impl FrameDisplay for Windows {
    fn show(&mut self, analysis: &FrameAnalysis) -> fingertip_vision::Result<()> {
        let annotated = rgb_to_mat(&analysis.annotated).map_err(display_error)?;
        highgui::imshow(OUTPUT_WINDOW, &annotated).map_err(display_error)?;
        if self.show_mask {
            let mask = gray_to_mat(&analysis.mask).map_err(display_error)?;
            highgui::imshow(MASK_WINDOW, &mask).map_err(display_error)?;
        }
        Ok(())
    }

    fn poll_key(&mut self, wait_ms: i32) -> fingertip_vision::Result<Option<i32>> {
        let key = highgui::wait_key(wait_ms).map_err(display_error)?;
        Ok((key >= 0).then_some(key))
    }
}

impl Drop for Windows {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_all_windows() {
            warn!("Failed to close windows: {}", e);
        }
    }
}

/// Converts a BGR capture into an `RgbImage`.
fn mat_to_rgb(frame: &Mat) -> fingertip_vision::Result<RgbImage> {
    let mut rgb = Mat::default();
    imgproc::cvt_color(frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0).map_err(capture_error)?;

    let width = rgb.cols() as u32;
    let height = rgb.rows() as u32;
    let data = rgb.data_bytes().map_err(capture_error)?.to_vec();
    RgbImage::from_vec(width, height, data)
        .ok_or_else(|| VisionError::Capture(format!("Malformed {}x{} frame", width, height)))
}

/// Converts an annotated `RgbImage` into a BGR `Mat` for display.
fn rgb_to_mat(image: &RgbImage) -> opencv::Result<Mat> {
    let size = core::Size::new(image.width() as i32, image.height() as i32);
    let mut rgb = Mat::new_size_with_default(size, core::CV_8UC3, Scalar::all(0.0))?;
    rgb.data_bytes_mut()?.copy_from_slice(image.as_raw());

    let mut bgr = Mat::default();
    imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
    Ok(bgr)
}

fn gray_to_mat(image: &GrayImage) -> opencv::Result<Mat> {
    let size = core::Size::new(image.width() as i32, image.height() as i32);
    let mut gray = Mat::new_size_with_default(size, core::CV_8UC1, Scalar::all(0.0))?;
    gray.data_bytes_mut()?.copy_from_slice(image.as_raw());
    Ok(gray)
}
