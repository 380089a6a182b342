// THEORY:
// This file is the main entry point for the `fingertip_vision` library crate.
//
// The engine takes one colour frame at a time and finds bright-or-dark blobs in
// it, then estimates where each blob's centroid and "outstretched fingertip" are.
// `pipeline::analyze_frame` is the single operation that matters; the modules
// under `core_modules` are its stages, each usable and testable on its own.
//
// `session` wraps the engine in a capture/display loop over two traits, so the
// OpenCV front-end (`live_tracker`) and the offline demo share the same loop.

pub mod cli;
pub mod config;
pub mod core_modules;
pub mod error;
pub mod pipeline;
pub mod session;
pub mod synthetic;

pub use config::{AnalyzerConfig, CameraConfig, SessionConfig, TrackerConfig};
pub use core_modules::region::HandRegion;
pub use error::{Result, VisionError};
pub use pipeline::{FrameAnalysis, FrameAnalyzer, analyze_frame};
pub use session::{FrameDisplay, FrameSource, SessionSummary, StopReason, run_session};
