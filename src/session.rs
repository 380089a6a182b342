// THEORY:
// The `session` module is the capture/display loop, written against two small
// traits so the engine never depends on a particular camera or window toolkit:
//
// - `FrameSource` yields frames until it is exhausted (`Ok(None)`). An `Err` is a
//   single unreadable frame: it is logged and skipped, and the loop moves on.
//   Only a run of `max_consecutive_failures` such errors ends the session.
// - `FrameDisplay` shows an analysis and reports key presses.
//
// Each iteration runs capture -> analyze -> show -> poll strictly in order on the
// calling thread. The source and display are borrowed, not owned: whoever opened
// the device also releases it, whichever way the loop ends.

use crate::config::SessionConfig;
use crate::error::Result;
use crate::pipeline::{FrameAnalysis, FrameAnalyzer};
use image::RgbImage;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Anything that produces frames one at a time.
pub trait FrameSource {
    /// The next frame, `Ok(None)` at end of stream, `Err` for an unreadable frame.
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;
}

/// Anything that can present an analysis and report key presses.
pub trait FrameDisplay {
    fn show(&mut self, analysis: &FrameAnalysis) -> Result<()>;

    /// Waits up to `wait_ms` for a key press and returns its code.
    fn poll_key(&mut self, wait_ms: i32) -> Result<Option<i32>>;
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    ExitKey,
    TooManyFailures,
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub stop_reason: StopReason,
}

/// Runs the capture/display loop until the source is exhausted or the exit key is pressed.
pub fn run_session<S, D>(
    source: &mut S,
    display: &mut D,
    analyzer: &FrameAnalyzer,
    config: &SessionConfig,
) -> Result<SessionSummary>
where
    S: FrameSource + ?Sized,
    D: FrameDisplay + ?Sized,
{
    let mut frames_processed = 0u64;
    let mut frames_skipped = 0u64;
    let mut consecutive_failures = 0u32;

    let stop_reason = loop {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => {
                consecutive_failures = 0;
                frame
            }
            Ok(None) => break StopReason::EndOfStream,
            Err(e) => {
                frames_skipped += 1;
                consecutive_failures += 1;
                warn!("Skipping unreadable frame: {}", e);
                if consecutive_failures >= config.max_consecutive_failures {
                    break StopReason::TooManyFailures;
                }
                continue;
            }
        };

        let started = Instant::now();
        let analysis = analyzer.analyze(&frame);
        debug!(
            regions = analysis.regions.len(),
            fingertips = analysis.regions.iter().filter(|r| r.fingertip.is_some()).count(),
            latency_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Analyzed frame {}",
            frames_processed
        );

        display.show(&analysis)?;
        frames_processed += 1;

        if display.poll_key(config.poll_wait_ms)? == Some(config.exit_key) {
            break StopReason::ExitKey;
        }
    };

    info!(
        frames_processed,
        frames_skipped,
        "Session ended: {:?}",
        stop_reason
    );

    Ok(SessionSummary {
        frames_processed,
        frames_skipped,
        stop_reason,
    })
}
