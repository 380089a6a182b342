use fingertip_vision::core_modules::utils::image_helper::save_png;
use fingertip_vision::synthetic::SyntheticClip;
use fingertip_vision::{
    AnalyzerConfig, FrameAnalysis, FrameAnalyzer, FrameDisplay, FrameSource, Result, SessionConfig,
    StopReason, analyze_frame, run_session,
};
use image::Rgb;

const CENTROID_TOLERANCE: i32 = 1;

#[derive(Default)]
struct CollectingDisplay {
    centroids: Vec<Vec<(i32, i32)>>,
}

impl FrameDisplay for CollectingDisplay {
    fn show(&mut self, analysis: &FrameAnalysis) -> Result<()> {
        self.centroids
            .push(analysis.regions.iter().map(|r| (r.centroid.x, r.centroid.y)).collect());
        Ok(())
    }

    fn poll_key(&mut self, _wait_ms: i32) -> Result<Option<i32>> {
        Ok(None)
    }
}

#[test]
fn centroids_follow_the_disc_trajectory() {
    let clip = SyntheticClip::default_sweep(12);
    let truth: Vec<(i32, i32)> = (0..12).map(|i| clip.disc_center(i)).collect();

    let analyzer = FrameAnalyzer::new(AnalyzerConfig::default()).unwrap();
    let mut source = clip.clone();
    let mut display = CollectingDisplay::default();
    let summary = run_session(&mut source, &mut display, &analyzer, &SessionConfig::default()).unwrap();

    assert_eq!(summary.stop_reason, StopReason::EndOfStream);
    assert_eq!(summary.frames_processed, 12);

    for (i, (found, expected)) in display.centroids.iter().zip(&truth).enumerate() {
        assert_eq!(found.len(), 1, "frame {} regions: {:?}", i, found);
        let (x, y) = found[0];
        assert!(
            (x - expected.0).abs() <= CENTROID_TOLERANCE && (y - expected.1).abs() <= CENTROID_TOLERANCE,
            "frame {}: centroid ({}, {}) expected {:?}",
            i,
            x,
            y,
            expected
        );
    }
}

#[test]
fn frames_are_analyzed_independently() {
    let config = AnalyzerConfig::default();
    let mut clip = SyntheticClip::default_sweep(10);

    let mut in_sequence = Vec::new();
    while let Some(frame) = clip.next_frame().unwrap() {
        in_sequence.push(analyze_frame(&frame, &config));
    }

    // Re-analysing frame 7 on its own, after unrelated work, gives the same answer.
    let _unrelated = analyze_frame(&clip.render(2), &config);
    let fresh = analyze_frame(&clip.render(7), &config);

    assert_eq!(fresh.regions, in_sequence[7].regions);
    assert_eq!(fresh.annotated, in_sequence[7].annotated);
}

#[test]
fn fingertip_lies_on_the_disc_boundary() {
    let clip = SyntheticClip::default_sweep(5);
    let config = AnalyzerConfig::default();

    for i in 0..5 {
        let analysis = analyze_frame(&clip.render(i), &config);
        let region = &analysis.regions[0];
        let tip = region.fingertip.expect("disc boundary is inside the cap");
        let distance = tip.distance_to(&region.centroid);
        assert!(
            (distance - clip.radius as f64).abs() <= 2.5,
            "frame {}: fingertip {:?} at distance {}",
            i,
            tip,
            distance
        );
    }
}

#[test]
fn bright_disc_needs_plain_threshold() {
    let clip = SyntheticClip::default_sweep(3).with_colors(Rgb([250, 250, 250]), Rgb([10, 10, 10]));

    // Inverse mode sees the dark background as one frame-sized region.
    let inverse = analyze_frame(&clip.render(1), &AnalyzerConfig::default());
    assert_eq!(inverse.regions.len(), 1);
    assert!(inverse.regions[0].area > 300.0 * 200.0);

    let plain = AnalyzerConfig {
        invert: false,
        ..AnalyzerConfig::default()
    };
    let analysis = analyze_frame(&clip.render(1), &plain);
    assert_eq!(analysis.regions.len(), 1);
    let (cx, cy) = clip.disc_center(1);
    assert!((analysis.regions[0].centroid.x - cx).abs() <= CENTROID_TOLERANCE);
    assert!((analysis.regions[0].centroid.y - cy).abs() <= CENTROID_TOLERANCE);
}

#[test]
fn annotated_frames_can_be_written() {
    let dir = tempfile::tempdir().unwrap();
    let clip = SyntheticClip::default_sweep(2);
    let analysis = analyze_frame(&clip.render(0), &AnalyzerConfig::default());

    let path = dir.path().join("annotated.png");
    save_png(&path, &analysis.annotated).unwrap();
    assert!(path.exists());
}
