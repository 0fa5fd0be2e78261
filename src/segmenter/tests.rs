use std::path::Path;

use super::{raw_segments, segments_from_detection, SegmentTracker, SilenceEvent};
use crate::error::SplitError;

const SOURCE: &str = "drums.wav";

fn detection_output(pairs: &[(f64, f64)], total: &str) -> String {
    let mut output = String::from(
        "Input #0, wav, from 'drums.wav':\n  Duration: 00:00:10.00, bitrate: 1411 kb/s\n",
    );
    for (start, end) in pairs {
        output.push_str(&format!(
            "[silencedetect @ 0x5581] silence_start: {start}\n\
             [silencedetect @ 0x5581] silence_end: {end} | silence_duration: {}\n",
            end - start
        ));
    }
    output.push_str(&format!(
        "size=N/A time=00:00:01.00 bitrate=N/A speed= 200x\r\
         size=N/A time={total} bitrate=N/A speed= 412x\n"
    ));
    output
}

#[test]
fn test_basic_segmentation() {
    let output = detection_output(&[(2.0, 3.0), (5.5, 6.0)], "00:00:10.00");
    let segments = segments_from_detection(&output, Path::new(SOURCE), 0.1).unwrap();

    let spans: Vec<(f64, f64)> = segments.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(spans, vec![(0.0, 2.0), (3.0, 5.5), (6.0, 10.0)]);
    assert!(segments
        .iter()
        .all(|segment| segment.filename == Path::new(SOURCE)));
    assert!((segments[1].duration - 2.5).abs() < 1e-9);
}

#[test]
fn test_at_most_one_span_per_pair_plus_tail() {
    let pairs = [(0.5, 0.9), (1.0, 1.05), (3.0, 3.2), (7.25, 8.0)];
    let output = detection_output(&pairs, "00:00:09.50");
    let raw = raw_segments(&output, Path::new(SOURCE));

    assert!(raw.len() <= pairs.len() + 1);
    assert!(raw.iter().all(|segment| segment.duration >= 0.0));
    assert!(raw.windows(2).all(|pair| pair[0].start <= pair[1].start));
}

#[test]
fn test_short_gap_yields_no_segment() {
    // The span between silence_end 1.0 and silence_start 1.05 is noise.
    let output = detection_output(&[(0.0, 1.0), (1.05, 2.0)], "00:00:04.00");
    let segments = segments_from_detection(&output, Path::new(SOURCE), 0.1).unwrap();

    assert!(segments.iter().all(|segment| segment.duration > 0.1));
    let spans: Vec<(f64, f64)> = segments.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(spans, vec![(2.0, 4.0)]);
}

#[test]
fn test_missing_silence_markers() {
    let output = "size=N/A time=00:00:10.00 bitrate=N/A speed= 412x\n";
    let err = segments_from_detection(output, Path::new(SOURCE), 0.1).unwrap_err();
    assert!(matches!(err, SplitError::NoSilenceDetected));
}

#[test]
fn test_all_segments_filtered() {
    let output = detection_output(&[(0.05, 9.95)], "00:00:10.00");
    let err = segments_from_detection(&output, Path::new(SOURCE), 0.1).unwrap_err();
    assert!(matches!(err, SplitError::NoUsableSegments { .. }));
}

#[test]
fn test_malformed_line_is_skipped() {
    let output = "[silencedetect @ 0x1] silence_start: 2.0\n\
                  [silencedetect @ 0x1] silence_end: garbage | silence_duration: 1\n\
                  [silencedetect @ 0x1] silence_start: 4.0\n\
                  size=N/A time=00:00:06.00 bitrate=N/A\n";
    let raw = raw_segments(output, Path::new(SOURCE));

    // The unparsable silence_end never moved the cursor off 0.
    let spans: Vec<(f64, f64)> = raw.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(spans, vec![(0.0, 2.0), (0.0, 4.0), (0.0, 6.0)]);
}

#[test]
fn test_final_progress_report_closes_stream() {
    let output = detection_output(&[(1.0, 2.0)], "00:01:05.50");
    let raw = raw_segments(&output, Path::new(SOURCE));

    assert_eq!(raw.len(), 2);
    assert!((raw[1].end - 65.5).abs() < 1e-9);
}

#[test]
fn test_no_stream_time_leaves_tail_open() {
    let output = "[silencedetect @ 0x1] silence_start: 2.0\n\
                  [silencedetect @ 0x1] silence_end: 3.0 | silence_duration: 1\n";
    let raw = raw_segments(output, Path::new(SOURCE));
    assert_eq!(raw.len(), 1);
    assert!((raw[0].end - 2.0).abs() < 1e-9);
}

#[test]
fn test_tracker_transitions() {
    let mut tracker = SegmentTracker::new(SOURCE);

    let closed = tracker.apply(SilenceEvent::SilenceStart(1.5)).unwrap();
    assert_eq!((closed.start, closed.end), (0.0, 1.5));
    assert_eq!(tracker.pending_start(), 0.0);

    assert!(tracker.apply(SilenceEvent::SilenceEnd(2.0)).is_none());
    assert_eq!(tracker.pending_start(), 2.0);

    assert!(tracker.apply(SilenceEvent::StreamTime(3.0)).is_none());
    assert!(tracker.apply(SilenceEvent::StreamTime(4.0)).is_none());

    let tail = tracker.finish().unwrap();
    assert_eq!((tail.start, tail.end), (2.0, 4.0));
    assert!((tail.duration - 2.0).abs() < 1e-9);
}

#[test]
fn test_tracker_clamps_negative_silence_end() {
    let mut tracker = SegmentTracker::new(SOURCE);
    tracker.apply(SilenceEvent::SilenceEnd(-0.0013));
    assert_eq!(tracker.pending_start(), 0.0);
}

#[test]
fn test_marker_text_in_input_path_is_not_silence() {
    let output = "Input #0, wav, from 'silence_start_take.wav':\n\
                  \x20 Duration: 00:00:10.00, bitrate: 1411 kb/s\n\
                  size=N/A time=00:00:10.00 bitrate=N/A speed= 412x\n";
    let err = segments_from_detection(output, Path::new("silence_start_take.wav"), 0.1)
        .unwrap_err();
    assert!(matches!(err, SplitError::NoSilenceDetected));
}

#[test]
fn test_marker_echo_outside_detector_lines_is_ignored() {
    let output = "Output #0, null, to 'time=5 silence_end: 9.wav':\n\
                  [silencedetect @ 0x1] silence_start: 2.0\n\
                  [silencedetect @ 0x1] silence_end: 3.0 | silence_duration: 1\n\
                  size=N/A time=00:00:06.00 bitrate=N/A\n";
    let raw = raw_segments(output, Path::new(SOURCE));

    let spans: Vec<(f64, f64)> = raw.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(spans, vec![(0.0, 2.0), (3.0, 6.0)]);
}

#[test]
fn test_unparsable_silence_start_is_not_silence() {
    let output = "[silencedetect @ 0x1] silence_start: N/A\n\
                  size=N/A time=00:00:06.00 bitrate=N/A\n";
    let err = segments_from_detection(output, Path::new(SOURCE), 0.1).unwrap_err();
    assert!(matches!(err, SplitError::NoSilenceDetected));
}
