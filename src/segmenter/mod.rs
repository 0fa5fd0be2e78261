mod events;
mod tracker;

#[cfg(test)]
mod tests;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Result, SplitError};
use crate::tools::MediaTools;
use crate::types::{AudioSegment, SplitSettings};

pub use events::SilenceEvent;
pub use tracker::SegmentTracker;

/// Runs a silence-detection pass over `input` and cuts it into the non-silent
/// segments between the reported silences.
pub fn split_on_silence<T: MediaTools + ?Sized>(
    tools: &T,
    input: &Path,
    noise_db: i32,
    min_silence: f64,
    settings: &SplitSettings,
) -> Result<Vec<AudioSegment>> {
    info!(input = %input.display(), noise_db, min_silence, "detecting silence");
    let output = tools.detect_silence(input, noise_db, min_silence)?;
    debug!(output = %output, "silence detection output");
    segments_from_detection(&output, input, settings.min_segment_seconds)
}

/// Pure function turning silence-detection output into ordered segments of
/// `source`, dropping anything no longer than `min_duration` seconds.
pub fn segments_from_detection(
    output: &str,
    source: &Path,
    min_duration: f64,
) -> Result<Vec<AudioSegment>> {
    let scan = scan(output, source);
    if scan.silences == 0 {
        return Err(SplitError::NoSilenceDetected);
    }

    let candidates = scan.segments;
    let total = candidates.len();
    let segments: Vec<AudioSegment> = candidates
        .into_iter()
        .filter(|segment| segment.duration > min_duration)
        .collect();
    info!(
        candidates = total,
        kept = segments.len(),
        "segmented {}",
        source.display()
    );

    if segments.is_empty() {
        return Err(SplitError::NoUsableSegments { min_duration });
    }
    Ok(segments)
}

/// Every span closed by the event stream, before the noise filter.
///
/// Lines whose values fail to parse are skipped and leave the tracker as it
/// was.
pub fn raw_segments(output: &str, source: &Path) -> Vec<AudioSegment> {
    scan(output, source).segments
}

struct Scan {
    segments: Vec<AudioSegment>,
    /// Parsed silence starts; zero means the pass found no silence.
    silences: usize,
}

fn scan(output: &str, source: &Path) -> Scan {
    let mut tracker = SegmentTracker::new(source);
    let mut segments = Vec::new();
    let mut silences = 0;

    for line in events::lines(output) {
        match events::parse_line(line) {
            Some(Ok(event)) => {
                if matches!(event, SilenceEvent::SilenceStart(_)) {
                    silences += 1;
                }
                segments.extend(tracker.apply(event));
            }
            Some(Err(err)) => warn!(line = line.trim(), error = %err, "skipping malformed line"),
            None => {}
        }
    }
    segments.extend(tracker.finish());
    Scan { segments, silences }
}
