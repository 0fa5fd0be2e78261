use std::path::PathBuf;

use super::events::SilenceEvent;
use crate::types::AudioSegment;

/// Pending-segment state machine driven by [`SilenceEvent`]s.
///
/// Exactly one candidate segment is open at a time. A silence start closes
/// it, a silence end reopens it at the end of the silence, and the final
/// stream time closes the trailing span in [`SegmentTracker::finish`].
#[derive(Debug, Clone)]
pub struct SegmentTracker {
    source: PathBuf,
    pending_start: f64,
    stream_end: Option<f64>,
}

impl SegmentTracker {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            pending_start: 0.0,
            stream_end: None,
        }
    }

    /// Applies one event, returning the segment it closes, if any.
    ///
    /// A silence start does not move the cursor; only the matching silence
    /// end does.
    pub fn apply(&mut self, event: SilenceEvent) -> Option<AudioSegment> {
        match event {
            SilenceEvent::SilenceStart(at) => Some(self.close(at)),
            SilenceEvent::SilenceEnd(at) => {
                self.pending_start = at.max(0.0);
                None
            }
            SilenceEvent::StreamTime(at) => {
                self.stream_end = Some(at);
                None
            }
        }
    }

    /// Closes the trailing span at the last reported stream time. Without a
    /// stream time there is no known end, so nothing is emitted.
    pub fn finish(self) -> Option<AudioSegment> {
        let end = self.stream_end?;
        Some(AudioSegment::new(self.source, self.pending_start, end))
    }

    pub fn pending_start(&self) -> f64 {
        self.pending_start
    }

    fn close(&self, end: f64) -> AudioSegment {
        AudioSegment::new(self.source.clone(), self.pending_start, end)
    }
}
