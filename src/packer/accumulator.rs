use std::mem;
use std::path::PathBuf;

use crate::types::AudioSegment;

/// Files to concatenate into one merged output, in playback order.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeGroup {
    pub files: Vec<PathBuf>,
    /// Sum of the constituent segment durations.
    pub total_duration: f64,
}

impl MergeGroup {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Greedy, order-preserving grouping under a duration budget.
pub(super) struct MergeAccumulator {
    pending: Vec<PathBuf>,
    running_total: f64,
}

impl MergeAccumulator {
    pub(super) fn new() -> Self {
        Self {
            pending: Vec::new(),
            running_total: 0.0,
        }
    }

    /// Adds a segment, first flushing the pending group if the segment would
    /// push it past `budget`. The segment itself always lands in the group
    /// that is pending afterwards.
    pub(super) fn push(&mut self, segment: &AudioSegment, budget: f64) -> Option<MergeGroup> {
        let flushed = if !self.pending.is_empty() && segment.duration + self.running_total > budget
        {
            Some(self.flush())
        } else {
            None
        };
        self.pending.push(segment.filename.clone());
        self.running_total += segment.duration;
        flushed
    }

    /// Flushes whatever remains. Always yields a group, even an empty one.
    pub(super) fn finish(mut self) -> MergeGroup {
        self.flush()
    }

    fn flush(&mut self) -> MergeGroup {
        MergeGroup {
            files: mem::take(&mut self.pending),
            total_duration: mem::replace(&mut self.running_total, 0.0),
        }
    }
}
