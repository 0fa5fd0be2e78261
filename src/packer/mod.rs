mod accumulator;
mod manifest;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Result, SplitError};
use crate::timestamp::{last_string_between, parse_time_to_seconds};
use crate::tools::{MediaTools, WaveformRequest};
use crate::types::{image_path, numbered_wav, AudioSegment, SplitSettings};

use accumulator::MergeAccumulator;
pub use accumulator::MergeGroup;

/// Pure function grouping `segments` in order so that no group's summed
/// duration exceeds `budget`, unless a single segment alone is over budget.
/// The final group is always emitted.
pub fn plan_merge_groups(segments: &[AudioSegment], budget: f64) -> Vec<MergeGroup> {
    let mut accumulator = MergeAccumulator::new();
    let mut groups: Vec<MergeGroup> = segments
        .iter()
        .filter_map(|segment| accumulator.push(segment, budget))
        .collect();
    groups.push(accumulator.finish());
    groups
}

/// Packs materialized segments into merges of at most `budget` seconds,
/// written as `<prefix><k>.wav`. Merges are produced one after another and
/// the first failure aborts the rest.
pub fn merge_segments<T: MediaTools + ?Sized>(
    tools: &T,
    segments: &[AudioSegment],
    prefix: &str,
    budget: f64,
    settings: &SplitSettings,
) -> Result<Vec<AudioSegment>> {
    if segments.is_empty() {
        warn!("merging an empty segment list; the concat will have no inputs");
    }
    let groups = plan_merge_groups(segments, budget);
    info!(groups = groups.len(), budget, "planned merges");

    groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            debug!(
                index,
                files = group.len(),
                planned = group.total_duration,
                "merging group"
            );
            merge_audio_files(tools, &group.files, &numbered_wav(prefix, index), settings)
        })
        .collect()
}

/// Concatenates `files` into `output` without re-encoding and renders its
/// waveform. The duration is read back from the tool's own final progress
/// report rather than summed from the inputs.
pub fn merge_audio_files<T: MediaTools + ?Sized>(
    tools: &T,
    files: &[PathBuf],
    output: &Path,
    settings: &SplitSettings,
) -> Result<AudioSegment> {
    let manifest = manifest::write_manifest(files)?;
    let report = tools.concat_files(manifest.path(), output)?;
    let duration = last_string_between(&report, "time=", " bitrate")
        .and_then(parse_time_to_seconds)
        .map_err(|source| SplitError::MergeDuration {
            output: output.to_path_buf(),
            source,
        })?;
    let merged = AudioSegment::whole_file(output, duration);

    let image = image_path(output);
    tools.render_waveform(&WaveformRequest {
        input: output,
        output: &image,
        width: settings.waveform_width(duration),
        height: settings.waveform_height,
        color: &settings.merge_color,
        background: &settings.background_color,
    })?;
    info!(output = %output.display(), duration, files = files.len(), "merged");
    Ok(merged)
}
