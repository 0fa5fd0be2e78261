//! Splits segments out of their source recording into standalone files and
//! renders their waveform images.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::tools::{MediaTools, WaveformRequest};
use crate::types::{image_path, numbered_wav, AudioSegment, SplitSettings};

/// Extracts every segment into `<prefix><i>.wav`, optionally padding each
/// with a short silence tail, then renders one waveform per segment and a
/// `<prefix>-merge.png` overview.
///
/// The first tool failure aborts the run. Files written by earlier
/// iterations are left in place.
pub fn split_segments<T: MediaTools + ?Sized>(
    tools: &T,
    segments: &[AudioSegment],
    prefix: &str,
    add_silence: bool,
    settings: &SplitSettings,
) -> Result<Vec<AudioSegment>> {
    let mut split = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        let output = numbered_wav(prefix, index);
        let materialized = extract_segment(tools, segment, &output, add_silence, settings)?;
        info!(
            index,
            output = %output.display(),
            duration = materialized.duration,
            "split segment"
        );
        split.push(materialized);
    }

    render_segment_waveforms(tools, &split, settings)?;
    let overview = overview_path(prefix);
    let images: Vec<PathBuf> = split
        .iter()
        .map(|segment| image_path(&segment.filename))
        .collect();
    tools.concat_images_horizontally(&images, &overview)?;
    info!(overview = %overview.display(), "rendered waveform overview");

    Ok(split)
}

fn extract_segment<T: MediaTools + ?Sized>(
    tools: &T,
    segment: &AudioSegment,
    output: &Path,
    add_silence: bool,
    settings: &SplitSettings,
) -> Result<AudioSegment> {
    let end = segment.end + settings.split_margin;
    let mut duration = segment.duration + settings.split_margin;

    if add_silence {
        let intermediate = intermediate_path(output);
        tools.extract_range(&segment.filename, segment.start, end, &intermediate)?;
        tools.pad_silence_tail(&intermediate, settings.pad_seconds, output)?;
        if let Err(err) = fs::remove_file(&intermediate) {
            warn!(path = %intermediate.display(), error = %err, "could not remove intermediate file");
        }
        duration += settings.pad_seconds;
    } else {
        tools.extract_range(&segment.filename, segment.start, end, output)?;
    }

    Ok(AudioSegment {
        filename: output.to_path_buf(),
        start: segment.start,
        end: segment.end,
        duration,
    })
}

fn render_segment_waveforms<T: MediaTools + ?Sized>(
    tools: &T,
    segments: &[AudioSegment],
    settings: &SplitSettings,
) -> Result<()> {
    for (index, segment) in segments.iter().enumerate() {
        let output = image_path(&segment.filename);
        debug!(index, image = %output.display(), "rendering waveform");
        tools.render_waveform(&WaveformRequest {
            input: &segment.filename,
            output: &output,
            width: settings.waveform_width(segment.duration),
            height: settings.waveform_height,
            color: settings.segment_color(index),
            background: &settings.background_color,
        })?;
    }
    Ok(())
}

/// Unpadded extraction target next to the final output.
fn intermediate_path(output: &Path) -> PathBuf {
    output.with_extension("unpadded.wav")
}

fn overview_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}-merge.png"))
}
