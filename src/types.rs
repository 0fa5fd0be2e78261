//! Core types for the silencecut pipeline

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A contiguous span of non-silent audio.
///
/// While segmenting, `filename` is the source recording and `start`/`end` are
/// offsets into it. After materialization the segment points at its own file
/// and only `filename` and `duration` stay meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioSegment {
    pub filename: PathBuf,
    pub start: f64,    // seconds
    pub end: f64,      // seconds
    pub duration: f64, // seconds, may diverge from end - start after splitting
}

impl AudioSegment {
    pub fn new(filename: impl Into<PathBuf>, start: f64, end: f64) -> Self {
        Self {
            filename: filename.into(),
            start,
            end,
            duration: end - start,
        }
    }

    /// A segment standing for a whole file of known duration.
    pub fn whole_file(filename: impl Into<PathBuf>, duration: f64) -> Self {
        Self {
            filename: filename.into(),
            start: 0.0,
            end: duration,
            duration,
        }
    }

    pub fn path(&self) -> &Path {
        &self.filename
    }
}

/// Output file `<prefix><index>.wav`.
pub fn numbered_wav(prefix: &str, index: usize) -> PathBuf {
    PathBuf::from(format!("{prefix}{index}.wav"))
}

/// Waveform image path for an audio file: the file name with `.png` appended.
pub fn image_path(audio: &Path) -> PathBuf {
    let mut name = OsString::from(audio.as_os_str());
    name.push(".png");
    PathBuf::from(name)
}

/// Tunables for splitting, padding and waveform rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    /// Extra seconds extracted past each segment end to avoid clipped tails.
    #[serde(alias = "margin")]
    pub split_margin: f64,
    /// Length of the silence tail appended when padding is requested.
    #[serde(alias = "pad")]
    pub pad_seconds: f64,
    /// Segments at or below this duration are treated as noise.
    #[serde(alias = "min_segment")]
    pub min_segment_seconds: f64,
    pub pixels_per_second: f64,
    pub waveform_height: u32,
    /// Per-segment waveform colors, alternated by index.
    pub segment_colors: [String; 2],
    pub merge_color: String,
    pub background_color: String,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            split_margin: 0.1,
            pad_seconds: 0.05,
            min_segment_seconds: 0.1,
            pixels_per_second: 100.0,
            waveform_height: 80,
            segment_colors: ["7FFFD4".to_string(), "F5F5DC".to_string()],
            merge_color: "ffffff".to_string(),
            background_color: "ffffff00".to_string(),
        }
    }
}

impl SplitSettings {
    /// Image width for a waveform of `duration` seconds.
    pub fn waveform_width(&self, duration: f64) -> u32 {
        (duration * self.pixels_per_second).round().max(1.0) as u32
    }

    pub fn segment_color(&self, index: usize) -> &str {
        &self.segment_colors[index % 2]
    }
}
