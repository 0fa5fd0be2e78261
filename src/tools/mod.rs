//! External media collaborators.
//!
//! The segmenting and packing stages only ever talk to [`MediaTools`]; the
//! process-backed implementation lives in [`command`], and [`mock`] provides
//! a scriptable stand-in so the pipeline can run without real binaries.

pub mod command;
pub mod mock;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use command::{CommandTools, ToolPaths};
pub use mock::{MockTools, ToolCall};

/// Which collaborator operation a call goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOp {
    DetectSilence,
    ExtractRange,
    PadSilenceTail,
    ConcatFiles,
    RenderWaveform,
    ConcatImages,
}

impl ToolOp {
    /// Human-readable step name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ToolOp::DetectSilence => "detect silence",
            ToolOp::ExtractRange => "extract range",
            ToolOp::PadSilenceTail => "pad silence tail",
            ToolOp::ConcatFiles => "concat files",
            ToolOp::RenderWaveform => "render waveform",
            ToolOp::ConcatImages => "concat images",
        }
    }
}

/// Parameters for rendering one waveform image.
#[derive(Debug, Clone, Copy)]
pub struct WaveformRequest<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub width: u32,
    pub height: u32,
    pub color: &'a str,
    pub background: &'a str,
}

/// Black-box media operations. Every call returns the tool's raw combined
/// output on success and [`crate::SplitError::ExternalTool`] on failure.
pub trait MediaTools {
    fn detect_silence(&self, input: &Path, noise_db: i32, min_silence: f64) -> Result<String>;

    /// Lossless (stream copy) extraction of `[start, end]` into `output`.
    fn extract_range(&self, input: &Path, start: f64, end: f64, output: &Path) -> Result<String>;

    fn pad_silence_tail(&self, input: &Path, pad_seconds: f64, output: &Path) -> Result<String>;

    /// Lossless concatenation of the files listed in a `file '<path>'` manifest.
    fn concat_files(&self, manifest: &Path, output: &Path) -> Result<String>;

    fn render_waveform(&self, request: &WaveformRequest<'_>) -> Result<String>;

    fn concat_images_horizontally(&self, images: &[PathBuf], output: &Path) -> Result<String>;
}
