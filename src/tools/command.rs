use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{MediaTools, ToolOp, WaveformRequest};
use crate::error::{Result, SplitError};

/// Executables used by [`CommandTools`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub ffmpeg: PathBuf,
    pub audiowaveform: PathBuf,
    #[serde(alias = "imagemagick")]
    pub convert: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            audiowaveform: PathBuf::from("audiowaveform"),
            convert: PathBuf::from("convert"),
        }
    }
}

/// [`MediaTools`] backed by ffmpeg, audiowaveform and ImageMagick processes.
///
/// Calls block until the child exits; there is no timeout.
#[derive(Debug, Clone, Default)]
pub struct CommandTools {
    paths: ToolPaths,
}

impl CommandTools {
    pub fn new(paths: ToolPaths) -> Self {
        Self { paths }
    }

    fn run(&self, program: &Path, op: ToolOp, args: Vec<OsString>) -> Result<String> {
        let tool = tool_name(program);
        let operation = op.name();
        debug!(tool = %tool, operation, args = ?args, "running external tool");

        let output = Command::new(program).args(&args).output().map_err(|err| {
            SplitError::external(&tool, operation, format!("failed to launch: {err}"))
        })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        debug!(tool = %tool, output = %text, "external tool output");

        if !output.status.success() {
            error!(tool = %tool, operation, status = %output.status, "external tool failed");
            return Err(SplitError::external(tool, operation, text));
        }
        Ok(text)
    }
}

impl MediaTools for CommandTools {
    fn detect_silence(&self, input: &Path, noise_db: i32, min_silence: f64) -> Result<String> {
        self.run(
            &self.paths.ffmpeg,
            ToolOp::DetectSilence,
            silence_detect_args(input, noise_db, min_silence),
        )
    }

    fn extract_range(&self, input: &Path, start: f64, end: f64, output: &Path) -> Result<String> {
        self.run(
            &self.paths.ffmpeg,
            ToolOp::ExtractRange,
            extract_args(input, start, end, output),
        )
    }

    fn pad_silence_tail(&self, input: &Path, pad_seconds: f64, output: &Path) -> Result<String> {
        self.run(
            &self.paths.ffmpeg,
            ToolOp::PadSilenceTail,
            pad_args(input, pad_seconds, output),
        )
    }

    fn concat_files(&self, manifest: &Path, output: &Path) -> Result<String> {
        self.run(
            &self.paths.ffmpeg,
            ToolOp::ConcatFiles,
            concat_args(manifest, output),
        )
    }

    fn render_waveform(&self, request: &WaveformRequest<'_>) -> Result<String> {
        self.run(
            &self.paths.audiowaveform,
            ToolOp::RenderWaveform,
            waveform_args(request),
        )
    }

    fn concat_images_horizontally(&self, images: &[PathBuf], output: &Path) -> Result<String> {
        let mut args: Vec<OsString> = images.iter().map(|image| image.into()).collect();
        args.push("+append".into());
        args.push(output.into());
        self.run(&self.paths.convert, ToolOp::ConcatImages, args)
    }
}

fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

fn silence_detect_args(input: &Path, noise_db: i32, min_silence: f64) -> Vec<OsString> {
    vec![
        "-i".into(),
        input.into(),
        "-af".into(),
        format!("silencedetect=noise={noise_db}dB:d={min_silence:.3}").into(),
        "-f".into(),
        "null".into(),
        "-".into(),
    ]
}

fn extract_args(input: &Path, start: f64, end: f64, output: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        input.into(),
        "-acodec".into(),
        "copy".into(),
        "-ss".into(),
        format!("{start:.8}").into(),
        "-to".into(),
        format!("{end:.8}").into(),
        output.into(),
    ]
}

fn pad_args(input: &Path, pad_seconds: f64, output: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        input.into(),
        "-af".into(),
        format!("apad=pad_dur={pad_seconds:.3}").into(),
        output.into(),
    ]
}

fn concat_args(manifest: &Path, output: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        manifest.into(),
        "-c".into(),
        "copy".into(),
        output.into(),
    ]
}

fn waveform_args(request: &WaveformRequest<'_>) -> Vec<OsString> {
    vec![
        "-i".into(),
        request.input.into(),
        "-o".into(),
        request.output.into(),
        "--background-color".into(),
        request.background.into(),
        "--waveform-color".into(),
        request.color.into(),
        "--amplitude-scale".into(),
        "1".into(),
        "--no-axis-labels".into(),
        "--zoom".into(),
        "auto".into(),
        "--height".into(),
        request.height.to_string().into(),
        "--width".into(),
        request.width.to_string().into(),
    ]
}
