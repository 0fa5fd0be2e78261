use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use super::{MediaTools, ToolOp, WaveformRequest};
use crate::error::{Result, SplitError};

/// One recorded invocation of [`MockTools`].
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    DetectSilence {
        input: PathBuf,
        noise_db: i32,
        min_silence: f64,
    },
    ExtractRange {
        input: PathBuf,
        start: f64,
        end: f64,
        output: PathBuf,
    },
    PadSilenceTail {
        input: PathBuf,
        pad_seconds: f64,
        output: PathBuf,
    },
    ConcatFiles {
        manifest: PathBuf,
        /// Manifest contents, captured before the manifest is cleaned up.
        entries: Vec<String>,
        output: PathBuf,
    },
    RenderWaveform {
        input: PathBuf,
        output: PathBuf,
        width: u32,
        height: u32,
        color: String,
        background: String,
    },
    ConcatImages {
        images: Vec<PathBuf>,
        output: PathBuf,
    },
}

impl ToolCall {
    pub fn op(&self) -> ToolOp {
        match self {
            ToolCall::DetectSilence { .. } => ToolOp::DetectSilence,
            ToolCall::ExtractRange { .. } => ToolOp::ExtractRange,
            ToolCall::PadSilenceTail { .. } => ToolOp::PadSilenceTail,
            ToolCall::ConcatFiles { .. } => ToolOp::ConcatFiles,
            ToolCall::RenderWaveform { .. } => ToolOp::RenderWaveform,
            ToolCall::ConcatImages { .. } => ToolOp::ConcatImages,
        }
    }
}

/// In-memory [`MediaTools`] returning canned output and recording every call.
///
/// Nothing is written to disk; concatenation reports come from the queue fed
/// by [`MockTools::with_merge_durations`] and [`MockTools::with_concat_report`].
#[derive(Debug, Default)]
pub struct MockTools {
    silence_output: String,
    merge_reports: RefCell<VecDeque<String>>,
    failure: Option<(ToolOp, usize, String)>,
    calls: RefCell<Vec<ToolCall>>,
}

impl MockTools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostic text returned by `detect_silence`.
    pub fn with_silence_output(mut self, output: impl Into<String>) -> Self {
        self.silence_output = output.into();
        self
    }

    /// Durations reported by successive `concat_files` calls.
    pub fn with_merge_durations(self, durations: &[f64]) -> Self {
        self.merge_reports
            .borrow_mut()
            .extend(durations.iter().map(|&seconds| progress_report(seconds)));
        self
    }

    /// Raw text returned by the next unanswered `concat_files` call.
    pub fn with_concat_report(self, report: impl Into<String>) -> Self {
        self.merge_reports.borrow_mut().push_back(report.into());
        self
    }

    /// Makes the `nth` (zero-based) call to `op` fail with `output`.
    pub fn failing_on(mut self, op: ToolOp, nth: usize, output: impl Into<String>) -> Self {
        self.failure = Some((op, nth, output.into()));
        self
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, op: ToolOp) -> Vec<ToolCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.op() == op)
            .cloned()
            .collect()
    }

    fn record(&self, call: ToolCall) -> Result<()> {
        let op = call.op();
        let mut calls = self.calls.borrow_mut();
        let previous = calls.iter().filter(|recorded| recorded.op() == op).count();
        calls.push(call);
        match &self.failure {
            Some((failing, nth, output)) if *failing == op && *nth == previous => {
                Err(SplitError::external("mock", op.name(), output.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl MediaTools for MockTools {
    fn detect_silence(&self, input: &Path, noise_db: i32, min_silence: f64) -> Result<String> {
        self.record(ToolCall::DetectSilence {
            input: input.to_path_buf(),
            noise_db,
            min_silence,
        })?;
        Ok(self.silence_output.clone())
    }

    fn extract_range(&self, input: &Path, start: f64, end: f64, output: &Path) -> Result<String> {
        self.record(ToolCall::ExtractRange {
            input: input.to_path_buf(),
            start,
            end,
            output: output.to_path_buf(),
        })?;
        Ok(String::new())
    }

    fn pad_silence_tail(&self, input: &Path, pad_seconds: f64, output: &Path) -> Result<String> {
        self.record(ToolCall::PadSilenceTail {
            input: input.to_path_buf(),
            pad_seconds,
            output: output.to_path_buf(),
        })?;
        Ok(String::new())
    }

    fn concat_files(&self, manifest: &Path, output: &Path) -> Result<String> {
        let entries = fs::read_to_string(manifest)?
            .lines()
            .map(str::to_string)
            .collect();
        self.record(ToolCall::ConcatFiles {
            manifest: manifest.to_path_buf(),
            entries,
            output: output.to_path_buf(),
        })?;
        Ok(self
            .merge_reports
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| progress_report(0.0)))
    }

    fn render_waveform(&self, request: &WaveformRequest<'_>) -> Result<String> {
        self.record(ToolCall::RenderWaveform {
            input: request.input.to_path_buf(),
            output: request.output.to_path_buf(),
            width: request.width,
            height: request.height,
            color: request.color.to_string(),
            background: request.background.to_string(),
        })?;
        Ok(String::new())
    }

    fn concat_images_horizontally(&self, images: &[PathBuf], output: &Path) -> Result<String> {
        self.record(ToolCall::ConcatImages {
            images: images.to_vec(),
            output: output.to_path_buf(),
        })?;
        Ok(String::new())
    }
}

/// An ffmpeg-style final progress line reporting `seconds` of output.
pub fn progress_report(seconds: f64) -> String {
    // Split whole hundredths so rounding never yields a 60.00 seconds field.
    let centis = (seconds.max(0.0) * 100.0).round() as u64;
    let hours = centis / 360_000;
    let minutes = centis / 6_000 % 60;
    let secs = (centis % 6_000) as f64 / 100.0;
    format!(
        "size=     128kB time={:02}:{:02}:{:05.2} bitrate=1411.2kbits/s speed= 512x\n",
        hours, minutes, secs
    )
}
