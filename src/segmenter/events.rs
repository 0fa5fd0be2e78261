use crate::error::ParseError;
use crate::timestamp::{parse_time_to_seconds, string_between};

const DETECTOR_TAG: &str = "[silencedetect";
const SILENCE_START: &str = "silence_start: ";
const SILENCE_END: &str = "silence_end: ";
const PROGRESS_TIME: &str = "time=";
/// Progress lines lead with the output size (audio) or frame count (video).
const PROGRESS_PREFIXES: [&str; 2] = ["size=", "frame="];

/// One timestamped event reported by a silence-detection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SilenceEvent {
    /// A silent interval begins; the sound before it ends here.
    SilenceStart(f64),
    /// A silent interval ends; the next sound starts here.
    SilenceEnd(f64),
    /// Total processed duration so far. The last one marks end of stream.
    StreamTime(f64),
}

/// Splits tool output into lines. Progress reports are separated by carriage
/// returns, so both line endings count.
pub(super) fn lines(output: &str) -> impl Iterator<Item = &str> {
    output.split(['\n', '\r']).filter(|line| !line.trim().is_empty())
}

/// Classifies a line. `None` means the line carries no event; `Some(Err)`
/// means the line matched a marker but its value did not parse.
///
/// Only detector lines and progress lines are considered, so marker text
/// echoed elsewhere (e.g. inside the input path) never counts.
pub(super) fn parse_line(line: &str) -> Option<Result<SilenceEvent, ParseError>> {
    let trimmed = line.trim_start();
    // A trailing space terminates values that end the line.
    let padded = format!("{trimmed} ");
    if trimmed.starts_with(DETECTOR_TAG) {
        if trimmed.contains(SILENCE_START) {
            Some(labeled_time(&padded, SILENCE_START).map(SilenceEvent::SilenceStart))
        } else if trimmed.contains(SILENCE_END) {
            Some(labeled_time(&padded, SILENCE_END).map(SilenceEvent::SilenceEnd))
        } else {
            None
        }
    } else if PROGRESS_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
        && trimmed.contains(PROGRESS_TIME)
    {
        Some(labeled_time(&padded, PROGRESS_TIME).map(SilenceEvent::StreamTime))
    } else {
        None
    }
}

fn labeled_time(line: &str, label: &str) -> Result<f64, ParseError> {
    parse_time_to_seconds(string_between(line, label, " ")?)
}
