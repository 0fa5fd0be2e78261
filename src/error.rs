//! Error types shared by the segmentation and packing stages.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for results returned by the core stages.
pub type Result<T> = std::result::Result<T, SplitError>;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("could not find silence: detection output has no silence markers")]
    NoSilenceDetected,
    #[error("could not find any segments longer than {min_duration:.3}s")]
    NoUsableSegments { min_duration: f64 },
    #[error("{tool} ({operation}) failed: {output}")]
    ExternalTool {
        tool: String,
        operation: &'static str,
        output: String,
    },
    #[error("could not read merged duration of {output:?}: {source}")]
    MergeDuration {
        output: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("failed to resolve absolute path for {path:?}: {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SplitError {
    pub fn external(
        tool: impl Into<String>,
        operation: &'static str,
        output: impl Into<String>,
    ) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            operation,
            output: output.into(),
        }
    }
}

/// Failures of the labeled-substring and time-code parser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("marker {marker:?} not found")]
    MissingMarker { marker: String },
    #[error("invalid {component} component {value:?}")]
    InvalidNumber { component: &'static str, value: String },
    #[error("time code {0:?} must be SS, MM:SS or HH:MM:SS")]
    InvalidTimeCode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_tool_error_carries_raw_output() {
        let err = SplitError::external("ffmpeg", "concat", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "ffmpeg (concat) failed: No such file or directory"
        );
    }

    #[test]
    fn parse_error_converts_into_split_error() {
        let err: SplitError = ParseError::MissingMarker {
            marker: "time=".to_string(),
        }
        .into();
        assert!(matches!(err, SplitError::Parse(_)));
        assert_eq!(err.to_string(), "marker \"time=\" not found");
    }

    #[test]
    fn merge_duration_error_names_output() {
        let err = SplitError::MergeDuration {
            output: PathBuf::from("out/kit-merged0.wav"),
            source: ParseError::MissingMarker {
                marker: "time=".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "could not read merged duration of \"out/kit-merged0.wav\": marker \"time=\" not found"
        );
    }
}
