use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::tools::ToolPaths;
use crate::types::SplitSettings;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "SILENCECUT_CONFIG";

/// Runtime configuration parsed from an optional JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(alias = "split")]
    pub settings: SplitSettings,
    #[serde(alias = "binaries")]
    pub tools: ToolPaths,
}

impl AppConfig {
    /// Loads `path` if given, else the file named by [`CONFIG_ENV`], else
    /// built-in defaults.
    pub fn from_override(path: Option<PathBuf>) -> Result<Self> {
        let path = path.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        let config = match path {
            Some(custom) => Self::load(&custom)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        Self::parse(&data).with_context(|| format!("invalid config file {:?}", path))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse config JSON")
    }

    pub fn validate(&self) -> Result<()> {
        let settings = &self.settings;
        ensure!(
            settings.split_margin >= 0.0,
            "split_margin must be non-negative, got {}",
            settings.split_margin
        );
        ensure!(
            settings.pad_seconds >= 0.0,
            "pad_seconds must be non-negative, got {}",
            settings.pad_seconds
        );
        ensure!(
            settings.min_segment_seconds >= 0.0,
            "min_segment_seconds must be non-negative, got {}",
            settings.min_segment_seconds
        );
        ensure!(
            settings.pixels_per_second > 0.0,
            "pixels_per_second must be positive"
        );
        ensure!(
            settings.waveform_height > 0,
            "waveform_height must be positive"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.tools.ffmpeg, PathBuf::from("ffmpeg"));
        assert!((config.settings.pad_seconds - 0.05).abs() < 1e-9);
    }

    #[test]
    fn parses_partial_json() {
        let config = AppConfig::parse(
            r#"{"split": {"min_segment_seconds": 0.25}, "tools": {"ffmpeg": "/opt/ffmpeg"}}"#,
        )
        .unwrap();
        assert!((config.settings.min_segment_seconds - 0.25).abs() < 1e-9);
        assert!((config.settings.split_margin - 0.1).abs() < 1e-9);
        assert_eq!(config.tools.ffmpeg, PathBuf::from("/opt/ffmpeg"));
        assert_eq!(config.tools.convert, PathBuf::from("convert"));
    }

    #[test]
    fn rejects_negative_pad() {
        let config = AppConfig::parse(r#"{"settings": {"pad_seconds": -1.0}}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn accepts_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"settings": {{"waveform_height": 120}}}}"#).unwrap();
        let config = AppConfig::from_override(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.settings.waveform_height, 120);
    }

    #[test]
    fn missing_override_fails() {
        let err = AppConfig::from_override(Some(PathBuf::from("/nonexistent/silencecut.json")))
            .unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
