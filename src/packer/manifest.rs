use std::io::Write;
use std::path::{self, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, SplitError};

/// Writes a concat manifest listing `files` as absolute paths, one
/// `file '<path>'` entry per line. The file is removed when the handle drops.
pub(super) fn write_manifest(files: &[PathBuf]) -> Result<NamedTempFile> {
    let mut manifest = tempfile::Builder::new()
        .prefix("merge")
        .suffix(".txt")
        .tempfile()?;
    for file in files {
        let absolute = path::absolute(file).map_err(|source| SplitError::PathResolution {
            path: file.clone(),
            source,
        })?;
        writeln!(manifest, "{}", manifest_entry(&absolute.to_string_lossy()))?;
    }
    manifest.flush()?;
    Ok(manifest)
}

/// Single quotes inside a quoted concat path are written as `'\''`.
fn manifest_entry(path: &str) -> String {
    format!("file '{}'", path.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_absolute_paths_in_order() {
        let files = vec![PathBuf::from("b.wav"), PathBuf::from("/data/a.wav")];
        let manifest = write_manifest(&files).unwrap();
        let contents = fs::read_to_string(manifest.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            lines[0],
            format!("file '{}'", cwd.join("b.wav").to_string_lossy())
        );
        assert_eq!(lines[1], "file '/data/a.wav'");
    }

    #[test]
    fn manifest_is_removed_on_drop() {
        let manifest = write_manifest(&[PathBuf::from("a.wav")]).unwrap();
        let path = manifest.path().to_path_buf();
        assert!(path.exists());
        drop(manifest);
        assert!(!path.exists());
    }

    #[test]
    fn empty_path_cannot_be_resolved() {
        let err = write_manifest(&[PathBuf::new()]).unwrap_err();
        assert!(matches!(err, SplitError::PathResolution { .. }));
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(manifest_entry("/x/it's.wav"), r"file '/x/it'\''s.wav'");
    }
}
