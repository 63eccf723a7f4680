//! Writing rendered source text to disk.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use crate::error::EmitError;
use crate::layout::{FileCategory, OutputLayout};

/// Writes rendered text for one model.
pub trait Emitter: Send + Sync {
    /// Write `contents` to the path `layout` assigns to `model_name` and
    /// returns that path.
    fn emit(
        &self,
        layout: &OutputLayout,
        model_name: &str,
        category: FileCategory,
        contents: &str,
    ) -> Result<PathBuf, EmitError>;
}

/// Emitter backed by the local filesystem.
///
/// Parent directories are created on demand and existing files are
/// overwritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEmitter;

impl Emitter for FsEmitter {
    fn emit(
        &self,
        layout: &OutputLayout,
        model_name: &str,
        category: FileCategory,
        contents: &str,
    ) -> Result<PathBuf, EmitError> {
        let path = layout
            .file_path(model_name, category)
            .map_err(|err| EmitError {
                path: layout.root().to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, err),
            })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| EmitError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, contents).map_err(|source| EmitError {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = contents.len(), "Wrote generated file.");
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_into_category_directory() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path());

        let path = FsEmitter
            .emit(&layout, "UserProfile", FileCategory::Model, "export class UserProfile {}\n")
            .unwrap();

        assert_eq!(path, dir.path().join("models/user-profile.model.ts"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "export class UserProfile {}\n"
        );
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path()).with_directory(FileCategory::Enum, "shared");

        FsEmitter
            .emit(&layout, "Status", FileCategory::Enum, "old")
            .unwrap();
        let path = FsEmitter
            .emit(&layout, "Status", FileCategory::Enum, "new")
            .unwrap();

        assert_eq!(path, dir.path().join("shared/status.enum.ts"));
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_io_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the models directory should be
        fs::write(dir.path().join("models"), "").unwrap();
        let layout = OutputLayout::new(dir.path());

        let err = FsEmitter
            .emit(&layout, "UserProfile", FileCategory::Model, "")
            .unwrap_err();
        assert_eq!(err.path, dir.path().join("models"));
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path());

        let err = FsEmitter
            .emit(&layout, "", FileCategory::Model, "")
            .unwrap_err();
        assert_eq!(err.source.kind(), io::ErrorKind::InvalidInput);
    }
}
