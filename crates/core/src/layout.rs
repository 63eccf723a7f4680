//! Output directory layout.
//!
//! One table drives three things: where a generated file is written, the
//! output path carried by a generation request, and the relative module path
//! one generated file uses to import another.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ImportResolutionError, NamingError};
use crate::naming::to_file_case;

/// Extension of every generated file.
pub const TS_FILE_EXTENSION: &str = "ts";

/// Category of a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Data model class.
    Model,
    /// Enumeration.
    Enum,
    /// HTTP service class.
    Service,
}

impl FileCategory {
    /// Every category, in emission order.
    pub const ALL: [FileCategory; 3] = [FileCategory::Model, FileCategory::Enum, FileCategory::Service];

    /// Suffix placed between the file name and the extension (`role.enum.ts`).
    pub fn suffix(self) -> &'static str {
        match self {
            FileCategory::Model => "model",
            FileCategory::Enum => "enum",
            FileCategory::Service => "service",
        }
    }

    /// Default directory name under the output root.
    pub fn default_directory(self) -> &'static str {
        match self {
            FileCategory::Model => "models",
            FileCategory::Enum => "enums",
            FileCategory::Service => "services",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Output root plus the directory assigned to each file category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    directories: BTreeMap<FileCategory, String>,
}

impl OutputLayout {
    /// Layout with the default `models`/`enums`/`services` directories.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let directories = FileCategory::ALL
            .into_iter()
            .map(|category| (category, category.default_directory().to_string()))
            .collect();
        Self {
            root: root.into(),
            directories,
        }
    }

    /// Override the directory used for one category.
    pub fn with_directory(mut self, category: FileCategory, directory: impl Into<String>) -> Self {
        self.directories.insert(category, directory.into());
        self
    }

    /// The configured output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory assigned to `category`, if any.
    pub fn directory(&self, category: FileCategory) -> Option<&str> {
        self.directories.get(&category).map(String::as_str)
    }

    /// File name (without directory) for a type: `user-profile.model.ts`.
    pub fn file_name(type_name: &str, category: FileCategory) -> Result<String, NamingError> {
        Ok(format!(
            "{}.{}.{TS_FILE_EXTENSION}",
            to_file_case(type_name)?,
            category.suffix()
        ))
    }

    /// Full path of the file generated for a type.
    pub fn file_path(
        &self,
        type_name: &str,
        category: FileCategory,
    ) -> Result<PathBuf, ImportResolutionError> {
        let directory = self
            .directory(category)
            .ok_or(ImportResolutionError::MissingDirectory(category.suffix()))?;
        let file_name = Self::file_name(type_name, category)
            .map_err(|_| ImportResolutionError::InvalidName(type_name.to_string()))?;
        Ok(self.root.join(directory).join(file_name))
    }

    /// Module path a file of category `consumer` uses to import `type_name`
    /// generated as `dependency`.
    ///
    /// Files in the same directory import with `./`, everything else goes
    /// through the parent directory: `../enums/role.enum`.
    pub fn import_path(
        &self,
        consumer: FileCategory,
        type_name: &str,
        dependency: FileCategory,
    ) -> Result<String, ImportResolutionError> {
        let consumer_dir = self
            .directory(consumer)
            .ok_or(ImportResolutionError::MissingDirectory(consumer.suffix()))?;
        let dependency_dir = self
            .directory(dependency)
            .ok_or(ImportResolutionError::MissingDirectory(dependency.suffix()))?;
        let module = to_file_case(type_name)
            .map_err(|_| ImportResolutionError::InvalidName(type_name.to_string()))?;

        let prefix = if consumer_dir == dependency_dir {
            "./".to_string()
        } else {
            format!("../{dependency_dir}/")
        };
        Ok(format!("{prefix}{module}.{}", dependency.suffix()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path() {
        let layout = OutputLayout::new("out");
        assert_eq!(
            layout.file_path("UserProfile", FileCategory::Model).unwrap(),
            PathBuf::from("out/models/user-profile.model.ts")
        );
        assert_eq!(
            layout.file_path("Status", FileCategory::Enum).unwrap(),
            PathBuf::from("out/enums/status.enum.ts")
        );
        assert_eq!(
            layout.file_path("UserService", FileCategory::Service).unwrap(),
            PathBuf::from("out/services/user-service.service.ts")
        );
    }

    #[test]
    fn test_import_path_relative_depth() {
        let layout = OutputLayout::new("out");
        assert_eq!(
            layout
                .import_path(FileCategory::Model, "Address", FileCategory::Model)
                .unwrap(),
            "./address.model"
        );
        assert_eq!(
            layout
                .import_path(FileCategory::Model, "Role", FileCategory::Enum)
                .unwrap(),
            "../enums/role.enum"
        );
        assert_eq!(
            layout
                .import_path(FileCategory::Service, "UserProfile", FileCategory::Model)
                .unwrap(),
            "../models/user-profile.model"
        );
    }

    #[test]
    fn test_shared_directory() {
        let layout = OutputLayout::new("out").with_directory(FileCategory::Enum, "models");
        assert_eq!(
            layout
                .import_path(FileCategory::Model, "Role", FileCategory::Enum)
                .unwrap(),
            "./role.enum"
        );
    }

    #[test]
    fn test_invalid_name() {
        let layout = OutputLayout::new("out");
        assert_eq!(
            layout.import_path(FileCategory::Model, "", FileCategory::Model),
            Err(ImportResolutionError::InvalidName(String::new()))
        );
    }
}
