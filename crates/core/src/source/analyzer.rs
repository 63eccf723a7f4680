//! Source analyzer seam.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::SourceModelGraph;
use crate::error::AnalysisError;

/// Produces the source model graph for one input path.
///
/// Called once per run and never retried: a failure here is fatal.
pub trait SourceAnalyzer {
    /// Analyze the input at `path`.
    fn analyze(&self, path: &Path) -> Result<SourceModelGraph, AnalysisError>;
}

/// Reads a model graph the C# analyzer dumped as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGraphAnalyzer;

impl JsonGraphAnalyzer {
    /// Extensions accepted as analyzer output.
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] = &[".json"];
}

impl SourceAnalyzer for JsonGraphAnalyzer {
    fn analyze(&self, path: &Path) -> Result<SourceModelGraph, AnalysisError> {
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        if !Self::SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AnalysisError::UnsupportedExtension {
                extension,
                supported: Self::SUPPORTED_EXTENSIONS.join(", "),
            });
        }

        let contents = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let graph: SourceModelGraph =
            serde_json::from_str(&contents).map_err(|source| AnalysisError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            path = %path.display(),
            classes = graph.classes.len(),
            enums = graph.enums.len(),
            services = graph.services.len(),
            "Source model graph loaded."
        );
        Ok(graph)
    }
}
