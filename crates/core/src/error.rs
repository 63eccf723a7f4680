//! Error taxonomy for the generation pipeline.
//!
//! Only [`PipelineError`] is fatal for a run. Every other error is scoped to a
//! single model and collected into the [`GenerationReport`](crate::GenerationReport).

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure to produce the source model graph. Aborts the whole run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input path does not carry one of the supported extensions.
    #[error("Unsupported path extension - {extension}. Supported extensions: {supported}")]
    UnsupportedExtension {
        /// Extension found on the input path (empty when absent).
        extension: String,
        /// Comma separated list of accepted extensions.
        supported: String,
    },
    /// The input could not be read.
    #[error("Failed to read source input {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The input was read but is not a valid model graph.
    #[error("Malformed model graph {}: {source}", path.display())]
    Malformed {
        /// Path of the malformed document.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// An identifier that cannot be used in the generated code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// Case conversion is undefined for the empty identifier.
    #[error("cannot convert an empty identifier")]
    EmptyIdentifier,
    /// The name is not a valid TypeScript identifier.
    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),
    /// The name is a TypeScript reserved word.
    #[error("'{0}' is a reserved word")]
    ReservedWord(String),
    /// Two source names convert to the same target name.
    #[error("'{first}' and '{second}' both convert to '{converted}'")]
    Collision {
        /// Name that claimed the converted name first.
        first: String,
        /// Name that collided with it.
        second: String,
        /// The shared converted name.
        converted: String,
    },
}

/// Failure to compute the import for a referenced type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportResolutionError {
    /// The referenced type name cannot be turned into a module path.
    #[error("invalid referenced type name '{0}'")]
    InvalidName(String),
    /// The output layout has no directory for the dependency's category.
    #[error("no output directory configured for {0} files")]
    MissingDirectory(&'static str),
}

/// Failure to translate one source model. Aborts only that model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// A source type kind has no mapping and no decomposition applies.
    #[error("unsupported type kind '{kind}'")]
    UnsupportedTypeKind {
        /// Description of the offending source type.
        kind: String,
    },
    /// A referenced type could not be resolved to an import.
    #[error(transparent)]
    ImportResolution(#[from] ImportResolutionError),
    /// An identifier could not be converted to target casing.
    #[error(transparent)]
    Naming(#[from] NamingError),
    /// Another model of the run is generated to the same file.
    #[error("output file {} is already generated for '{existing}'", path.display())]
    OutputCollision {
        /// The contested output path.
        path: PathBuf,
        /// Model that claimed the path first.
        existing: String,
    },
}

/// Failure to dispatch a generation request to the renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The request could not be sent or the response could not be read.
    #[error("renderer request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The renderer did not answer within the per-request timeout.
    #[error("renderer request timed out after {0} ms")]
    Timeout(u128),
    /// The renderer answered with a non-success status.
    #[error("renderer responded with status {status}")]
    Status {
        /// Response status code.
        status: StatusCode,
        /// Response body, possibly empty.
        body: String,
    },
    /// The renderer answered with success but no content.
    #[error("renderer returned an empty response")]
    EmptyResponse,
    /// The request could not be serialized.
    #[error("failed to serialize generation request: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl RenderError {
    /// Whether a retry may succeed where this attempt failed.
    pub fn is_transient(&self) -> bool {
        match self {
            RenderError::Transport(_) | RenderError::Timeout(_) => true,
            RenderError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            RenderError::EmptyResponse | RenderError::Serialize(_) => false,
        }
    }
}

/// Failure to write one rendered file.
#[derive(Debug, Error)]
#[error("Failed to write {}: {source}", path.display())]
pub struct EmitError {
    /// Destination path.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// Why one model did not make it to disk.
#[derive(Debug, Error)]
pub enum ModelFailure {
    /// Translation to the TypeScript AST failed.
    #[error("translation failed: {0}")]
    Translate(#[from] TranslateError),
    /// The renderer did not produce text after all attempts.
    #[error("render dispatch failed: {0}")]
    Render(#[from] RenderError),
    /// Writing the rendered text failed.
    #[error("emit failed: {0}")]
    Emit(#[from] EmitError),
}

/// Fatal pipeline failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source analysis failed; nothing was translated.
    #[error("Source analysis error: {0}")]
    Analysis(#[from] AnalysisError),
    /// A blocking stage of the run panicked or was cancelled.
    #[error("Pipeline task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
