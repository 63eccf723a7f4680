//! TypeScript code generation from analyzed C# model graphs.
//!
//! The pipeline is:
//! 1. Analyze: source input -> [`SourceModelGraph`] (external analyzer output)
//! 2. Translate: each [`SourceModel`] -> TypeScript AST ([`ClassAst`] / [`EnumAst`])
//! 3. Frame: AST + [`OutputLayout`] -> [`GenerationRequest`]
//! 4. Render: request -> source text (remote service or in-process printer)
//! 5. Emit: source text -> file on disk
//!
//! ## Module Structure
//!
//! - `naming`: identifier case conversion (property case, file case)
//! - `source`: source model graph and the analyzer seam
//! - `typescript`: TypeScript type/AST IR and the `Emit` printer
//! - `translate`: type mapping, import resolution and model translation
//! - `layout`: output directory table shared by imports, requests and files
//! - `request`: generation request framing and its JSON wire format
//! - `render`: renderer seam with HTTP and local implementations
//! - `emitter`: writing rendered text to disk
//! - `pipeline`: orchestration and per-model outcome reporting

pub mod emitter;
pub mod error;
pub mod layout;
pub mod naming;
pub mod pipeline;
pub mod render;
pub mod request;
pub mod source;
pub mod translate;
pub mod typescript;

pub use emitter::{Emitter, FsEmitter};
pub use error::{
    AnalysisError, EmitError, ImportResolutionError, ModelFailure, NamingError, PipelineError,
    RenderError, TranslateError,
};
pub use layout::{FileCategory, OutputLayout};
pub use pipeline::{
    GenerationReport, ModelId, ModelOutcome, Pipeline, PipelineOptions, PipelineState,
    translate_graph,
};
pub use render::{HttpRenderer, HttpRendererConfig, LocalRenderer, Renderer, RetryPolicy};
pub use request::{DataModel, GenerationRequest};
pub use source::{
    DependencyKind, HttpMethod, JsonGraphAnalyzer, SourceAnalyzer, SourceModel, SourceModelGraph,
    SourceType,
};
pub use translate::{DateMapping, ModelTranslator, TypeMapper, TypeMapperOptions};
pub use typescript::{ClassAst, EnumAst, Emit, TargetAst};
