//! Pipeline orchestration: analyze, translate, render, emit.
//!
//! ```text
//! Idle -> Analyzing -> Translating -> Dispatching -> Done
//!            |
//!            +-> Failed
//! ```
//!
//! Only analysis failures (or a panicked analysis/translation task) end in
//! `Failed`. Translation, render and emit failures are scoped to one model and
//! collected into the [`GenerationReport`]; sibling models are always
//! attempted.
//!
//! Analysis and translation are blocking work and run on tokio's blocking
//! pool, so `run` never stalls the async workers dispatching requests.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::{StreamExt, stream};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::emitter::Emitter;
use crate::error::{ModelFailure, PipelineError, TranslateError};
use crate::layout::{FileCategory, OutputLayout};
use crate::render::{self, Renderer, RetryPolicy};
use crate::request::GenerationRequest;
use crate::source::{SourceAnalyzer, SourceModel, SourceModelGraph};
use crate::translate::ModelTranslator;

/// Default number of requests in flight at once
const DEFAULT_CONCURRENCY: usize = 8;

/// Where a pipeline run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Not started.
    Idle,
    /// Waiting for the source analyzer.
    Analyzing,
    /// Translating models to requests.
    Translating,
    /// Rendering and emitting requests.
    Dispatching,
    /// Every model was attempted; see the report for per-model results.
    Done,
    /// Source analysis failed; nothing was translated.
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Analyzing => "analyzing",
            PipelineState::Translating => "translating",
            PipelineState::Dispatching => "dispatching",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tuning knobs for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Per-request retry budget.
    pub retry: RetryPolicy,
    /// Maximum number of requests rendered concurrently.
    pub concurrency: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Identity of one model in a run: its source name and output category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId {
    /// Source name of the model.
    pub name: String,
    /// Category of the file generated for it.
    pub category: FileCategory,
}

impl ModelId {
    /// Identity of a source model.
    pub fn of(model: &SourceModel) -> Self {
        let category = match model {
            SourceModel::Class(_) => FileCategory::Model,
            SourceModel::Enum(_) => FileCategory::Enum,
            SourceModel::Service(_) => FileCategory::Service,
        };
        Self {
            name: model.name().to_string(),
            category,
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}

/// What happened to one model.
#[derive(Debug)]
pub struct ModelOutcome {
    /// The model.
    pub model: ModelId,
    /// Path of the emitted file, or why there is none.
    pub result: Result<PathBuf, ModelFailure>,
}

/// Per-model results of one run, in declaration order.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// One outcome per model in the source graph.
    pub outcomes: Vec<ModelOutcome>,
}

impl GenerationReport {
    /// Whether every model was rendered and written.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    /// Models written to disk with their paths.
    pub fn succeeded(&self) -> impl Iterator<Item = (&ModelId, &Path)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.result {
            Ok(path) => Some((&outcome.model, path.as_path())),
            Err(_) => None,
        })
    }

    /// Models that failed with their failure.
    pub fn failures(&self) -> impl Iterator<Item = (&ModelId, &ModelFailure)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.result {
            Ok(_) => None,
            Err(failure) => Some((&outcome.model, failure)),
        })
    }
}

/// Translate every model of `graph` into a generation request.
///
/// Models are independent, so translation runs in parallel; results keep
/// declaration order (classes, then enums, then services).
///
/// Each output file belongs to exactly one model. When several models map to
/// the same path, the first in declaration order keeps it and the others fail
/// with [`TranslateError::OutputCollision`].
pub fn translate_graph(
    translator: &ModelTranslator,
    graph: SourceModelGraph,
) -> Vec<(ModelId, Result<GenerationRequest, TranslateError>)> {
    let translated: Vec<_> = graph
        .into_models()
        .par_iter()
        .map(|model| {
            let id = ModelId::of(model);
            let request = translator
                .translate(model)
                .and_then(|ast| GenerationRequest::build(ast, translator.layout()));
            (id, request)
        })
        .collect();

    let mut owners: HashMap<PathBuf, String> = HashMap::with_capacity(translated.len());
    translated
        .into_iter()
        .map(|(id, request)| {
            let request = request.and_then(|request| {
                match owners.entry(request.output_path.clone()) {
                    Entry::Occupied(owner) => Err(TranslateError::OutputCollision {
                        path: request.output_path,
                        existing: owner.get().clone(),
                    }),
                    Entry::Vacant(slot) => {
                        slot.insert(id.name.clone());
                        Ok(request)
                    }
                }
            });
            (id, request)
        })
        .collect()
}

/// Drives one source input through analysis, translation, rendering and
/// emission.
///
/// The renderer is owned for the pipeline's lifetime, so an `HttpRenderer`
/// reuses its connections across every request of a run.
#[derive(Debug)]
pub struct Pipeline<A, R, E> {
    analyzer: Arc<A>,
    translator: Arc<ModelTranslator>,
    renderer: R,
    emitter: E,
    options: PipelineOptions,
    state: PipelineState,
}

impl<A, R, E> Pipeline<A, R, E>
where
    A: SourceAnalyzer + Send + Sync + 'static,
    R: Renderer,
    E: Emitter,
{
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        analyzer: A,
        translator: ModelTranslator,
        renderer: R,
        emitter: E,
        options: PipelineOptions,
    ) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            translator: Arc::new(translator),
            renderer,
            emitter,
            options,
            state: PipelineState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The layout files are written to.
    pub fn layout(&self) -> &OutputLayout {
        self.translator.layout()
    }

    /// Run the pipeline over `source`.
    ///
    /// Returns `Err` only when analysis fails or a blocking task panics.
    /// Otherwise the report holds one outcome per model; check
    /// [`GenerationReport::is_complete`].
    pub async fn run(&mut self, source: &Path) -> Result<GenerationReport, PipelineError> {
        self.transition(PipelineState::Analyzing);
        let analyzer = Arc::clone(&self.analyzer);
        let source = source.to_path_buf();
        let graph = match tokio::task::spawn_blocking(move || analyzer.analyze(&source)).await {
            Ok(Ok(graph)) => graph,
            Ok(Err(err)) => return Err(self.fail(err.into())),
            Err(err) => return Err(self.fail(err.into())),
        };

        self.transition(PipelineState::Translating);
        let total = graph.len();
        let translator = Arc::clone(&self.translator);
        let translated =
            match tokio::task::spawn_blocking(move || translate_graph(&translator, graph)).await {
                Ok(translated) => translated,
                Err(err) => return Err(self.fail(err.into())),
            };

        self.transition(PipelineState::Dispatching);
        let renderer = &self.renderer;
        let emitter = &self.emitter;
        let layout = self.translator.layout();
        let policy = &self.options.retry;

        let outcomes: Vec<ModelOutcome> = stream::iter(translated)
            .map(|(model, request)| async move {
                let result = match request {
                    Ok(request) => {
                        dispatch_one(renderer, emitter, layout, policy, &model, &request).await
                    }
                    Err(err) => Err(ModelFailure::Translate(err)),
                };
                if let Err(failure) = &result {
                    warn!(model = %model, error = %failure, "Model failed.");
                }
                ModelOutcome { model, result }
            })
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await;

        let report = GenerationReport { outcomes };
        let failed = report.failures().count();
        info!(
            total,
            succeeded = total - failed,
            failed,
            "Generation finished."
        );
        self.transition(PipelineState::Done);
        Ok(report)
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(from = %self.state, to = %next, "Pipeline state change.");
        self.state = next;
    }

    fn fail(&mut self, err: PipelineError) -> PipelineError {
        self.transition(PipelineState::Failed);
        err
    }
}

async fn dispatch_one<R: Renderer, E: Emitter>(
    renderer: &R,
    emitter: &E,
    layout: &OutputLayout,
    policy: &RetryPolicy,
    model: &ModelId,
    request: &GenerationRequest,
) -> Result<PathBuf, ModelFailure> {
    let text = render::dispatch(renderer, request, policy).await?;
    let path = emitter.emit(layout, &model.name, model.category, &text)?;
    Ok(path)
}
