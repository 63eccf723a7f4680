use std::path::Path;
use std::time::Instant;

use clap::Args;
use tracing::debug;
use typesync_core::{
    FsEmitter, GenerationReport, HttpRenderer, JsonGraphAnalyzer, LocalRenderer, ModelTranslator,
    Pipeline, PipelineOptions, Renderer, TypeMapper,
};

use crate::cli::{resolve_or_exit, run_cli_async};
use crate::config::{ConfigArgs, RendererKind, Settings};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub async fn run(args: GenerateArgs) -> i32 {
    let settings = match resolve_or_exit(&args.config) {
        Ok(settings) => settings,
        Err(code) => return code,
    };
    run_cli_async(|| run_inner(settings)).await
}

async fn run_inner(settings: Settings) -> Result<(), String> {
    let started = Instant::now();
    let Settings {
        source,
        layout,
        types,
        renderer,
        http,
        pipeline,
    } = settings;

    println!(
        "Generating TypeScript from {} into {}",
        source.display(),
        layout.root().display()
    );
    let translator = ModelTranslator::new(TypeMapper::new(types), layout);

    let report = match renderer {
        RendererKind::Http => {
            debug!(url = %http.base_url, "Using rendering service.");
            let renderer = HttpRenderer::new(&http)
                .map_err(|err| format!("Failed to create renderer client: {err}"))?;
            run_pipeline(translator, renderer, pipeline, &source).await?
        }
        RendererKind::Local => {
            debug!("Using in-process renderer.");
            run_pipeline(translator, LocalRenderer, pipeline, &source).await?
        }
    };

    print_report(&report);
    let failed = report.failures().count();
    if failed > 0 {
        return Err(format!(
            "{failed} of {} models failed",
            report.outcomes.len()
        ));
    }

    println!(
        "Generated {} files in {}ms",
        report.outcomes.len(),
        started.elapsed().as_millis()
    );
    Ok(())
}

async fn run_pipeline<R: Renderer>(
    translator: ModelTranslator,
    renderer: R,
    options: PipelineOptions,
    source: &Path,
) -> Result<GenerationReport, String> {
    let mut pipeline = Pipeline::new(JsonGraphAnalyzer, translator, renderer, FsEmitter, options);
    pipeline.run(source).await.map_err(|err| err.to_string())
}

fn print_report(report: &GenerationReport) {
    for (model, path) in report.succeeded() {
        println!("  wrote {model}: {}", path.display());
    }
    for (model, failure) in report.failures() {
        eprintln!("  failed {model}: {failure}");
    }
}
