use clap::Args;
use typesync_core::{
    GenerationRequest, JsonGraphAnalyzer, ModelTranslator, SourceAnalyzer, TypeMapper,
    translate_graph,
};

use crate::cli::{resolve_or_exit, run_cli_async};
use crate::config::{ConfigArgs, Settings};

#[derive(Args, Debug, Clone)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub async fn run(args: TranslateArgs) -> i32 {
    let settings = match resolve_or_exit(&args.config) {
        Ok(settings) => settings,
        Err(code) => return code,
    };
    run_cli_async(|| async move { run_inner(settings) }).await
}

/// Print the generation requests of every model as one JSON array.
fn run_inner(settings: Settings) -> Result<(), String> {
    let graph = JsonGraphAnalyzer
        .analyze(&settings.source)
        .map_err(|err| err.to_string())?;
    let translator = ModelTranslator::new(TypeMapper::new(settings.types), settings.layout);

    let mut requests: Vec<GenerationRequest> = Vec::new();
    let mut failed = 0usize;
    for (model, result) in translate_graph(&translator, graph) {
        match result {
            Ok(request) => requests.push(request),
            Err(err) => {
                failed += 1;
                eprintln!("  failed {model}: {err}");
            }
        }
    }

    let json = serde_json::to_string_pretty(&requests)
        .map_err(|err| format!("Failed to serialize generation requests: {err}"))?;
    println!("{json}");

    if failed > 0 {
        return Err(format!("{failed} models failed to translate"));
    }
    Ok(())
}
