//! `typesync`: generate TypeScript models, enums and services from an
//! analyzed C# model graph.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod cli;
mod config;

/// Crates whose events `TYPESYNC_LOG=<level>` applies to
const LOG_TARGETS: [&str; 2] = ["typesync", "typesync_core"];

#[derive(Parser, Debug)]
#[command(
    name = "typesync",
    version,
    about = "Generate TypeScript from analyzed C# models"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate, render and write every model
    Generate(cli::generate::GenerateArgs),
    /// Print the generation requests as JSON without rendering
    Translate(cli::translate::TranslateArgs),
}

fn main() {
    init_tracing();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to create tokio runtime: {err}");
            std::process::exit(cli::FAILURE_EXIT_CODE);
        }
    };

    let code = runtime.block_on(run_cli_async(std::env::args().collect()));
    std::process::exit(code);
}

async fn run_cli_async(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => cli::generate::run(args).await,
            Some(Commands::Translate(args)) => cli::translate::run(args).await,
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn init_tracing() {
    // TYPESYNC_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "typesync_core=debug,reqwest=warn"
    let filter = match std::env::var("TYPESYNC_LOG") {
        Ok(level) if is_plain_level(&level) => scoped_filter(&level),
        Ok(spec) => spec,
        Err(_) => scoped_filter("info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn scoped_filter(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
