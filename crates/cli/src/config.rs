//! `typesync.toml` loading and command-line overrides.
//!
//! ```toml
//! source = "obj/models.json"
//! output = "src/app/generated"
//!
//! [layout]
//! models = "models"
//! enums = "enums"
//! services = "services"
//!
//! [types]
//! date = "string"
//!
//! [renderer]
//! kind = "http"
//! url = "http://localhost:8080"
//! timeout_secs = 10
//! max_attempts = 3
//! retry_delay_ms = 200
//! concurrency = 8
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, ValueEnum};
use serde::Deserialize;
use typesync_core::render::DEFAULT_RENDERER_URL;
use typesync_core::{
    DateMapping, FileCategory, HttpRendererConfig, OutputLayout, PipelineOptions, RetryPolicy,
    TypeMapperOptions,
};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "typesync.toml";
/// Output root used when neither the file nor the flags set one
const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Which renderer turns requests into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Remote rendering service.
    #[default]
    Http,
    /// In-process printer.
    Local,
}

/// Contents of `typesync.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Analyzer output to read.
    pub source: Option<PathBuf>,
    /// Root directory for generated files.
    pub output: Option<PathBuf>,
    /// Directory per file category.
    pub layout: LayoutSection,
    /// Type mapping settings.
    pub types: TypesSection,
    /// Renderer settings.
    pub renderer: RendererSection,
}

/// `[layout]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSection {
    /// Directory for model classes.
    pub models: Option<String>,
    /// Directory for enums.
    pub enums: Option<String>,
    /// Directory for services.
    pub services: Option<String>,
}

/// `[types]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypesSection {
    /// Representation of date/time primitives.
    pub date: DateMapping,
}

/// `[renderer]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererSection {
    /// Renderer to use.
    pub kind: Option<RendererKind>,
    /// Rendering service base URL.
    pub url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Attempts per request, including the first.
    pub max_attempts: Option<u32>,
    /// Delay between attempts in milliseconds.
    pub retry_delay_ms: Option<u64>,
    /// Requests in flight at once.
    pub concurrency: Option<usize>,
}

impl FileConfig {
    /// Parse a config document.
    pub fn parse(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| format!("Failed to parse config file: {err}"))
    }

    /// Load `path`. When `required` is false a missing file yields the
    /// defaults.
    pub fn load(path: &Path, required: bool) -> Result<Self, String> {
        if !required && !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read config file {}: {err}", path.display()))?;
        Self::parse(&contents)
    }
}

/// Flags shared by every command that reads a model graph.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to the config file. Defaults to ./typesync.toml when present"
    )]
    pub config: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "Analyzer output (JSON model graph)")]
    pub source: Option<PathBuf>,
    #[arg(long, value_name = "DIR", help = "Root directory for generated files")]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum, help = "Renderer to use")]
    pub renderer: Option<RendererKind>,
    #[arg(long = "renderer-url", value_name = "URL", help = "Rendering service base URL")]
    pub renderer_url: Option<String>,
}

/// Fully resolved run settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Analyzer output to read.
    pub source: PathBuf,
    /// Output layout.
    pub layout: OutputLayout,
    /// Type mapping settings.
    pub types: TypeMapperOptions,
    /// Renderer to use.
    pub renderer: RendererKind,
    /// Rendering service connection.
    pub http: HttpRendererConfig,
    /// Retry and concurrency settings.
    pub pipeline: PipelineOptions,
}

impl ConfigArgs {
    /// Load the config file these flags point at and apply the overrides.
    pub fn resolve(&self) -> Result<Settings, String> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path, true)?,
            None => FileConfig::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
        };
        self.apply(file)
    }

    /// Merge flags over `file`; flags win, defaults fill the gaps.
    pub fn apply(&self, file: FileConfig) -> Result<Settings, String> {
        let source = self.source.clone().or(file.source).ok_or_else(|| {
            format!("No source given. Pass --source or set `source` in {DEFAULT_CONFIG_FILE}")
        })?;
        let output = self
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let mut layout = OutputLayout::new(output);
        let directories = [
            (FileCategory::Model, file.layout.models),
            (FileCategory::Enum, file.layout.enums),
            (FileCategory::Service, file.layout.services),
        ];
        for (category, directory) in directories {
            if let Some(directory) = directory {
                if directory.trim().is_empty() {
                    return Err(format!("Empty directory configured for {category} files"));
                }
                layout = layout.with_directory(category, directory);
            }
        }

        let section = file.renderer;
        let defaults = PipelineOptions::default();
        let retry = RetryPolicy {
            max_attempts: section.max_attempts.unwrap_or(defaults.retry.max_attempts),
            timeout: section
                .timeout_secs
                .map_or(defaults.retry.timeout, Duration::from_secs),
            retry_delay: section
                .retry_delay_ms
                .map_or(defaults.retry.retry_delay, Duration::from_millis),
        };
        if retry.max_attempts == 0 {
            return Err("renderer.max_attempts must be at least 1".to_string());
        }
        let concurrency = section.concurrency.unwrap_or(defaults.concurrency);
        if concurrency == 0 {
            return Err("renderer.concurrency must be at least 1".to_string());
        }

        let base_url = self
            .renderer_url
            .clone()
            .or(section.url)
            .unwrap_or_else(|| DEFAULT_RENDERER_URL.to_string());

        Ok(Settings {
            source,
            layout,
            types: TypeMapperOptions {
                date: file.types.date,
            },
            renderer: self.renderer.or(section.kind).unwrap_or_default(),
            http: HttpRendererConfig {
                base_url,
                timeout: retry.timeout,
            },
            pipeline: PipelineOptions { retry, concurrency },
        })
    }
}
