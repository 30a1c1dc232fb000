//! wardrobe-og - Outfit Generator command-line front end
//!
//! Reads an inventory (JSON array of items) and a generation context (JSON
//! object), runs one generation and prints the report, or the structured
//! failure, as JSON on stdout. Logs go to stderr or the configured file.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Instrument};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use wardrobe_common::models::{inventory_from_json, GenerationContext};
use wardrobe_common::{EngineConfig, LoggingConfig};
use wardrobe_og::{FailureReport, GenerationError, GenerationReport, OutfitEngine};

/// Command-line arguments for wardrobe-og
#[derive(Parser, Debug)]
#[command(name = "wardrobe-og")]
#[command(about = "Compose an outfit from a wardrobe inventory")]
#[command(version)]
struct Args {
    /// Inventory file (JSON array of clothing items)
    #[arg(short, long)]
    inventory: PathBuf,

    /// Generation context file (JSON)
    #[arg(short, long)]
    context: PathBuf,

    /// Engine configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cancel generation after this many milliseconds
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = EngineConfig::resolve(args.config.as_deref())
        .context("Failed to load engine configuration")?;
    init_tracing(&config.logging)?;

    info!(
        "Starting wardrobe-og v{} (items {}-{}, timeout {} ms)",
        env!("CARGO_PKG_VERSION"),
        config.min_items,
        config.max_items,
        args.timeout_ms
    );

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate", %request_id);
    let outcome = run(&args, config).instrument(span).await?;

    let pretty = args.pretty;
    match outcome {
        Ok(report) => {
            for line in report.explanation.summary_lines() {
                info!("{}", line);
            }
            print_json(&report, pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("Generation failed: {}", err);
            print_json(&FailureReport::from(&err), pretty)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Load inputs and run the engine on a blocking thread under the timeout
async fn run(
    args: &Args,
    config: EngineConfig,
) -> Result<Result<GenerationReport, GenerationError>> {
    let inventory_json = tokio::fs::read_to_string(&args.inventory)
        .await
        .with_context(|| format!("Failed to read inventory {}", args.inventory.display()))?;
    let context_json = tokio::fs::read_to_string(&args.context)
        .await
        .with_context(|| format!("Failed to read context {}", args.context.display()))?;

    let inventory = inventory_from_json(&inventory_json).context("Failed to parse inventory JSON")?;
    let context = GenerationContext::from_json(&context_json).context("Failed to parse context JSON")?;
    info!(
        "Loaded {} items for occasion '{}'",
        inventory.len(),
        context.occasion
    );

    let engine = Arc::new(OutfitEngine::new(config));
    let token = CancellationToken::new();

    let mut task = tokio::task::spawn_blocking({
        let engine = Arc::clone(&engine);
        let token = token.clone();
        let span = tracing::Span::current();
        move || span.in_scope(|| engine.generate(&inventory, &context, &token))
    });

    let timeout = Duration::from_millis(args.timeout_ms);
    let outcome = match tokio::time::timeout(timeout, &mut task).await {
        Ok(joined) => joined.context("Generation task panicked")?,
        Err(_) => {
            warn!("Generation exceeded {} ms, cancelling", args.timeout_ms);
            token.cancel();
            task.await.context("Generation task panicked")?
        }
    };
    Ok(outcome)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
