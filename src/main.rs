//! pixelhub-batch - batch operations against a PixelHub server
//!
//! Runs bulk tag generation, bulk save and bulk delete from the command line.

#![allow(missing_docs)]

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use pixelhub_batch::config::Config;
use pixelhub_batch::utils::{init_logging, truncate_string};
use pixelhub_batch::{
    BatchCoordinator, BatchProgress, BatchReport, GenerateParams, ImageService, ItemInput,
    PixelHubClient, TagMode, UploadedItem,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "pixelhub-batch", version)]
#[command(about = "Bulk tag generation, metadata edits and deletion for PixelHub")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "PIXELHUB_CONFIG")]
    config: Option<PathBuf>,

    /// Server base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Print reports as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every image id in the collection
    Ids,
    /// Generate AI tags for images
    Generate(GenerateArgs),
    /// Save descriptions and tags listed in a YAML file
    Save {
        /// YAML list of `{ image_id, description, tags, tag_mode }`
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete images
    Delete(Target),
}

#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
struct Target {
    /// Comma-separated image ids
    #[arg(long, value_delimiter = ',')]
    ids: Vec<String>,

    /// Every image in the collection
    #[arg(long)]
    all: bool,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    target: Target,

    /// Requests in flight at once (defaults to the configured value)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Prompt sent to the tagging model
    #[arg(long)]
    prompt: Option<String>,

    /// Delimiter between generated tags
    #[arg(long, default_value = "")]
    delimiter: String,

    /// How generated tags are applied on the server
    #[arg(long, default_value = "append")]
    mode: TagMode,
}

/// One entry of a save file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveEntry {
    image_id: String,
    #[serde(flatten)]
    input: ItemInput,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config(cli.config.as_deref(), cli.base_url.as_deref()).await?;
    init_logging(&config.logging)?;

    let client = PixelHubClient::new(config.client.clone())
        .context("failed to create PixelHub client")?
        .with_page_size(config.batch.page_size);
    let coordinator = BatchCoordinator::new(client, config.batch.clone());

    match cli.command {
        Command::Ids => {
            let ids = coordinator.service().list_all_item_ids().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ids)?);
            } else {
                ids.iter().for_each(|id| println!("{}", id));
            }
        }
        Command::Generate(args) => {
            let ids = resolve_target(&coordinator, &args.target).await?;
            let mut items: Vec<UploadedItem> = ids.into_iter().map(UploadedItem::new).collect();

            let mut params = GenerateParams::default()
                .with_concurrency(args.concurrency.unwrap_or(config.batch.default_concurrency))
                .with_delimiter(args.delimiter);
            if let Some(prompt) = args.prompt {
                params = params.with_prompt(prompt);
            }
            params.mode = args.mode;

            let progress = watch_progress(coordinator.subscribe_progress());
            let report = coordinator.run_bulk_generate(&mut items, &params).await;
            progress.abort();
            print_report("generate", &report?, cli.json)?;
        }
        Command::Save { file } => {
            let entries = read_save_file(&file).await?;
            let (mut items, inputs): (Vec<_>, Vec<_>) = entries
                .into_iter()
                .map(|entry| (UploadedItem::new(entry.image_id), entry.input))
                .unzip();

            let progress = watch_progress(coordinator.subscribe_progress());
            let report = coordinator.run_bulk_save(&mut items, &inputs).await;
            progress.abort();
            print_report("save", &report?, cli.json)?;
        }
        Command::Delete(target) => {
            coordinator.enter_delete_mode().await;
            if target.all {
                coordinator.select_all().await?;
            } else {
                coordinator.select_ids(&target.ids).await?;
            }
            info!("{} images selected", coordinator.selection_count().await);

            let report = coordinator.delete_selected().await;
            coordinator.cancel_delete_mode().await;
            print_report("delete", &report?, cli.json)?;
        }
    }

    Ok(())
}

/// File, then `PIXELHUB_*` environment, then command-line overrides
async fn load_config(path: Option<&Path>, base_url: Option<&str>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Config::default(),
    };
    config.apply_env()?;
    if let Some(base_url) = base_url {
        config.client.base_url = base_url.to_string();
    }
    config.validate()?;
    Ok(config)
}

async fn resolve_target<S: ImageService>(
    coordinator: &BatchCoordinator<S>,
    target: &Target,
) -> anyhow::Result<Vec<String>> {
    if target.all {
        return Ok(coordinator.service().list_all_item_ids().await?);
    }
    if target.ids.is_empty() {
        bail!("no image ids given");
    }
    Ok(target.ids.clone())
}

async fn read_save_file(path: &Path) -> anyhow::Result<Vec<SaveEntry>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let entries = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(entries)
}

fn watch_progress(mut progress: watch::Receiver<BatchProgress>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let current = *progress.borrow_and_update();
            if current.total > 0 {
                info!(
                    "Progress: {}/{} ({} failed)",
                    current.settled, current.total, current.failed
                );
            }
        }
    })
}

fn print_report<T: Serialize>(
    workflow: &str,
    report: &BatchReport<T>,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "{}: {} total, {} succeeded, {} failed",
        workflow,
        report.total(),
        report.succeeded(),
        report.failed()
    );
    for outcome in report.failures() {
        let message = outcome
            .error()
            .map(|error| truncate_string(&error.message, 120))
            .unwrap_or_default();
        println!(
            "  [{}] {}: {}",
            outcome.index,
            outcome.item_id.as_deref().unwrap_or("-"),
            message
        );
    }
    Ok(())
}
