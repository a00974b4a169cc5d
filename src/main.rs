// src/main.rs
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use earnings_digest::discovery::fetch::build_download_client;
use earnings_digest::discovery::{harvest, DocumentSource, FolderSource, LocalFetcher};
use earnings_digest::generate::GeminiClient;
use earnings_digest::pipeline::{self, Pipeline};
use earnings_digest::storage::ArtifactStore;
use earnings_digest::utils::{self, error::FetchError};
use earnings_digest::{AppError, Settings};

/// Earnings report digest: latest-report selection and AI summaries
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML settings file
    #[arg(short, long, global = true, default_value = "settings.toml")]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, summarize and tabulate the latest report of every company
    Run(WindowArgs),
    /// Show which report would be selected per company, without generating
    Plan(WindowArgs),
    /// Download PDFs linked from the configured investor-relations pages
    Harvest,
}

#[derive(ClapArgs, Debug)]
struct WindowArgs {
    /// First fiscal year to consider (inclusive)
    #[arg(long)]
    start_year: Option<u32>,

    /// Last fiscal year to consider (inclusive)
    #[arg(long)]
    end_year: Option<u32>,
}

impl WindowArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(start) = self.start_year {
            settings.start_year = start;
        }
        if let Some(end) = self.end_year {
            settings.end_year = end;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments and settings
    let args = Args::parse();
    tracing::info!("Starting earnings report processing: {:?}", args.command);
    let mut settings = Settings::load(&args.settings)?;

    match &args.command {
        Command::Run(window) => {
            window.apply(&mut settings);
            settings.warn_if_incomplete(&args.settings);
            run(&settings).await
        }
        Command::Plan(window) => {
            window.apply(&mut settings);
            print_plan(&settings)
        }
        Command::Harvest => harvest_all(&settings).await,
    }
}

async fn run(settings: &Settings) -> Result<(), AppError> {
    let source = FolderSource::new(settings.input_folders.clone());
    let documents = source.list()?;
    if documents.is_empty() {
        tracing::info!("No PDF files found in input folders: {:?}.", settings.input_folders);
        return Ok(());
    }
    tracing::info!("Discovered {} PDF files", documents.len());

    let fetcher = LocalFetcher::new()?;
    let generator = GeminiClient::from_settings(settings)?;
    let store = ArtifactStore::new(&settings.context_dir, &settings.output_dir);

    let report = Pipeline::new(&fetcher, &generator, &store)
        .run(&documents, settings.start_year, settings.end_year)
        .await;

    for outcome in &report.outcomes {
        if !outcome.errors.is_empty() {
            tracing::warn!("{} finished with errors: {:?}", outcome.company, outcome.errors);
        }
    }
    Ok(())
}

fn print_plan(settings: &Settings) -> Result<(), AppError> {
    let documents = FolderSource::new(settings.input_folders.clone()).list()?;
    let (index, selected) = pipeline::plan(&documents, settings.start_year, settings.end_year);

    println!(
        "{} documents discovered, {} companies in {}-{}",
        documents.len(),
        index.len(),
        settings.start_year,
        settings.end_year
    );
    for entry in index.companies() {
        let years: Vec<String> = entry
            .years
            .iter()
            .map(|(year, docs)| format!("{} ({})", year, docs.len()))
            .collect();
        println!("{}: {}", entry.company, years.join(", "));
        if let Some(report) = selected.iter().find(|s| s.company == entry.company) {
            println!("  latest: {} [{}]", report.document.raw_filename, report.year);
        }
    }
    Ok(())
}

async fn harvest_all(settings: &Settings) -> Result<(), AppError> {
    if settings.harvest.is_empty() {
        tracing::warn!("No [[harvest]] targets configured");
        return Ok(());
    }
    let client = build_download_client().map_err(FetchError::from)?;

    for target in &settings.harvest {
        match harvest::harvest_target(&client, target).await {
            Ok(stats) => tracing::info!(
                "{}: {} links, {} downloaded, {} already present, {} failed",
                target.company,
                stats.links,
                stats.downloaded,
                stats.already_present,
                stats.failed
            ),
            Err(e) => tracing::error!("Error during scraping {}: {}", target.url, e),
        }
    }
    Ok(())
}
