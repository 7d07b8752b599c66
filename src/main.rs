use anyhow::{Context, Result};
use cdr_recording_sync::{
    Config, MySqlCdrSource, PathResolver, QueryMode, RecordingSource, S3ObjectStore,
    SyncOrchestrator, Uploader,
};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Command {
    /// Every CDR row
    All,
    /// Calls from today
    Date,
    /// Calls from --date until now
    From,
}

#[derive(Parser)]
#[command(name = "cdr-sync")]
#[command(about = "Upload call recordings referenced in the CDR to S3")]
struct Args {
    /// Which CDR rows to sync
    #[arg(short, long, value_enum, default_value = "all")]
    command: Command,

    /// First day to sync with `--command from` (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Config file, without extension
    #[arg(long, default_value = "config/cdr-sync")]
    config: String,

    /// Recordings uploaded at once (overrides sync.concurrency)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Print the full report as JSON instead of one URL per line
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn query_mode(&self) -> Result<QueryMode> {
        Ok(match self.command {
            Command::All => QueryMode::All,
            Command::Date => QueryMode::Today,
            Command::From => QueryMode::From(
                self.date
                    .context("--date is required with --command from")?,
            ),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the URLs, logs go to stderr
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mode = args.query_mode()?;
    let cfg = Config::load(&args.config)?;

    info!("{} starting for office {}", cfg.service.name, cfg.office);

    let resolver = PathResolver::new(cfg.office_paths()?);
    let store = S3ObjectStore::connect(&cfg.storage)
        .await
        .context("Failed to create S3 client")?;
    let uploader = Uploader::new(Arc::new(store), cfg.metadata_tag());
    let orchestrator = SyncOrchestrator::new(resolver, uploader, cfg.storage.region.clone())
        .with_concurrency(args.concurrency.unwrap_or(cfg.sync.concurrency));

    let source = MySqlCdrSource::connect(&cfg.database, cfg.office.clone()).await?;
    let references = source
        .fetch(mode)
        .await
        .context("Failed to get data from database")?;

    let report = orchestrator.run(references).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for url in report.urls() {
            println!("{}", url);
        }
    }

    Ok(())
}
