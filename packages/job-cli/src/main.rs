//! `jobs`: operate the job feed from a terminal.
//!
//! Fetches from the remote feed into a local SQLite database and prints the
//! reconciled listings.

mod config;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use job_sync::{HttpSource, JobFeed, JobId, LoadOutcome, SqliteStore, SyncConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;

type Feed = JobFeed<HttpSource, SqliteStore>;

#[derive(Parser)]
#[command(name = "jobs")]
#[command(about = "Fetch, browse and bookmark job listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the first page and print the stored feed
    Feed,

    /// Load the first page, then up to N more
    More {
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Print bookmarked jobs
    Bookmarks,

    /// Print one stored job in detail
    Show { id: i64 },

    /// Flip the bookmark on a stored job
    Toggle { id: i64 },

    /// Print stored jobs without fetching
    Stored,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,job_sync=debug,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let feed = build_feed(&config).await?;

    match cli.command {
        Commands::Feed => cmd_feed(&feed).await,
        Commands::More { pages } => cmd_more(&feed, pages).await,
        Commands::Bookmarks => cmd_bookmarks(&feed).await,
        Commands::Show { id } => cmd_show(&feed, id).await,
        Commands::Toggle { id } => cmd_toggle(&feed, id).await,
        Commands::Stored => cmd_stored(&feed).await,
    }
}

async fn build_feed(config: &Config) -> Result<Feed> {
    let source = HttpSource::new(&config.api_base_url, config.api_timeout)
        .context("Failed to create jobs API client")?;
    let store = SqliteStore::new(&config.database_url)
        .await
        .with_context(|| format!("Failed to open job database at {}", config.database_url))?;

    tracing::debug!(
        api = %config.api_base_url,
        database = %config.database_url,
        policy = ?config.failed_page_policy,
        "Job feed configured"
    );

    Ok(JobFeed::with_config(
        source,
        store,
        SyncConfig::new().with_failed_page_policy(config.failed_page_policy),
    ))
}

/// Print what a step produced. Returns false when the step failed remotely.
fn report(outcome: LoadOutcome) -> bool {
    match outcome {
        LoadOutcome::Skipped => true,
        LoadOutcome::Loaded(jobs) => {
            render::print_jobs(&jobs);
            true
        }
        LoadOutcome::Failed { jobs, error } => {
            eprintln!("Fetch failed: {error}");
            if !jobs.is_empty() {
                eprintln!("Showing {} stored jobs", jobs.len());
                render::print_jobs(&jobs);
            }
            false
        }
    }
}

async fn cmd_feed(feed: &Feed) -> Result<()> {
    report(feed.load_first().await.context("Failed to load first page")?);
    Ok(())
}

async fn cmd_more(feed: &Feed, pages: u32) -> Result<()> {
    if !report(feed.load_first().await.context("Failed to load first page")?) {
        return Ok(());
    }

    for _ in 0..pages {
        if !feed.can_load_more() {
            println!("No more jobs");
            break;
        }
        let outcome = feed.load_more().await.context("Failed to load more jobs")?;
        if !report(outcome) {
            break;
        }
    }
    Ok(())
}

async fn cmd_bookmarks(feed: &Feed) -> Result<()> {
    let jobs = feed.bookmarked().await.context("Failed to read bookmarks")?;
    if jobs.is_empty() {
        println!("No bookmarked jobs");
    }
    render::print_jobs(&jobs);
    Ok(())
}

async fn cmd_show(feed: &Feed, id: i64) -> Result<()> {
    match feed.job(JobId::new(id)).await.context("Failed to read job")? {
        Some(job) => render::print_job_detail(&job),
        None => println!("Job {id} is not stored"),
    }
    Ok(())
}

async fn cmd_toggle(feed: &Feed, id: i64) -> Result<()> {
    match feed
        .toggle_bookmark(JobId::new(id))
        .await
        .context("Failed to toggle bookmark")?
    {
        Some(true) => println!("Bookmarked job {id}"),
        Some(false) => println!("Removed bookmark from job {id}"),
        None => println!("Job {id} is not stored"),
    }
    Ok(())
}

async fn cmd_stored(feed: &Feed) -> Result<()> {
    render::print_jobs(&feed.stored().await.context("Failed to read stored jobs")?);
    Ok(())
}
