use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use luma_scraper::app::ports::RenderMode;
use luma_scraper::assembler::{EventAssembler, ScrapeSource};
use luma_scraper::config::ScraperConfig;
use luma_scraper::export;
use luma_scraper::infra::build_renderer;
use luma_scraper::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "luma-scraper")]
#[command(about = "Event data scraper for the lu.ma platform")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Comma-separated keywords to filter events
    #[arg(long, global = true, value_delimiter = ',')]
    keywords: Vec<String>,

    /// Skip the full page renderer and fetch over plain HTTP
    #[arg(long, global = true)]
    lightweight: bool,

    /// Override the maximum "load more" attempts per listing page
    #[arg(long, global = true)]
    max_scrolls: Option<u32>,

    /// Override the per-fetch timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Output format for results
    #[arg(long, global = true, value_enum, default_value = "both")]
    format: OutputFormat,

    /// Prefix for output filenames
    #[arg(long, global = true, default_value = "luma_events")]
    output_prefix: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the global explore feed
    Explore,
    /// Scrape a named collection (e.g. web3, hackathon)
    Slug { slug: String },
    /// Scrape a city feed (e.g. new-delhi, mumbai)
    City { city: String },
    /// Scrape a single event page
    Url { url: String },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Both,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let mut config = ScraperConfig::load_or_default();
    if let Some(max_scrolls) = cli.max_scrolls {
        config.scroll_max_attempts = max_scrolls;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.fetch_timeout_secs = timeout_secs;
    }

    let mode = if cli.lightweight {
        RenderMode::Lightweight
    } else {
        RenderMode::Full
    };
    let renderer = build_renderer(mode, &config)?;
    let assembler = EventAssembler::new(renderer, &config);

    let source = match &cli.command {
        Commands::Explore => ScrapeSource::Explore,
        Commands::Slug { slug } => ScrapeSource::Slug(slug.clone()),
        Commands::City { city } => ScrapeSource::City(city.clone()),
        Commands::Url { url } => ScrapeSource::Url(url.clone()),
    };

    let keywords: Vec<String> = cli
        .keywords
        .iter()
        .map(|keyword| keyword.trim().to_string())
        .filter(|keyword| !keyword.is_empty())
        .collect();
    let keyword_filter = if keywords.is_empty() {
        None
    } else {
        Some(keywords.as_slice())
    };

    println!("🕷️  Scraping {source}...");
    let events = assembler.scrape(&source, keyword_filter).await?;

    if events.is_empty() {
        println!("⚠️  No events found matching the criteria");
        return Ok(());
    }
    info!(count = events.len(), "scrape complete");

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    if matches!(cli.format, OutputFormat::Json | OutputFormat::Both) {
        let path = PathBuf::from(format!("{}_{timestamp}.json", cli.output_prefix));
        export::write_json(&events, &path)?;
        println!("💾 JSON written to {}", path.display());
    }
    if matches!(cli.format, OutputFormat::Csv | OutputFormat::Both) {
        let path = PathBuf::from(format!("{}_{timestamp}.csv", cli.output_prefix));
        export::write_csv(&events, &path)?;
        println!("💾 CSV written to {}", path.display());
    }

    println!("\n📊 Scraped {} events. Sample:", events.len());
    for event in events.iter().take(3) {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    if events.len() > 3 {
        println!("... and {} more events", events.len() - 3);
    }

    Ok(())
}
