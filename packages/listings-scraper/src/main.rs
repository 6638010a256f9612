// Entry point for the listings scraper CLI

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use listings_scraper::{
    HttpFetcher, LinkPolicy, PageCountMode, ScrapeOrchestrator, ScraperConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "listings-scraper")]
#[command(about = "Scrape paginated job listings into a JSON file")]
#[command(version)]
struct Cli {
    /// How to find the number of pages
    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Scrape exactly this many pages (skips detection and prompting)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pages: Option<u32>,

    /// Output file (default: job_listings.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Query parameter carrying the page number
    #[arg(long)]
    page_param: Option<String>,

    /// Listing search URL to start from
    #[arg(long)]
    base_url: Option<String>,

    /// Resolve job links against the site origin instead of concatenating
    #[arg(long)]
    resolve_links: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Read the page count from the first page's pagination
    Auto,
    /// Ask for the page count on the terminal
    Prompt,
}

fn build_config(cli: Cli) -> Result<ScraperConfig> {
    let preset = match cli.mode {
        Mode::Auto => ScraperConfig::auto_pagination(),
        Mode::Prompt => ScraperConfig::manual_pagination(),
    };
    let mut config = preset.apply_env().context("Failed to load configuration")?;

    if let Some(pages) = cli.pages {
        config.page_count = PageCountMode::Fixed(pages);
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if let Some(param) = cli.page_param {
        config.page_param = param;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if cli.resolve_links {
        config.link_policy = LinkPolicy::Resolve;
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(cli)?;
    tracing::debug!(?config, "Configuration loaded");

    let fetcher = HttpFetcher::new(&config).context("Failed to create page fetcher")?;
    let summary = ScrapeOrchestrator::new(config, fetcher)
        .run()
        .await
        .context("Scrape failed")?;

    tracing::info!(
        pages = summary.pages_scraped,
        records = summary.records,
        output = %summary.output_path.display(),
        "Scrape complete"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,listings_scraper=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
