use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;

use erai_scraper::{
    BrowserSession, ChromiumSession, EraiScraper, OutputFormat, RecordWriter, ScraperConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output format for release records
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Only scrape the first N anime
    #[arg(short, long)]
    limit: Option<usize>,

    /// Only scrape anime whose title contains this text (case-insensitive)
    #[arg(long)]
    filter: Option<String>,

    /// Chromium executable to drive
    #[arg(long)]
    chrome_path: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    headful: bool,

    /// Abort on unexpected page structure instead of skipping it
    #[arg(long)]
    strict: bool,
}

impl Args {
    fn apply(self, config: &mut ScraperConfig) {
        if let Some(format) = self.format {
            config.run.format = format;
        }
        if self.limit.is_some() {
            config.run.limit = self.limit;
        }
        if self.filter.is_some() {
            config.run.title_filter = self.filter;
        }
        if self.chrome_path.is_some() {
            config.browser.chrome_path = self.chrome_path;
        }
        if self.headful {
            config.browser.headless = false;
        }
        if self.strict {
            config.run.strict = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_level));

    let mut config = match &args.config {
        Some(path) => ScraperConfig::from_file(path)?,
        None => ScraperConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    log::info!("Starting erai-raws scraper");

    let session = ChromiumSession::launch(&config.browser)
        .await
        .context("Failed to start browser session")?;

    let format = config.run.format;
    let mut scraper = EraiScraper::new(config, session)?;
    let mut writer = RecordWriter::new(io::stdout().lock(), format);

    let result = scraper.run(&mut writer).await;

    if let Err(e) = scraper.session_mut().close().await {
        log::warn!("Browser did not shut down cleanly: {:#}", e);
    }

    let summary = result?;
    log::info!(
        "Scrape complete: {} of {} anime visited, {} releases, {} load-more clicks",
        summary.anime_visited,
        summary.anime_listed,
        summary.records_written,
        summary.total_clicks
    );
    log::debug!("Run summary: {}", serde_json::to_string(&summary)?);
    if !summary.anomalies.is_empty() {
        log::warn!("{} malformed entries skipped", summary.anomalies.len());
    }

    Ok(())
}
