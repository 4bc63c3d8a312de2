use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::io::Write;

use crate::browser::BrowserSession;
use crate::config::ScraperConfig;
use crate::error::StructureError;
use crate::expander::{expand_all, ExpandPolicy};
use crate::extractor::ReleaseExtractor;
use crate::fetcher::PageFetcher;
use crate::models::AnimeRef;
use crate::output::RecordWriter;
use crate::selectors::CompiledSelectors;
use crate::utils::detail_url;

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeSummary {
    pub start_time: String,
    pub end_time: String,
    pub anime_listed: usize,
    pub anime_visited: usize,
    pub records_written: usize,
    pub total_clicks: usize,
    pub anomalies: Vec<String>,
}

pub struct EraiScraper<S: BrowserSession> {
    config: ScraperConfig,
    fetcher: PageFetcher,
    session: S,
    selectors: CompiledSelectors,
    extractor: ReleaseExtractor,
    policy: ExpandPolicy,
}

impl<S: BrowserSession> EraiScraper<S> {
    pub fn new(config: ScraperConfig, session: S) -> Result<Self> {
        let selectors = CompiledSelectors::compile(&config.selectors)?;
        let fetcher = PageFetcher::new(&config.site)?;
        let extractor = ReleaseExtractor::new(selectors.clone());
        let policy = ExpandPolicy::from_settings(&config.browser);

        Ok(Self {
            config,
            fetcher,
            session,
            selectors,
            extractor,
            policy,
        })
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    /// Index fetch, then expand and extract every selected anime in turn
    pub async fn run<W: Write>(&mut self, writer: &mut RecordWriter<W>) -> Result<ScrapeSummary> {
        let start_time = Local::now().to_rfc3339();
        let mut anomalies = Vec::new();

        let listing = self
            .fetcher
            .fetch_index(&self.config.site.listing_url, &self.selectors)
            .await?;
        self.record_anomalies(listing.anomalies, &mut anomalies)?;

        let anime_listed = listing.anime.len();
        let selected = self.select(listing.anime);
        log::info!("{} anime listed, {} selected", anime_listed, selected.len());

        let mut anime_visited = 0;
        let mut total_clicks = 0;

        for (index, anime) in selected.iter().enumerate() {
            let url = detail_url(&self.config.site.detail_base_url, &anime.href);
            log::info!("[{}/{}] {}", index + 1, selected.len(), anime.title);

            self.session
                .navigate(&url)
                .await
                .with_context(|| format!("Failed to open detail page for {}", anime.title))?;

            let clicks = expand_all(
                &mut self.session,
                &self.config.browser.load_more_classes,
                &self.policy,
            )
            .await
            .with_context(|| format!("Failed to expand detail page for {}", anime.title))?;
            total_clicks += clicks;

            let html = self.session.page_source().await?;
            let extraction = self.extractor.extract(&html, &anime.title);
            log::debug!(
                "{}: {} clicks, {} releases",
                anime.title,
                clicks,
                extraction.records.len()
            );

            // Strict runs must fail before any record of a malformed page is emitted
            self.record_anomalies(extraction.anomalies, &mut anomalies)?;
            for record in &extraction.records {
                writer.write(record)?;
            }

            anime_visited += 1;
        }

        Ok(ScrapeSummary {
            start_time,
            end_time: Local::now().to_rfc3339(),
            anime_listed,
            anime_visited,
            records_written: writer.written(),
            total_clicks,
            anomalies,
        })
    }

    fn select(&self, anime: Vec<AnimeRef>) -> Vec<AnimeRef> {
        let filter = self
            .config
            .run
            .title_filter
            .as_ref()
            .map(|f| f.to_lowercase());

        let matching = anime.into_iter().filter(|a| match &filter {
            Some(f) => a.title.to_lowercase().contains(f),
            None => true,
        });

        match self.config.run.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }

    fn record_anomalies(&self, found: Vec<StructureError>, seen: &mut Vec<String>) -> Result<()> {
        for anomaly in found {
            if self.config.run.strict {
                return Err(anomaly).context("Unexpected page structure");
            }
            log::warn!("Skipping malformed markup: {}", anomaly);
            seen.push(anomaly.to_string());
        }
        Ok(())
    }
}
