use anyhow::{Context, Result};
use scraper::Html;
use std::time::Duration;

use crate::config::SiteConfig;
use crate::error::StructureError;
use crate::models::AnimeRef;
use crate::selectors::CompiledSelectors;

/// Anime references read from the index page
#[derive(Debug, Default)]
pub struct IndexListing {
    pub anime: Vec<AnimeRef>,
    pub anomalies: Vec<StructureError>,
}

/// Plain HTTP client for the index listing
pub struct PageFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl PageFetcher {
    pub fn new(site: &SiteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(site.request_timeout_secs))
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            user_agent: site.user_agent.clone(),
        })
    }

    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error {} for {}", response.status(), url);
        }

        response.text().await.context("Failed to read response body")
    }

    pub async fn fetch_index(&self, url: &str, selectors: &CompiledSelectors) -> Result<IndexListing> {
        log::info!("Fetching anime index: {}", url);
        let html = self.fetch_page(url).await?;
        Ok(parse_index(&html, selectors))
    }
}

pub fn parse_index(html: &str, selectors: &CompiledSelectors) -> IndexListing {
    let document = Html::parse_document(html);
    let mut listing = IndexListing::default();

    for (index, entry) in document.select(&selectors.index_entry).enumerate() {
        let link = match entry.select(&selectors.index_link).next() {
            Some(link) => link,
            None => {
                listing.anomalies.push(StructureError::IndexLinkMissing { index });
                continue;
            }
        };

        let href = match link.value().attr("href") {
            Some(href) => href.to_string(),
            None => {
                listing.anomalies.push(StructureError::IndexLinkMissing { index });
                continue;
            }
        };

        let title = match link.select(&selectors.index_title).next() {
            Some(span) => span.text().collect::<String>().trim().to_string(),
            None => {
                listing.anomalies.push(StructureError::IndexTitleMissing { index });
                continue;
            }
        };

        listing.anime.push(AnimeRef { href, title });
    }

    listing
}
