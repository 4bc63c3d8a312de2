// Scraper configuration.
//
// Loaded from an optional TOML file. Every field has a default, so an empty
// file (or no file at all) reproduces the stock erai-raws behaviour.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::output::OutputFormat;
use crate::selectors::{CompiledSelectors, SiteSelectors};
use crate::utils::DEFAULT_USER_AGENT;

pub const DEFAULT_LISTING_URL: &str = "https://www.erai-raws.info/anime-list/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub site: SiteConfig,
    pub browser: BrowserSettings,
    pub selectors: SiteSelectors,
    pub run: RunConfig,
}

/// Where to fetch from and how to identify ourselves
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Index page listing every anime
    pub listing_url: String,

    /// Prefix the scraped detail hrefs are appended to
    pub detail_base_url: String,

    pub user_agent: String,

    pub request_timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            detail_base_url: DEFAULT_LISTING_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Browser automation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Chromium executable; autodetected when unset
    pub chrome_path: Option<PathBuf>,

    pub headless: bool,

    /// Pause after each load-more click
    pub settle_delay_ms: u64,

    /// Class names of the load-more controls, expanded in order
    pub load_more_classes: Vec<String>,

    /// Safety cap on clicks per control (unbounded when unset)
    pub max_clicks: Option<usize>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
            settle_delay_ms: 1500,
            load_more_classes: vec![
                "load_more_0".to_string(),
                "load_more_2".to_string(),
                "load_more_3".to_string(),
            ],
            max_clicks: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub format: OutputFormat,

    /// Stop after this many anime
    pub limit: Option<usize>,

    /// Case-insensitive substring an anime title must contain
    pub title_filter: Option<String>,

    /// Abort on the first structure anomaly instead of skipping it
    pub strict: bool,
}

impl ScraperConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ScraperConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Check URLs, user agent and selectors before any network work starts
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.site.listing_url)
            .with_context(|| format!("Invalid listing_url: {}", self.site.listing_url))?;
        Url::parse(&self.site.detail_base_url)
            .with_context(|| format!("Invalid detail_base_url: {}", self.site.detail_base_url))?;

        if self.site.user_agent.trim().is_empty() {
            anyhow::bail!("user_agent must not be empty");
        }

        for class_name in &self.browser.load_more_classes {
            if !is_plain_class_name(class_name) {
                anyhow::bail!(
                    "Invalid load_more class '{}': use a single class name of letters, digits, '-' or '_'",
                    class_name
                );
            }
        }

        if self.browser.max_clicks == Some(0) {
            anyhow::bail!("max_clicks must be at least 1 when set");
        }

        CompiledSelectors::compile(&self.selectors).context("Invalid selector configuration")?;

        Ok(())
    }
}

/// Class names are turned into `.class` selectors, so anything beyond a bare
/// identifier would change what the selector matches.
fn is_plain_class_name(class_name: &str) -> bool {
    !class_name.is_empty()
        && !class_name.starts_with(|c: char| c.is_ascii_digit())
        && class_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
