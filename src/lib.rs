// erai-scraper library
//
// Crawls the erai-raws anime listing, expands each detail page's "load more"
// sections in Chromium and extracts torrent release records.

pub mod browser;
pub mod config;
pub mod error;
pub mod expander;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod output;
pub mod scraper;
pub mod selectors;
pub mod utils;

// Re-export main types for convenience
pub use browser::chromium::ChromiumSession;
pub use browser::{BrowserSession, TriggerOutcome};
pub use config::{BrowserSettings, RunConfig, ScraperConfig, SiteConfig};
pub use error::StructureError;
pub use expander::{click_until_exhausted, expand_all, ExpandPolicy};
pub use extractor::{Extraction, ReleaseExtractor, MOVIE_LABEL_PLACEHOLDER};
pub use fetcher::{parse_index, IndexListing, PageFetcher};
pub use models::{AnimeRef, Category, ReleaseRecord};
pub use output::{OutputFormat, RecordWriter};
pub use scraper::{EraiScraper, ScrapeSummary};
pub use selectors::{CompiledSelectors, SiteSelectors};
pub use utils::{strip_outer, SettleDelay, DEFAULT_USER_AGENT};
