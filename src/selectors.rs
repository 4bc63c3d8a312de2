use anyhow::{anyhow, Result};
use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::models::Category;

/// CSS selectors describing the erai-raws markup.
///
/// Stored as strings so they can be overridden from the config file when the
/// site layout shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    pub index_entry: String,
    pub index_link: String,
    pub index_title: String,
    pub episodes_container: String,
    pub batches_container: String,
    pub movies_container: String,
    pub entry: String,
    pub heading: String,
    /// Label font without any inline style
    pub label: String,
    /// Alternate label font used when a movie name renders as the placeholder
    pub label_fallback: String,
    pub release_row: String,
    pub quality: String,
    pub link: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            index_entry: "div.ind-show.button.button5".to_string(),
            index_link: "a".to_string(),
            index_title: "span".to_string(),
            episodes_container: "div.posmain.h-episodes.show-episodes".to_string(),
            batches_container: "div.posmain.h-batch.show-batch".to_string(),
            movies_container: "div.posmain.h-movies.show-movies".to_string(),
            entry: "article.era_center.nonmain.border_radius_22".to_string(),
            heading: "h1.name.post-title.entry-title.titlehh".to_string(),
            label: "font.aa_ss_ops:not([style])".to_string(),
            label_fallback: r#"font.aa_ss_ops[style="margin: 0px 0px -4px 0px;"]"#.to_string(),
            release_row: "div.nonmain.release-table.button.last_block".to_string(),
            quality: "i.sp_p_q".to_string(),
            link: "a".to_string(),
        }
    }
}

/// Parsed form of [`SiteSelectors`], built once per run
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub index_entry: Selector,
    pub index_link: Selector,
    pub index_title: Selector,
    pub episodes_container: Selector,
    pub batches_container: Selector,
    pub movies_container: Selector,
    pub entry: Selector,
    pub heading: Selector,
    pub label: Selector,
    pub label_fallback: Selector,
    pub release_row: Selector,
    pub quality: Selector,
    pub link: Selector,
}

fn parse(name: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| anyhow!("Failed to parse {} selector '{}': {:?}", name, selector, e))
}

impl CompiledSelectors {
    pub fn compile(selectors: &SiteSelectors) -> Result<Self> {
        Ok(Self {
            index_entry: parse("index_entry", &selectors.index_entry)?,
            index_link: parse("index_link", &selectors.index_link)?,
            index_title: parse("index_title", &selectors.index_title)?,
            episodes_container: parse("episodes_container", &selectors.episodes_container)?,
            batches_container: parse("batches_container", &selectors.batches_container)?,
            movies_container: parse("movies_container", &selectors.movies_container)?,
            entry: parse("entry", &selectors.entry)?,
            heading: parse("heading", &selectors.heading)?,
            label: parse("label", &selectors.label)?,
            label_fallback: parse("label_fallback", &selectors.label_fallback)?,
            release_row: parse("release_row", &selectors.release_row)?,
            quality: parse("quality", &selectors.quality)?,
            link: parse("link", &selectors.link)?,
        })
    }

    pub fn container(&self, category: Category) -> &Selector {
        match category {
            Category::Episode => &self.episodes_container,
            Category::Batch => &self.batches_container,
            Category::Movie => &self.movies_container,
        }
    }
}
