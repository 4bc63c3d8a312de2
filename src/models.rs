use serde::Serialize;
use std::fmt;

/// An anime entry read from the index listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimeRef {
    /// Relative href of the detail page, as scraped
    pub href: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Episode,
    Batch,
    Movie,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Episode, Category::Batch, Category::Movie];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Episode => "episode",
            Category::Batch => "batch",
            Category::Movie => "movie",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single torrent release extracted from a detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRecord {
    pub anime: String,
    pub category: Category,
    /// Episode number, batch range or movie name
    pub label: String,
    pub quality: String,
    pub link: String,
}

pub const FIELD_SEPARATOR: &str = " - ";

impl fmt::Display for ReleaseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{anime}{sep}{label}{sep}{quality}{sep}{link}",
            anime = self.anime,
            label = self.label,
            quality = self.quality,
            link = self.link,
            sep = FIELD_SEPARATOR,
        )
    }
}
