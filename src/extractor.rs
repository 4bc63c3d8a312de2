use scraper::{ElementRef, Html};

use crate::error::StructureError;
use crate::models::{Category, ReleaseRecord};
use crate::selectors::CompiledSelectors;
use crate::utils::strip_outer;

/// Value the site renders in the plain label font for some movies; the real
/// name then sits in a sibling font carrying an inline margin style.
pub const MOVIE_LABEL_PLACEHOLDER: &str = "00";

/// Records and anomalies found on one expanded detail page
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ReleaseRecord>,
    pub anomalies: Vec<StructureError>,
}

impl Extraction {
    pub fn count(&self, category: Category) -> usize {
        self.records.iter().filter(|r| r.category == category).count()
    }
}

pub struct ReleaseExtractor {
    selectors: CompiledSelectors,
}

impl ReleaseExtractor {
    pub fn new(selectors: CompiledSelectors) -> Self {
        Self { selectors }
    }

    /// Walk episodes, batches and movies of a detail page in document order
    pub fn extract(&self, html: &str, anime: &str) -> Extraction {
        let document = Html::parse_document(html);
        let mut extraction = Extraction::default();

        for category in Category::ALL {
            self.extract_category(&document, anime, category, &mut extraction);
        }

        extraction
    }

    fn extract_category(
        &self,
        document: &Html,
        anime: &str,
        category: Category,
        out: &mut Extraction,
    ) {
        let container = match document.select(self.selectors.container(category)).next() {
            Some(c) => c,
            None => {
                log::debug!("{}: no {} section", anime, category);
                return;
            }
        };

        for (entry_index, entry) in container.select(&self.selectors.entry).enumerate() {
            let label = match self.entry_label(entry, category) {
                Some(label) => label,
                None => {
                    out.anomalies.push(StructureError::LabelMissing {
                        anime: anime.to_string(),
                        category,
                        entry: entry_index,
                    });
                    continue;
                }
            };

            for (row_index, row) in entry.select(&self.selectors.release_row).enumerate() {
                let quality = match row.select(&self.selectors.quality).next() {
                    Some(q) => strip_outer(&q.text().collect::<String>()).to_string(),
                    None => {
                        out.anomalies.push(StructureError::QualityMissing {
                            anime: anime.to_string(),
                            category,
                            label: label.clone(),
                            row: row_index,
                        });
                        continue;
                    }
                };

                let link = match row
                    .select(&self.selectors.link)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                {
                    Some(href) => href.to_string(),
                    None => {
                        out.anomalies.push(StructureError::LinkMissing {
                            anime: anime.to_string(),
                            category,
                            label: label.clone(),
                            row: row_index,
                        });
                        continue;
                    }
                };

                out.records.push(ReleaseRecord {
                    anime: anime.to_string(),
                    category,
                    label: label.clone(),
                    quality,
                    link,
                });
            }
        }
    }

    fn entry_label(&self, entry: ElementRef, category: Category) -> Option<String> {
        let heading = entry.select(&self.selectors.heading).next()?;
        let label = heading.select(&self.selectors.label).next().and_then(leading_text)?;

        // Site-specific quirk: some movie names (apparently single-digit ones)
        // render as "00" in the plain font and carry the real value in a
        // styled font instead.
        if category == Category::Movie && label == MOVIE_LABEL_PLACEHOLDER {
            match heading
                .select(&self.selectors.label_fallback)
                .next()
                .and_then(leading_text)
            {
                Some(real) => return Some(real),
                None => log::debug!("movie label is placeholder and has no styled fallback"),
            }
        }

        Some(label)
    }
}

/// Trimmed text of the element's first child, if that child is a text node
fn leading_text(element: ElementRef) -> Option<String> {
    let first = element.children().next()?;
    first.value().as_text().map(|text| text.trim().to_string())
}
