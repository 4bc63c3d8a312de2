use thiserror::Error;

use crate::models::Category;

/// Markup that is present but not shaped the way the extractor expects.
///
/// Absent category containers are not anomalies; they are skipped silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("index entry #{index} has no link")]
    IndexLinkMissing { index: usize },

    #[error("index entry #{index} has no title")]
    IndexTitleMissing { index: usize },

    #[error("{anime}: {category} entry #{entry} has no label")]
    LabelMissing {
        anime: String,
        category: Category,
        entry: usize,
    },

    #[error("{anime}: {category} '{label}' release #{row} has no quality")]
    QualityMissing {
        anime: String,
        category: Category,
        label: String,
        row: usize,
    },

    #[error("{anime}: {category} '{label}' release #{row} has no torrent link")]
    LinkMissing {
        anime: String,
        category: Category,
        label: String,
        row: usize,
    },
}
