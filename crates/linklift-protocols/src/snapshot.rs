//! Read-only capture of a rendering surface's extractable content.

use serde::{Deserialize, Serialize};

/// Everything the pattern extractor searches, captured in one read.
///
/// Lists follow document order; the extractor's first-match semantics
/// depend on that.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentSnapshot {
    /// Values of value-bearing form fields (inputs, textareas).
    pub field_values: Vec<String>,
    /// Text content of currently open modal/dialog regions.
    pub dialog_texts: Vec<String>,
    /// Hyperlink targets pointing at the share-link host.
    pub anchor_hrefs: Vec<String>,
    /// Embedded script/data payload texts.
    pub script_blobs: Vec<String>,
}

impl DocumentSnapshot {
    /// Number of currently open dialog regions.
    pub fn dialog_count(&self) -> usize {
        self.dialog_texts.len()
    }
}

/// One album tile scraped from the listing page, before normalization.
///
/// Raw output of the listing-scrape evaluation; discovery assembly dedupes
/// and cleans these into targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumCard {
    /// Best available title for the tile (may be a placeholder).
    pub title: String,
    /// Absolute album URL from the tile's anchor.
    pub url: String,
    /// Cover image URL as rendered, session-scoped params included.
    pub preview: String,
}
