//! Priority-ordered share-link extraction over a document snapshot.
//!
//! Source kinds are searched in a fixed trust order: open-disclosure form
//! fields first (only one entity's UI can be open at a time), then dialog
//! text, then anchors on the link host, and only then serialized script
//! payloads. Script payloads are ambiguous because neighboring albums
//! serialize adjacently, so they are scoped to a bounded window anchored at
//! the target's own identifier.

use linklift_protocols::limits::AFTER_IDENTIFIER_WINDOW;
use linklift_protocols::{AlbumId, DocumentSnapshot, ShareLink};

/// First share link found in `snapshot`, honoring source priority.
///
/// Pure read over the capture. Without an identifier the script payloads
/// are skipped entirely; unscoped they could yield a neighboring album's
/// link.
pub fn extract_link(
    snapshot: &DocumentSnapshot,
    identifier: Option<&AlbumId>,
) -> Option<ShareLink> {
    if let Some(link) = from_form_fields(&snapshot.field_values) {
        return Some(link);
    }
    if let Some(link) = from_dialog_texts(&snapshot.dialog_texts) {
        return Some(link);
    }
    if let Some(link) = from_anchors(&snapshot.anchor_hrefs) {
        return Some(link);
    }
    identifier.and_then(|id| from_script_blobs(&snapshot.script_blobs, id))
}

fn from_form_fields(values: &[String]) -> Option<ShareLink> {
    values.iter().find_map(|value| ShareLink::leading(value))
}

fn from_dialog_texts(texts: &[String]) -> Option<ShareLink> {
    texts.iter().find_map(|text| ShareLink::find_in(text))
}

fn from_anchors(hrefs: &[String]) -> Option<ShareLink> {
    hrefs.iter().find_map(|href| ShareLink::find_in(href))
}

fn from_script_blobs(blobs: &[String], identifier: &AlbumId) -> Option<ShareLink> {
    blobs
        .iter()
        .find_map(|blob| window_after(blob, identifier.as_str()).and_then(ShareLink::find_in))
}

/// Slice of `blob` starting at the first occurrence of `needle`, bounded to
/// the fixed scan window. Text before the identifier belongs to earlier
/// entries in the serialization and must never match.
fn window_after<'a>(blob: &'a str, needle: &str) -> Option<&'a str> {
    let start = blob.find(needle)?;
    let mut end = (start + AFTER_IDENTIFIER_WINDOW).min(blob.len());
    while !blob.is_char_boundary(end) {
        end -= 1;
    }
    Some(&blob[start..end])
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
