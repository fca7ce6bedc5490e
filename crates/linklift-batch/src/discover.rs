//! Discovery assembly: scraped listing tiles into batch targets.
//!
//! The listing scrape returns raw tiles exactly as rendered, including
//! duplicate anchors per album and session-scoped cover URLs. Assembly
//! dedupes, drops non-album links, and rewrites previews into a form
//! that stays valid outside the scraping session.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use linklift_protocols::link::AlbumId;
use linklift_protocols::snapshot::AlbumCard;
use linklift_protocols::target::Target;

/// Canonical public host previews are rewritten onto.
pub const CANONICAL_PREVIEW_HOST: &str = "lh3.googleusercontent.com";

/// Title the listing shows while a tile still lacks its real name.
const PLACEHOLDER_TITLE: &str = "Google Photos";

/// Size or auth suffix on the last path segment of a CDN image URL.
static SIZE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=[swh]\d[^/]*$").unwrap());

/// Build the target list from raw listing tiles.
///
/// Tiles are deduped by album path, non-album links dropped, and
/// placeholder titles replaced. Input order is preserved.
pub fn assemble_targets(cards: Vec<AlbumCard>) -> Vec<Target> {
    let mut seen_paths = BTreeSet::new();
    let mut targets = Vec::new();
    for card in cards {
        let Some(path) = album_path(&card.url) else {
            debug!("skipping non-album tile: {}", card.url);
            continue;
        };
        if !seen_paths.insert(path) {
            continue;
        }
        let name = display_name(&card.title);
        let mut target = Target::new(card.url, name);
        if let Some(preview) = normalize_preview_url(&card.preview) {
            target = target.with_preview(preview);
        }
        targets.push(target);
    }
    targets
}

/// Album path used as the dedupe key, for real album links only.
fn album_path(raw: &str) -> Option<String> {
    AlbumId::from_source_url(raw)?;
    let url = Url::parse(raw).ok()?;
    Some(url.path().to_string())
}

fn display_name(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() || title == PLACEHOLDER_TITLE {
        "Untitled album".to_string()
    } else {
        title.to_string()
    }
}

/// Rewrite a session-scoped cover URL into a stable public form.
///
/// Covers render off per-session CDN hosts with auth-bound size
/// suffixes; the hand-off needs the canonical host, no query, and a
/// fixed `=w400` size.
pub fn normalize_preview_url(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw).ok()?;
    if !is_cdn_host(url.host_str()?) {
        return None;
    }
    url.set_host(Some(CANONICAL_PREVIEW_HOST)).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    let text = url.to_string();
    Some(if SIZE_SUFFIX_RE.is_match(&text) {
        SIZE_SUFFIX_RE.replace(&text, "=w400").into_owned()
    } else {
        format!("{}=w400", text)
    })
}

fn is_cdn_host(host: &str) -> bool {
    host.ends_with("googleusercontent.com") || host.ends_with("usercontent.google.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALBUM_URL: &str = "https://photos.google.com/album/DiscoverToken000001A";
    const OTHER_URL: &str = "https://photos.google.com/album/DiscoverToken000002B";

    fn card(title: &str, url: &str, preview: &str) -> AlbumCard {
        AlbumCard {
            title: title.to_string(),
            url: url.to_string(),
            preview: preview.to_string(),
        }
    }

    #[test]
    fn test_normalizes_session_preview() {
        let normalized = normalize_preview_url(
            "https://photos.fife.usercontent.google.com/pw/AB-cd_e=s220-c-k-no?authuser=0",
        )
        .unwrap();
        assert_eq!(normalized, "https://lh3.googleusercontent.com/pw/AB-cd_e=w400");
    }

    #[test]
    fn test_appends_size_when_suffix_missing() {
        let normalized =
            normalize_preview_url("https://lh3.googleusercontent.com/pw/NoSuffix").unwrap();
        assert_eq!(normalized, "https://lh3.googleusercontent.com/pw/NoSuffix=w400");
    }

    #[test]
    fn test_rejects_foreign_preview_host() {
        assert!(normalize_preview_url("https://example.com/img=s220").is_none());
        assert!(normalize_preview_url("").is_none());
    }

    #[test]
    fn test_dedupes_tiles_by_album_path() {
        let targets = assemble_targets(vec![
            card("Summer", ALBUM_URL, ""),
            card("Summer again", &format!("{}?pageId=none", ALBUM_URL), ""),
        ]);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].display_name, "Summer");
    }

    #[test]
    fn test_drops_tiles_without_album_identifier() {
        let targets = assemble_targets(vec![
            card("Photos home", "https://photos.google.com/", ""),
            card("Short", "https://photos.google.com/album/short", ""),
        ]);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_placeholder_titles_get_fallback_name() {
        let targets = assemble_targets(vec![
            card("Google Photos", ALBUM_URL, ""),
            card("   ", OTHER_URL, ""),
        ]);
        assert_eq!(targets[0].display_name, "Untitled album");
        assert_eq!(targets[1].display_name, "Untitled album");
    }

    #[test]
    fn test_preview_attached_only_when_normalizable() {
        let targets = assemble_targets(vec![
            card("A", ALBUM_URL, "https://lh3.googleusercontent.com/pw/X=s64"),
            card("B", OTHER_URL, "not a url"),
        ]);
        assert_eq!(
            targets[0].preview_ref.as_deref(),
            Some("https://lh3.googleusercontent.com/pw/X=w400")
        );
        assert!(targets[1].preview_ref.is_none());
    }

    #[test]
    fn test_preserves_listing_order() {
        let targets = assemble_targets(vec![
            card("First", ALBUM_URL, ""),
            card("Second", OTHER_URL, ""),
        ]);
        let names: Vec<&str> = targets.iter().map(|t| t.display_name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }
}
