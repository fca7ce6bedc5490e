//! Share-link and album-identifier lexical types.
//!
//! The photo service mints share links under a single short-link host with an
//! opaque alphanumeric token. Album identifiers are long URL-safe tokens that
//! appear both in album URLs and inside serialized page payloads.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Lexical pattern of a minted share link.
pub static SHARE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https://photos\.app\.goo\.gl/[A-Za-z0-9]+").unwrap());

static ALBUM_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/album/([A-Za-z0-9_-]{15,})").unwrap());

/// A lexically valid share link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareLink(String);

impl ShareLink {
    /// First share link found anywhere inside `text`.
    pub fn find_in(text: &str) -> Option<Self> {
        SHARE_LINK_RE.find(text).map(|m| Self(m.as_str().to_string()))
    }

    /// Share link anchored at the start of `text` (leading whitespace ignored).
    ///
    /// Form-field values hold the bare link; anything prefixed is not one.
    pub fn leading(text: &str) -> Option<Self> {
        let trimmed = text.trim_start();
        let m = SHARE_LINK_RE.find(trimmed)?;
        (m.start() == 0).then(|| Self(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque correlation token for one album, derived from its source URL.
///
/// Unique within a batch; the same token shows up verbatim inside the
/// service's serialized page payloads, which is what makes positional
/// matching possible.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(String);

impl AlbumId {
    /// Derive the identifier from an album URL.
    ///
    /// Returns `None` when the URL carries no album path segment.
    pub fn from_source_url(url: &str) -> Option<Self> {
        ALBUM_PATH_RE
            .captures(url)
            .map(|caps| Self(caps[1].to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
