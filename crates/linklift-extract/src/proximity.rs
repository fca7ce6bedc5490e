//! Greedy nearest-pair assignment between identifier and link occurrences.
//!
//! Listing pages serialize many albums' data contiguously, so single-window
//! scoping is unsafe there: a neighbor's link can fall inside any fixed
//! window. The matcher instead pairs occurrences by positional distance and
//! commits the closest available pair first, keeping the result one-to-one.
//! An identifier the matcher cannot place stays absent; a guess is never
//! synthesized.

use std::collections::{BTreeMap, BTreeSet};

use linklift_protocols::link::SHARE_LINK_RE;
use linklift_protocols::{AlbumId, ShareLink};

/// A located instance of an identifier or link inside one text blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub value: String,
    pub position: usize,
}

/// Candidate assignment between one identifier occurrence and one link
/// occurrence, weighted by positional distance. Generated only within the
/// distance bound and consumed immediately by the greedy pass.
#[derive(Debug, Clone, Copy)]
struct CandidatePair {
    ident: usize,
    link: usize,
    distance: usize,
}

/// All occurrences of `identifier` in `text`.
pub fn identifier_occurrences(text: &str, identifier: &AlbumId) -> Vec<Occurrence> {
    text.match_indices(identifier.as_str())
        .map(|(position, value)| Occurrence {
            value: value.to_string(),
            position,
        })
        .collect()
}

/// All share-link occurrences in `text`.
pub fn link_occurrences(text: &str) -> Vec<Occurrence> {
    SHARE_LINK_RE
        .find_iter(text)
        .map(|m| Occurrence {
            value: m.as_str().to_string(),
            position: m.start(),
        })
        .collect()
}

/// Maximum, minimum-distance-first, one-to-one assignment.
///
/// Candidate pairs are generated only within `max_distance`, sorted
/// ascending by distance, then committed greedily while both sides are
/// still free. Equal distances resolve in document order (identifier
/// position, then link position), which makes the result deterministic.
/// The matching is not guaranteed globally optimal; genuine pairs sit far
/// closer together than any cross-album confusion pair.
pub fn match_occurrences(
    identifiers: &[Occurrence],
    links: &[Occurrence],
    max_distance: usize,
) -> BTreeMap<String, String> {
    let mut pairs = Vec::new();
    for (i, ident) in identifiers.iter().enumerate() {
        for (l, link) in links.iter().enumerate() {
            let distance = ident.position.abs_diff(link.position);
            if distance <= max_distance {
                pairs.push(CandidatePair {
                    ident: i,
                    link: l,
                    distance,
                });
            }
        }
    }
    pairs.sort_by_key(|p| {
        (
            p.distance,
            identifiers[p.ident].position,
            links[p.link].position,
        )
    });

    let mut result = BTreeMap::new();
    let mut used_links: BTreeSet<String> = BTreeSet::new();
    for pair in pairs {
        let ident_value = &identifiers[pair.ident].value;
        let link_value = &links[pair.link].value;
        if result.contains_key(ident_value) || used_links.contains(link_value) {
            continue;
        }
        used_links.insert(link_value.clone());
        result.insert(ident_value.clone(), link_value.clone());
    }
    result
}

/// Carries matching state across the many text blobs of one document, so the
/// whole-document result stays one-to-one.
#[derive(Debug)]
pub struct BlobMatcher {
    wanted: Vec<AlbumId>,
    max_distance: usize,
    resolved: BTreeMap<AlbumId, ShareLink>,
    used_links: BTreeSet<String>,
}

impl BlobMatcher {
    pub fn new(mut wanted: Vec<AlbumId>, max_distance: usize) -> Self {
        let mut seen = BTreeSet::new();
        wanted.retain(|id| seen.insert(id.clone()));
        Self {
            wanted,
            max_distance,
            resolved: BTreeMap::new(),
            used_links: BTreeSet::new(),
        }
    }

    /// Mine one text blob, committing any new assignments.
    pub fn feed(&mut self, blob: &str) {
        if self.is_complete() {
            return;
        }
        let mut idents = Vec::new();
        for id in &self.wanted {
            if !self.resolved.contains_key(id) {
                idents.extend(identifier_occurrences(blob, id));
            }
        }
        if idents.is_empty() {
            return;
        }
        let links: Vec<Occurrence> = link_occurrences(blob)
            .into_iter()
            .filter(|o| !self.used_links.contains(&o.value))
            .collect();
        if links.is_empty() {
            return;
        }

        for (ident_value, link_value) in match_occurrences(&idents, &links, self.max_distance) {
            let Some(id) = self.wanted.iter().find(|w| w.as_str() == ident_value) else {
                continue;
            };
            let Some(link) = ShareLink::find_in(&link_value) else {
                continue;
            };
            self.used_links.insert(link_value);
            self.resolved.insert(id.clone(), link);
        }
    }

    /// True when every wanted identifier has an assignment.
    pub fn is_complete(&self) -> bool {
        self.resolved.len() == self.wanted.len()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn into_matches(self) -> BTreeMap<AlbumId, ShareLink> {
        self.resolved
    }
}

#[cfg(test)]
#[path = "proximity_tests.rs"]
mod tests;
