//! Whole-batch link scan over a shared listing surface.
//!
//! The listing page serializes every shared album's data contiguously, so
//! one surface can resolve many targets at once. Captured script payloads
//! are fed to the proximity matcher until every identifier is assigned or
//! the scan window lapses.

use linklift_extract::BlobMatcher;
use linklift_protocols::limits::{LINK_POLL_INTERVAL, LISTING_SCAN_WINDOW, MAX_PAIR_DISTANCE};
use linklift_protocols::{AlbumId, ScanOutcome, Surface, SurfaceError};
use tokio::time::{self, Instant};
use tracing::{debug, trace};

use crate::navigator::recv_mutation;

/// Mines one listing surface for the share links of many identifiers.
pub struct ListingScanner<'a> {
    surface: &'a dyn Surface,
    wanted: Vec<AlbumId>,
}

impl<'a> ListingScanner<'a> {
    pub fn new(surface: &'a dyn Surface, wanted: Vec<AlbumId>) -> Self {
        Self { surface, wanted }
    }

    /// Scan until every identifier is resolved or the window lapses.
    ///
    /// Identifiers the matcher cannot place stay absent from the outcome;
    /// callers treat absence as not-found and must never substitute a
    /// fallback link.
    pub async fn scan(self) -> ScanOutcome {
        let Self { surface, wanted } = self;
        let total = wanted.len();
        let deadline = Instant::now() + LISTING_SCAN_WINDOW;
        let mut matcher = BlobMatcher::new(wanted, MAX_PAIR_DISTANCE);

        let mut watch = match surface.watch_mutations().await {
            Ok(receiver) => Some(receiver),
            Err(err) => {
                debug!("mutation watch unavailable for listing scan: {}", err);
                None
            }
        };

        loop {
            match surface.snapshot().await {
                Ok(snapshot) => {
                    let before = matcher.resolved_count();
                    for blob in &snapshot.script_blobs {
                        matcher.feed(blob);
                    }
                    if matcher.resolved_count() > before {
                        debug!(
                            "listing scan resolved {} of {} targets",
                            matcher.resolved_count(),
                            total
                        );
                    }
                }
                Err(SurfaceError::Closed) => {
                    debug!("listing surface closed, keeping partial results");
                    break;
                }
                Err(err) => trace!("listing snapshot failed: {}", err),
            }

            if matcher.is_complete() {
                debug!("listing scan complete, all {} targets resolved", total);
                break;
            }

            tokio::select! {
                biased;
                () = time::sleep_until(deadline) => {
                    debug!(
                        "listing scan window lapsed with {} of {} targets resolved",
                        matcher.resolved_count(),
                        total
                    );
                    break;
                }
                received = recv_mutation(&mut watch) => {
                    if received.is_none() {
                        watch = None;
                    }
                }
                () = time::sleep(LINK_POLL_INTERVAL) => {}
            }
        }

        ScanOutcome {
            matches: matcher.into_matches(),
        }
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
