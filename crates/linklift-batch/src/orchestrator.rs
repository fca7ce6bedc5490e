//! Batch orchestration over isolated surface sessions.
//!
//! Sequential mode drives targets strictly one at a time, each on its own
//! surface. Isolated-parallel mode opens a single shared-items listing
//! surface and resolves the whole batch from it by proximity pairing. The
//! pipeline chains both: trigger everything first, then rescue whatever
//! never produced a link with one listing pass.

use std::collections::BTreeSet;

use tokio::time;
use tracing::{debug, info, warn};

use linklift_protocols::limits::SESSION_DEADLINE;
use linklift_protocols::link::AlbumId;
use linklift_protocols::message::{DisclosureOutcome, ScanOutcome};
use linklift_protocols::surface::SurfaceHost;
use linklift_protocols::target::{Target, TargetStatus};

use crate::error::{BatchError, ChannelClosed, FailureKind};
use crate::session::AutomationSession;

/// How a batch resolves its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// One surface per target, links captured in place.
    Sequential,
    /// One shared-items listing surface, links paired by proximity.
    IsolatedParallel,
}

/// Drives batches of targets against a surface host.
pub struct Orchestrator<'a> {
    host: &'a dyn SurfaceHost,
    listing_url: String,
}

impl<'a> Orchestrator<'a> {
    pub fn new(host: &'a dyn SurfaceHost, listing_url: impl Into<String>) -> Self {
        Self {
            host,
            listing_url: listing_url.into(),
        }
    }

    /// Run `targets` to terminal status under `mode`.
    ///
    /// Returns the full target list in input order. Individual failures
    /// never abort the batch; the only rejection is a duplicate album
    /// identifier, raised before any surface opens.
    pub async fn run_batch(
        &self,
        mut targets: Vec<Target>,
        mode: BatchMode,
    ) -> Result<Vec<Target>, BatchError> {
        reject_duplicate_identifiers(&targets)?;
        info!("starting batch of {} targets ({:?})", targets.len(), mode);
        match mode {
            BatchMode::Sequential => self.run_sequential(&mut targets, false).await,
            BatchMode::IsolatedParallel => self.run_listing_scan(&mut targets).await,
        }
        finalize_unresolved(&mut targets);
        log_summary(&targets);
        Ok(targets)
    }

    /// Trigger sequentially, then rescue link-less targets from the
    /// shared-items listing in one pass.
    pub async fn run_pipeline(&self, mut targets: Vec<Target>) -> Result<Vec<Target>, BatchError> {
        reject_duplicate_identifiers(&targets)?;
        info!("starting pipeline batch of {} targets", targets.len());
        self.run_sequential(&mut targets, true).await;
        if targets.iter().any(|target| !target.status.is_terminal()) {
            self.run_listing_scan(&mut targets).await;
        }
        finalize_unresolved(&mut targets);
        log_summary(&targets);
        Ok(targets)
    }

    /// Read an existing link off one album page without driving controls.
    pub async fn collect_existing(&self, target: &mut Target) {
        let identifier = AlbumId::from_source_url(&target.source_url);
        target.status = TargetStatus::Collecting;
        let session = match AutomationSession::open(self.host, &target.source_url).await {
            Ok(session) => session,
            Err(err) => {
                warn!("surface open failed for '{}': {}", target.display_name, err);
                target.mark_failed(FailureKind::SurfaceCreation.as_str());
                return;
            }
        };
        let reply = time::timeout(SESSION_DEADLINE, async {
            session.settle().await;
            session.agent().extract_existing_link(identifier).await
        })
        .await
        .ok();
        session.teardown().await;

        match reply {
            Some(Ok(outcome)) => match outcome.resolved_link {
                Some(link) => target.mark_linked(link),
                None => target.mark_failed("no link present on the album page"),
            },
            Some(Err(ChannelClosed)) => {
                target.mark_failed(FailureKind::ChannelClosed.as_str());
            }
            None => {
                warn!("session deadline lapsed for '{}'", target.display_name);
                target.mark_failed(FailureKind::DisclosureTimeout.as_str());
            }
        }
        info!("album '{}' -> {:?}", target.display_name, target.status);
    }

    async fn run_sequential(&self, targets: &mut [Target], keep_triggered: bool) {
        let total = targets.len();
        for (index, target) in targets.iter_mut().enumerate() {
            if target.status.is_terminal() {
                continue;
            }
            info!("[{}/{}] driving '{}'", index + 1, total, target.display_name);
            self.drive_target(target, keep_triggered).await;
        }
    }

    /// One target, one surface, one bounded session.
    async fn drive_target(&self, target: &mut Target, keep_triggered: bool) {
        let identifier = AlbumId::from_source_url(&target.source_url);
        target.status = TargetStatus::Triggering;

        let session = match AutomationSession::open(self.host, &target.source_url).await {
            Ok(session) => session,
            Err(err) => {
                warn!("surface open failed for '{}': {}", target.display_name, err);
                target.mark_failed(FailureKind::SurfaceCreation.as_str());
                return;
            }
        };
        let reply = time::timeout(SESSION_DEADLINE, async {
            session.settle().await;
            session.agent().trigger_disclosure(identifier).await
        })
        .await
        .ok();
        session.teardown().await;

        match reply {
            Some(Ok(outcome)) => record_outcome(target, outcome, keep_triggered),
            Some(Err(ChannelClosed)) => {
                warn!("agent lost for '{}'", target.display_name);
                target.mark_failed(FailureKind::ChannelClosed.as_str());
            }
            None => {
                warn!("session deadline lapsed for '{}'", target.display_name);
                target.mark_failed(FailureKind::DisclosureTimeout.as_str());
            }
        }
        info!("album '{}' -> {:?}", target.display_name, target.status);
    }

    /// Resolve every non-terminal target from the shared-items listing.
    async fn run_listing_scan(&self, targets: &mut [Target]) {
        let wanted: Vec<AlbumId> = targets
            .iter()
            .filter(|target| !target.status.is_terminal())
            .filter_map(|target| AlbumId::from_source_url(&target.source_url))
            .collect();
        if wanted.is_empty() {
            debug!("no identifiers eligible for the listing scan");
            return;
        }
        for target in targets.iter_mut().filter(|target| !target.status.is_terminal()) {
            if AlbumId::from_source_url(&target.source_url).is_some() {
                target.status = TargetStatus::Collecting;
            }
        }
        info!("scanning listing for {} unresolved targets", wanted.len());

        let session = match AutomationSession::open(self.host, &self.listing_url).await {
            Ok(session) => session,
            Err(err) => {
                warn!("listing surface open failed: {}", err);
                fail_collecting(targets, FailureKind::SurfaceCreation);
                return;
            }
        };
        session.settle().await;
        let reply = session.agent().scan_listing(wanted).await;
        session.teardown().await;

        match reply {
            Ok(outcome) => {
                for target in targets
                    .iter_mut()
                    .filter(|target| target.status == TargetStatus::Collecting)
                {
                    resolve_scanned(target, &outcome);
                }
            }
            Err(ChannelClosed) => {
                warn!("listing agent lost before replying");
                fail_collecting(targets, FailureKind::ChannelClosed);
            }
        }
    }
}

fn record_outcome(target: &mut Target, outcome: DisclosureOutcome, keep_triggered: bool) {
    if let Some(link) = outcome.resolved_link {
        debug!("captured {} after {} polls", link, outcome.attempts);
        target.mark_linked(link);
        return;
    }
    if let Some(detail) = &outcome.failure {
        debug!("album '{}': {}", target.display_name, detail);
    }
    if outcome.control_found {
        if keep_triggered {
            // The click landed; the listing pass may still find the link.
            target.status = TargetStatus::Triggered;
        } else {
            target.mark_failed(FailureKind::DisclosureTimeout.as_str());
        }
    } else {
        target.mark_failed(FailureKind::ControlNotFound.as_str());
    }
}

fn resolve_scanned(target: &mut Target, outcome: &ScanOutcome) {
    let Some(identifier) = AlbumId::from_source_url(&target.source_url) else {
        return;
    };
    match outcome.matches.get(&identifier) {
        Some(link) => target.mark_linked(link.clone()),
        None => target.mark_failed(FailureKind::AmbiguousMatch.as_str()),
    }
    info!("album '{}' -> {:?}", target.display_name, target.status);
}

fn fail_collecting(targets: &mut [Target], kind: FailureKind) {
    for target in targets
        .iter_mut()
        .filter(|target| target.status == TargetStatus::Collecting)
    {
        target.mark_failed(kind.as_str());
    }
}

/// Anything still non-terminal after all passes never produced a link.
fn finalize_unresolved(targets: &mut [Target]) {
    for target in targets.iter_mut().filter(|target| !target.status.is_terminal()) {
        target.mark_failed("link never captured");
    }
}

fn reject_duplicate_identifiers(targets: &[Target]) -> Result<(), BatchError> {
    let mut seen = BTreeSet::new();
    for target in targets {
        if let Some(identifier) = AlbumId::from_source_url(&target.source_url) {
            if seen.contains(&identifier) {
                return Err(BatchError::DuplicateIdentifier(
                    identifier.as_str().to_string(),
                ));
            }
            seen.insert(identifier);
        }
    }
    Ok(())
}

fn log_summary(targets: &[Target]) {
    let linked = targets
        .iter()
        .filter(|target| target.status == TargetStatus::Linked)
        .count();
    info!("batch finished: {} linked, {} failed", linked, targets.len() - linked);
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
