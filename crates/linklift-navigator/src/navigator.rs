//! The dialog navigator: walks the share-disclosure UI to a minted link.
//!
//! One navigator drives one surface. The flow polls rather than relying on
//! events alone: dialogs render asynchronously and mutation delivery is
//! throttled for background surfaces, so every wait pairs notifications
//! with a fixed fallback poll.

use linklift_extract::extract_link;
use linklift_protocols::limits::{
    DIAGNOSTIC_INTERVAL, LINK_AWAIT, LINK_POLL_INTERVAL, PRIMARY_POLL_ATTEMPTS,
    PRIMARY_POLL_INTERVAL, STAGE_SETTLE,
};
use linklift_protocols::{
    AlbumId, ControlScope, DisclosureOutcome, ExtractOutcome, Gesture, ShareLink, Surface,
    SurfaceError,
};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::probes::{CONFIRM_DIALOG_HEADING, select_confirm, select_disclosure, select_primary};
use crate::state::NavigatorState;

/// State machine that walks one surface through the share-disclosure UI.
///
/// The surface stays with the caller, which also remains responsible for
/// tearing it down; the navigator only reads and clicks.
pub struct DialogNavigator<'a> {
    surface: &'a dyn Surface,
    identifier: Option<AlbumId>,
    state: NavigatorState,
    attempts: u32,
    control_found: bool,
}

enum PrimaryResult {
    Clicked,
    AlreadyResolved(ShareLink),
    Missing,
}

impl<'a> DialogNavigator<'a> {
    pub fn new(surface: &'a dyn Surface, identifier: Option<AlbumId>) -> Self {
        Self {
            surface,
            identifier,
            state: NavigatorState::Idle,
            attempts: 0,
            control_found: false,
        }
    }

    /// Drive the flow to a terminal state.
    ///
    /// Never fails across the session boundary: surface errors are absorbed
    /// into retries and every exit is reported through the outcome. An empty
    /// `resolved_link` with a populated `failure` is the per-target failure
    /// signal callers act on.
    pub async fn run(mut self) -> DisclosureOutcome {
        if let Some(link) = self.check_link().await {
            debug!("link already present before any control search");
            self.advance(NavigatorState::Resolved);
            return self.finish(Some(link), None);
        }
        self.advance(NavigatorState::AwaitingPrimaryControl);

        match self.await_primary().await {
            PrimaryResult::AlreadyResolved(link) => {
                self.advance(NavigatorState::Resolved);
                self.finish(Some(link), None)
            }
            PrimaryResult::Missing => {
                self.advance(NavigatorState::NotFound);
                self.finish(None, Some("share control never appeared"))
            }
            PrimaryResult::Clicked => self.await_link().await,
        }
    }

    /// Poll the document for the primary share control and click it.
    ///
    /// The link check runs on every tick too; a share dialog left open by a
    /// previous visit can expose the link before any control is clicked.
    async fn await_primary(&mut self) -> PrimaryResult {
        for attempt in 1..=PRIMARY_POLL_ATTEMPTS {
            self.attempts = attempt;
            if let Some(link) = self.check_link().await {
                return PrimaryResult::AlreadyResolved(link);
            }
            match self.surface.controls(&ControlScope::Document).await {
                Ok(candidates) => {
                    if let Some((control, probe)) = select_primary(&candidates) {
                        debug!(
                            "share control matched by {} probe (handle {})",
                            probe, control.handle
                        );
                        match self.surface.activate(control, Gesture::Click).await {
                            Ok(()) => {
                                self.control_found = true;
                                self.advance(NavigatorState::PrimaryClicked);
                                return PrimaryResult::Clicked;
                            }
                            Err(SurfaceError::StaleControl) => {
                                debug!("share control went stale, re-enumerating");
                            }
                            Err(err) => debug!("share control activation failed: {}", err),
                        }
                    }
                }
                Err(err) => trace!("control enumeration failed: {}", err),
            }
            if attempt < PRIMARY_POLL_ATTEMPTS {
                time::sleep(PRIMARY_POLL_INTERVAL).await;
            }
        }
        PrimaryResult::Missing
    }

    /// Watch for the link while working through the disclosure stages.
    ///
    /// Each stage gets one settle window to render; when it lapses the flow
    /// skips forward and keeps watching, since some accounts mint the link
    /// without the full two-stage dialog.
    async fn await_link(mut self) -> DisclosureOutcome {
        let deadline = Instant::now() + LINK_AWAIT;
        self.advance(NavigatorState::AwaitingStage1Disclosure);
        let mut stage_entered = Instant::now();

        let mut watch = match self.surface.watch_mutations().await {
            Ok(receiver) => Some(receiver),
            Err(err) => {
                debug!("mutation watch unavailable, falling back to polling: {}", err);
                None
            }
        };
        let mut diagnostics =
            time::interval_at(Instant::now() + DIAGNOSTIC_INTERVAL, DIAGNOSTIC_INTERVAL);
        diagnostics.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if let Some(link) = self.check_link().await {
                self.advance(NavigatorState::Resolved);
                return self.finish(Some(link), None);
            }

            match self.state {
                NavigatorState::AwaitingStage1Disclosure => {
                    if self.try_stage_one().await {
                        stage_entered = Instant::now();
                    } else if stage_entered.elapsed() >= STAGE_SETTLE {
                        debug!("first disclosure stage never rendered, watching for the link");
                        self.advance(NavigatorState::AwaitingLink);
                    }
                }
                NavigatorState::AwaitingStage2Disclosure => {
                    if self.try_stage_two().await {
                        stage_entered = Instant::now();
                    } else if stage_entered.elapsed() >= STAGE_SETTLE {
                        debug!("confirmation dialog never rendered, watching for the link");
                        self.advance(NavigatorState::AwaitingLink);
                    }
                }
                _ => {}
            }

            tokio::select! {
                biased;
                () = time::sleep_until(deadline) => {
                    self.advance(NavigatorState::TimedOut);
                    return self.finish(None, Some("link did not appear before the await deadline"));
                }
                received = recv_mutation(&mut watch) => {
                    if received.is_none() {
                        watch = None;
                    }
                }
                _ = diagnostics.tick() => self.log_diagnostics().await,
                () = time::sleep(LINK_POLL_INTERVAL) => {}
            }
        }
    }

    /// Click the first-stage navigation control if it has rendered.
    async fn try_stage_one(&mut self) -> bool {
        let candidates = match self.surface.controls(&ControlScope::Dialog).await {
            Ok(candidates) => candidates,
            Err(err) => {
                trace!("dialog enumeration failed: {}", err);
                return false;
            }
        };
        let Some(control) = select_disclosure(&candidates) else {
            return false;
        };
        match self.surface.activate(control, Gesture::Click).await {
            Ok(()) => {
                debug!("first-stage disclosure control clicked (handle {})", control.handle);
                self.advance(NavigatorState::Stage1Clicked);
                self.advance(NavigatorState::AwaitingStage2Disclosure);
                true
            }
            Err(SurfaceError::StaleControl) => {
                debug!("first-stage control went stale before activation");
                false
            }
            Err(err) => {
                debug!("first-stage activation failed: {}", err);
                false
            }
        }
    }

    /// Click the terminal action inside the confirmation dialog.
    ///
    /// Enumeration is scoped to the dialog with the confirmation heading so
    /// the identically labeled first-stage control can never be re-hit, and
    /// the activation uses the full pointer sequence because the host app
    /// listens on low-level pointer events.
    async fn try_stage_two(&mut self) -> bool {
        let scope = ControlScope::DialogWithHeading(CONFIRM_DIALOG_HEADING.to_string());
        let candidates = match self.surface.controls(&scope).await {
            Ok(candidates) => candidates,
            Err(err) => {
                trace!("confirmation dialog enumeration failed: {}", err);
                return false;
            }
        };
        let Some(control) = select_confirm(&candidates) else {
            return false;
        };
        match self.surface.activate(control, Gesture::PointerSequence).await {
            Ok(()) => {
                debug!("confirmation control activated (handle {})", control.handle);
                self.advance(NavigatorState::Stage2Clicked);
                self.advance(NavigatorState::AwaitingLink);
                true
            }
            Err(SurfaceError::StaleControl) => {
                debug!("confirmation control went stale before activation");
                false
            }
            Err(err) => {
                debug!("confirmation activation failed: {}", err);
                false
            }
        }
    }

    async fn check_link(&self) -> Option<ShareLink> {
        match self.surface.snapshot().await {
            Ok(snapshot) => extract_link(&snapshot, self.identifier.as_ref()),
            Err(err) => {
                trace!("snapshot failed during link check: {}", err);
                None
            }
        }
    }

    async fn log_diagnostics(&self) {
        match self.surface.snapshot().await {
            Ok(snapshot) => debug!(
                "navigator in {:?}: {} dialog(s) open after {} primary attempts",
                self.state,
                snapshot.dialog_count(),
                self.attempts
            ),
            Err(err) => debug!("diagnostic snapshot failed: {}", err),
        }
    }

    /// Apply a transition, ignoring any that the current state rejects.
    /// Late timer or mutation wake-ups can race a terminal state; they must
    /// never move it.
    fn advance(&mut self, next: NavigatorState) {
        if self.state.accepts(next) {
            trace!("navigator {:?} -> {:?}", self.state, next);
            self.state = next;
        } else {
            debug!("ignoring navigator transition {:?} -> {:?}", self.state, next);
        }
    }

    fn finish(&self, resolved_link: Option<ShareLink>, failure: Option<&str>) -> DisclosureOutcome {
        if let Some(link) = &resolved_link {
            debug!("share link resolved after {} attempts: {}", self.attempts, link);
        }
        DisclosureOutcome {
            resolved_link,
            control_found: self.control_found,
            attempts: self.attempts,
            failure: failure.map(str::to_string),
        }
    }
}

/// One-shot link extraction for a target that may already be shared.
///
/// The navigator's short-circuit path without any control search; surface
/// errors report as "no link" rather than failing the caller.
pub async fn extract_existing(
    surface: &dyn Surface,
    identifier: Option<&AlbumId>,
) -> ExtractOutcome {
    let resolved_link = match surface.snapshot().await {
        Ok(snapshot) => extract_link(&snapshot, identifier),
        Err(err) => {
            debug!("snapshot failed during link extraction: {}", err);
            None
        }
    };
    ExtractOutcome { resolved_link }
}

/// Next mutation notification, or pending forever once the watch is gone.
/// Returning `None` tells the caller the channel closed; dropping the watch
/// afterwards keeps the select loop from spinning on a dead receiver.
pub(crate) async fn recv_mutation(watch: &mut Option<mpsc::UnboundedReceiver<()>>) -> Option<()> {
    match watch {
        Some(receiver) => receiver.recv().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "navigator_tests.rs"]
mod tests;
