//! A CDP page exposed as a rendering surface.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use linklift_protocols::{
    ControlCandidate, ControlScope, DocumentSnapshot, Gesture, Surface, SurfaceError,
};

use crate::cdp::{CdpClient, CdpError, PageSession};
use crate::scripts;

/// Binding name the injected observer calls to report structural mutations.
const MUTATION_BINDING: &str = "__linklift_notify";

/// One Chrome tab driven through a [`PageSession`].
///
/// Mutation notifications flow from the injected observer through
/// `Runtime.bindingCalled` events into per-watcher channels.
pub struct PageSurface {
    session: PageSession,
    client: Arc<CdpClient>,
    watchers: Arc<Mutex<Vec<mpsc::UnboundedSender<()>>>>,
    observer_installed: AtomicBool,
    closed: AtomicBool,
    forward_task: Option<tokio::task::JoinHandle<()>>,
}

impl PageSurface {
    /// Wrap an attached page session. Takes over the session's event
    /// stream for mutation forwarding.
    pub fn new(session: PageSession, client: Arc<CdpClient>) -> Self {
        let watchers: Arc<Mutex<Vec<mpsc::UnboundedSender<()>>>> =
            Arc::new(Mutex::new(Vec::new()));

        // Drain this page's CDP events, fanning mutation notifications out
        // to every live watcher.
        let forward_task = session.take_events().map(|mut event_rx| {
            let watchers = watchers.clone();
            tokio::spawn(async move {
                while let Some(event) = event_rx.recv().await {
                    if event.event_name() != Some("Runtime.bindingCalled") {
                        continue;
                    }
                    let name = event.params.as_ref().and_then(|p| p["name"].as_str());
                    if name != Some(MUTATION_BINDING) {
                        continue;
                    }
                    watchers.lock().retain(|tx| tx.send(()).is_ok());
                }
            })
        });

        Self {
            session,
            client,
            watchers,
            observer_installed: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            forward_task,
        }
    }

    /// The underlying page session, for callers that need raw evaluation.
    pub fn session(&self) -> &PageSession {
        &self.session
    }

    async fn install_observer(&self) -> Result<(), CdpError> {
        self.session.add_binding(MUTATION_BINDING).await?;
        self.session.evaluate(&scripts::observer_script()).await?;
        debug!(
            "Installed mutation observer on target {}",
            self.session.target_id()
        );
        Ok(())
    }
}

#[async_trait]
impl Surface for PageSurface {
    async fn wait_ready(&self, timeout: Duration) -> Result<(), SurfaceError> {
        self.session.wait_for_ready(timeout).await?;
        Ok(())
    }

    async fn snapshot(&self) -> Result<DocumentSnapshot, SurfaceError> {
        let value = self.session.evaluate(&scripts::snapshot_script()).await?;
        let snapshot: DocumentSnapshot = serde_json::from_value(value).map_err(CdpError::from)?;
        trace!(
            "Snapshot: {} fields, {} dialogs, {} anchors, {} blobs",
            snapshot.field_values.len(),
            snapshot.dialog_count(),
            snapshot.anchor_hrefs.len(),
            snapshot.script_blobs.len()
        );
        Ok(snapshot)
    }

    async fn controls(
        &self,
        scope: &ControlScope,
    ) -> Result<Vec<ControlCandidate>, SurfaceError> {
        let scope_json = match scope {
            ControlScope::Document => json!({"kind": "document"}),
            ControlScope::Dialog => json!({"kind": "dialog"}),
            ControlScope::DialogWithHeading(heading) => {
                json!({"kind": "dialogWithHeading", "heading": heading})
            }
        };
        let script = scripts::controls_script(&scope_json.to_string());
        let value = self.session.evaluate(&script).await?;
        let candidates: Vec<ControlCandidate> =
            serde_json::from_value(value).map_err(CdpError::from)?;
        Ok(candidates)
    }

    async fn activate(
        &self,
        control: &ControlCandidate,
        gesture: Gesture,
    ) -> Result<(), SurfaceError> {
        let args = json!({
            "handle": control.handle,
            "gesture": match gesture {
                Gesture::Click => "click",
                Gesture::PointerSequence => "pointer",
            },
        });
        let value = self
            .session
            .evaluate(&scripts::activate_script(&args.to_string()))
            .await?;

        if value["stale"].as_bool().unwrap_or(false) {
            return Err(SurfaceError::StaleControl);
        }
        if !value["ok"].as_bool().unwrap_or(false) {
            return Err(SurfaceError::Script("activation rejected".to_string()));
        }
        Ok(())
    }

    async fn watch_mutations(&self) -> Result<mpsc::UnboundedReceiver<()>, SurfaceError> {
        if !self.observer_installed.swap(true, Ordering::SeqCst) {
            if let Err(e) = self.install_observer().await {
                self.observer_installed.store(false, Ordering::SeqCst);
                return Err(e.into());
            }
        }
        let (tx, rx) = mpsc::unbounded_channel();
        self.watchers.lock().push(tx);
        Ok(rx)
    }

    async fn close(&self) -> Result<(), SurfaceError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        debug!("Closing surface for target {}", self.session.target_id());
        self.client
            .close_page(self.session.target_id(), self.session.session_id())
            .await?;
        Ok(())
    }
}

impl Drop for PageSurface {
    fn drop(&mut self) {
        if let Some(task) = self.forward_task.take() {
            task.abort();
        }
    }
}
