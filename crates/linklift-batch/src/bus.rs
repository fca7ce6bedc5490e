//! Per-surface agent tasks and the request channel in front of them.
//!
//! Every open surface gets exactly one agent task owning the automation
//! logic for it. Callers talk to the agent over a command channel; each
//! command carries a one-shot reply slot, so one request yields at most
//! one response. A dropped reply means the agent or its surface died
//! mid-flight and surfaces as [`ChannelClosed`].

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use linklift_navigator::{DialogNavigator, ListingScanner, extract_existing};
use linklift_protocols::link::AlbumId;
use linklift_protocols::message::{DisclosureOutcome, ExtractOutcome, ScanOutcome};
use linklift_protocols::surface::Surface;

use crate::error::ChannelClosed;

enum AgentRequest {
    TriggerDisclosure {
        identifier: Option<AlbumId>,
        reply: oneshot::Sender<DisclosureOutcome>,
    },
    ExtractExistingLink {
        identifier: Option<AlbumId>,
        reply: oneshot::Sender<ExtractOutcome>,
    },
    ScanListing {
        identifiers: Vec<AlbumId>,
        reply: oneshot::Sender<ScanOutcome>,
    },
}

/// Handle to one spawned surface agent.
///
/// Dropping the handle aborts the agent task. The surface itself belongs
/// to the session and is torn down there, never here.
pub struct AgentHandle {
    tx: mpsc::Sender<AgentRequest>,
    task: JoinHandle<()>,
}

/// Spawn the agent task serving `surface`.
pub fn spawn_agent(surface: Arc<dyn Surface>) -> AgentHandle {
    let (tx, mut rx) = mpsc::channel(8);
    let task = tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            handle_request(surface.as_ref(), request).await;
        }
        trace!("surface agent loop ended");
    });
    AgentHandle { tx, task }
}

async fn handle_request(surface: &dyn Surface, request: AgentRequest) {
    match request {
        AgentRequest::TriggerDisclosure { identifier, reply } => {
            let outcome = DialogNavigator::new(surface, identifier).run().await;
            if reply.send(outcome).is_err() {
                debug!("disclosure reply dropped, requester gone");
            }
        }
        AgentRequest::ExtractExistingLink { identifier, reply } => {
            let outcome = extract_existing(surface, identifier.as_ref()).await;
            if reply.send(outcome).is_err() {
                debug!("extraction reply dropped, requester gone");
            }
        }
        AgentRequest::ScanListing { identifiers, reply } => {
            let outcome = ListingScanner::new(surface, identifiers).scan().await;
            if reply.send(outcome).is_err() {
                debug!("scan reply dropped, requester gone");
            }
        }
    }
}

impl AgentHandle {
    /// Walk the share-disclosure flow on the agent's surface.
    pub async fn trigger_disclosure(
        &self,
        identifier: Option<AlbumId>,
    ) -> Result<DisclosureOutcome, ChannelClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(AgentRequest::TriggerDisclosure { identifier, reply })
            .await
            .map_err(|_| ChannelClosed)?;
        rx.await.map_err(|_| ChannelClosed)
    }

    /// Read an already-present link without driving any controls.
    pub async fn extract_existing_link(
        &self,
        identifier: Option<AlbumId>,
    ) -> Result<ExtractOutcome, ChannelClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(AgentRequest::ExtractExistingLink { identifier, reply })
            .await
            .map_err(|_| ChannelClosed)?;
        rx.await.map_err(|_| ChannelClosed)
    }

    /// Scan the listing surface for identifier/link pairs.
    pub async fn scan_listing(
        &self,
        identifiers: Vec<AlbumId>,
    ) -> Result<ScanOutcome, ChannelClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(AgentRequest::ScanListing { identifiers, reply })
            .await
            .map_err(|_| ChannelClosed)?;
        rx.await.map_err(|_| ChannelClosed)
    }
}

impl Drop for AgentHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
