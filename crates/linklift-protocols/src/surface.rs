//! The seam between the automation logic and a real rendering surface.
//!
//! Production surfaces are DevTools-protocol pages; tests substitute
//! scripted fakes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::control::{ControlCandidate, ControlScope, Gesture};
use crate::error::SurfaceError;
use crate::snapshot::DocumentSnapshot;

/// One isolated rendering surface hosting a single automation session.
#[async_trait]
pub trait Surface: Send + Sync {
    /// Wait until the document reports itself complete.
    async fn wait_ready(&self, timeout: Duration) -> Result<(), SurfaceError>;

    /// Capture everything the pattern extractor searches.
    async fn snapshot(&self) -> Result<DocumentSnapshot, SurfaceError>;

    /// Enumerate candidate controls within `scope`, in document order.
    async fn controls(&self, scope: &ControlScope)
    -> Result<Vec<ControlCandidate>, SurfaceError>;

    /// Activate a previously enumerated control.
    ///
    /// Fails with [`SurfaceError::StaleControl`] when the element was
    /// detached since enumeration; callers re-enumerate and retry.
    async fn activate(
        &self,
        control: &ControlCandidate,
        gesture: Gesture,
    ) -> Result<(), SurfaceError>;

    /// Structural-change notifications for the document.
    ///
    /// Delivery is best effort: backgrounded surfaces throttle observers, so
    /// link watches always pair this with a fixed fallback poll.
    async fn watch_mutations(&self) -> Result<mpsc::UnboundedReceiver<()>, SurfaceError>;

    /// Tear the surface down. Idempotent.
    async fn close(&self) -> Result<(), SurfaceError>;
}

/// Opens rendering surfaces on whatever browser hosts them.
#[async_trait]
pub trait SurfaceHost: Send + Sync {
    /// Open a new surface already navigating to `url`.
    async fn open(&self, url: &str) -> Result<Arc<dyn Surface>, SurfaceError>;
}
