//! Scoped surface sessions.
//!
//! A session owns exactly one surface and the agent task attached to it.
//! Teardown is explicit and idempotent; every orchestrator exit path
//! funnels through it so no page outlives its target.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::time;
use tracing::{debug, warn};

use linklift_protocols::error::SurfaceError;
use linklift_protocols::limits::{READY_TIMEOUT, STAGE_SETTLE};
use linklift_protocols::surface::{Surface, SurfaceHost};

use crate::bus::{AgentHandle, spawn_agent};

/// One surface plus its agent, torn down exactly once.
pub struct AutomationSession {
    surface: Arc<dyn Surface>,
    agent: AgentHandle,
    closed: AtomicBool,
}

impl fmt::Debug for AutomationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutomationSession")
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl AutomationSession {
    /// Open a surface on `url` and attach an agent to it.
    pub async fn open(host: &dyn SurfaceHost, url: &str) -> Result<Self, SurfaceError> {
        let surface = host.open(url).await?;
        let agent = spawn_agent(surface.clone());
        Ok(Self {
            surface,
            agent,
            closed: AtomicBool::new(false),
        })
    }

    /// Wait for document readiness plus the render settle the app needs.
    ///
    /// Readiness failures are logged, not fatal; the control polls
    /// tolerate a late render.
    pub async fn settle(&self) {
        if let Err(err) = self.surface.wait_ready(READY_TIMEOUT).await {
            debug!("readiness wait failed: {}", err);
        }
        time::sleep(STAGE_SETTLE).await;
    }

    pub fn agent(&self) -> &AgentHandle {
        &self.agent
    }

    /// Close the surface. Safe to call from multiple exit paths; only the
    /// first call reaches the surface.
    pub async fn teardown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(err) = self.surface.close().await {
            warn!("surface close failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use linklift_protocols::control::{ControlCandidate, ControlScope, Gesture};
    use linklift_protocols::snapshot::DocumentSnapshot;

    use super::*;

    #[derive(Default)]
    struct CountingSurface {
        closes: AtomicU32,
    }

    #[async_trait]
    impl Surface for CountingSurface {
        async fn wait_ready(&self, _timeout: Duration) -> Result<(), SurfaceError> {
            Ok(())
        }

        async fn snapshot(&self) -> Result<DocumentSnapshot, SurfaceError> {
            Ok(DocumentSnapshot::default())
        }

        async fn controls(
            &self,
            _scope: &ControlScope,
        ) -> Result<Vec<ControlCandidate>, SurfaceError> {
            Ok(Vec::new())
        }

        async fn activate(
            &self,
            _control: &ControlCandidate,
            _gesture: Gesture,
        ) -> Result<(), SurfaceError> {
            Ok(())
        }

        async fn watch_mutations(&self) -> Result<mpsc::UnboundedReceiver<()>, SurfaceError> {
            Err(SurfaceError::Transport("no observer".to_string()))
        }

        async fn close(&self) -> Result<(), SurfaceError> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct SingleSurfaceHost {
        surface: Arc<CountingSurface>,
    }

    #[async_trait]
    impl SurfaceHost for SingleSurfaceHost {
        async fn open(&self, _url: &str) -> Result<Arc<dyn Surface>, SurfaceError> {
            Ok(self.surface.clone() as Arc<dyn Surface>)
        }
    }

    struct RefusingHost;

    #[async_trait]
    impl SurfaceHost for RefusingHost {
        async fn open(&self, _url: &str) -> Result<Arc<dyn Surface>, SurfaceError> {
            Err(SurfaceError::Transport("launch refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_teardown_closes_surface_once() {
        let surface = Arc::new(CountingSurface::default());
        let host = SingleSurfaceHost {
            surface: surface.clone(),
        };
        let session = AutomationSession::open(&host, "https://photos.google.com/albums")
            .await
            .unwrap();
        session.teardown().await;
        session.teardown().await;
        assert_eq!(surface.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_open_propagates_host_failure() {
        let err = AutomationSession::open(&RefusingHost, "https://photos.google.com/albums")
            .await
            .unwrap_err();
        assert!(matches!(err, SurfaceError::Transport(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_out_the_render_lapse() {
        let surface = Arc::new(CountingSurface::default());
        let host = SingleSurfaceHost {
            surface: surface.clone(),
        };
        let session = AutomationSession::open(&host, "https://photos.google.com/albums")
            .await
            .unwrap();
        let started = tokio::time::Instant::now();
        session.settle().await;
        assert!(started.elapsed() >= STAGE_SETTLE);
        session.teardown().await;
    }
}
