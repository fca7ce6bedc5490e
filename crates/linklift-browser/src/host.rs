//! Surface host backed by a lazily-connected CDP client.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use linklift_protocols::limits::{READY_TIMEOUT, STAGE_SETTLE};
use linklift_protocols::{AlbumCard, Surface, SurfaceError, SurfaceHost};

use crate::cdp::{CdpClient, CdpError, PageSession};
use crate::launcher::{ChromeLauncher, LauncherConfig};
use crate::scripts;
use crate::surface::PageSurface;

/// Opens Chrome tabs as rendering surfaces.
///
/// The browser is NOT touched at construction time; the first `open` call
/// makes sure Chrome is running and connects the CDP client.
pub struct CdpHost {
    launcher: ChromeLauncher,
    client: RwLock<Option<Arc<CdpClient>>>,
}

impl CdpHost {
    pub fn new(config: LauncherConfig) -> Self {
        Self {
            launcher: ChromeLauncher::new(config),
            client: RwLock::new(None),
        }
    }

    /// Get the connected CDP client, launching Chrome and connecting on
    /// first use.
    async fn ensure_connected(&self) -> Result<Arc<CdpClient>, SurfaceError> {
        if let Some(client) = self.client.read().await.clone() {
            return Ok(client);
        }

        let mut slot = self.client.write().await;
        if let Some(client) = slot.clone() {
            return Ok(client);
        }

        self.launcher.ensure_running().await?;
        let client = Arc::new(CdpClient::connect(&self.launcher.endpoint()).await?);
        info!("Connected to Chrome at {}", self.launcher.endpoint());

        *slot = Some(client.clone());
        Ok(client)
    }

    /// Scrape album tiles from the listing page.
    ///
    /// Opens the listing in its own tab, lets the SPA render its tiles,
    /// evaluates the scrape script, and closes the tab again.
    pub async fn scrape_albums(&self, listing_url: &str) -> Result<Vec<AlbumCard>, SurfaceError> {
        let client = self.ensure_connected().await?;
        let session = client.new_page(listing_url).await?;

        let result = Self::collect_albums(&session).await;

        let _ = client
            .close_page(session.target_id(), session.session_id())
            .await;
        result
    }

    async fn collect_albums(session: &PageSession) -> Result<Vec<AlbumCard>, SurfaceError> {
        session.wait_for_ready(READY_TIMEOUT).await?;
        // Tiles render asynchronously after the document is complete.
        tokio::time::sleep(STAGE_SETTLE).await;

        let value = session.evaluate(&scripts::albums_script()).await?;
        let cards: Vec<AlbumCard> = serde_json::from_value(value).map_err(CdpError::from)?;
        info!("Scraped {} album tiles from listing", cards.len());
        Ok(cards)
    }

    /// Disconnect and shut down Chrome if this host launched it.
    pub async fn shutdown(&self) {
        self.client.write().await.take();
        self.launcher.shutdown().await;
    }
}

#[async_trait]
impl SurfaceHost for CdpHost {
    async fn open(&self, url: &str) -> Result<Arc<dyn Surface>, SurfaceError> {
        let client = self.ensure_connected().await?;
        let session = client.new_page(url).await?;
        Ok(Arc::new(PageSurface::new(session, client)))
    }
}
