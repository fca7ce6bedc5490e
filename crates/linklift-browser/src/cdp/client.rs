//! Browser-level CDP connection and frame routing.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserInfo, CdpEnvelope, CdpRequest, PageDescriptor};
use super::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Every in-flight command must be answered or dropped within this window.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pending request waiting for its response.
struct PendingRequest {
    tx: oneshot::Sender<Result<Value, CdpError>>,
}

/// Correlation state shared between the sender side and the receive loop:
/// request ids map to reply slots, page session ids map to event channels.
#[derive(Default)]
pub(crate) struct Router {
    pending: Mutex<HashMap<u64, PendingRequest>>,
    events: Mutex<HashMap<String, mpsc::UnboundedSender<CdpEnvelope>>>,
}

impl Router {
    /// Open an event channel for an attached page session.
    pub(crate) fn subscribe(&self, session_id: &str) -> mpsc::UnboundedReceiver<CdpEnvelope> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events.lock().insert(session_id.to_string(), tx);
        rx
    }

    /// Drop a page session's event channel.
    pub(crate) fn unsubscribe(&self, session_id: &str) {
        self.events.lock().remove(session_id);
    }

    /// Route one incoming frame to its reply slot or event channel.
    fn dispatch(&self, text: &str) {
        let frame = match serde_json::from_str::<CdpEnvelope>(text) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Dropping unparseable frame: {}", e);
                return;
            }
        };

        if let Some(id) = frame.id {
            // Late replies (after a call timeout) find no slot; drop them.
            if let Some(slot) = self.pending.lock().remove(&id) {
                let _ = slot.tx.send(frame.into_reply().map_err(CdpError::from));
            }
            return;
        }

        if frame.event_name().is_none() {
            return;
        }
        let key = frame.session_id.clone().unwrap_or_default();
        if let Some(tx) = self.events.lock().get(&key) {
            let _ = tx.send(frame);
        }
    }
}

/// Command transport shared by the browser-level client and every attached
/// page session: one WebSocket sink, one id counter, one router.
pub(crate) struct Transport {
    ws_tx: tokio::sync::Mutex<WsSink>,
    next_id: AtomicU64,
    pub(crate) router: Router,
}

impl Transport {
    fn new(ws_tx: WsSink) -> Self {
        Self {
            ws_tx: tokio::sync::Mutex::new(ws_tx),
            next_id: AtomicU64::new(1),
            router: Router::default(),
        }
    }

    /// Send a CDP command and wait for its response.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let frame = CdpRequest::new(id, method, params, session_id);

        let json = serde_json::to_string(&frame)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.router.pending.lock().insert(id, PendingRequest { tx });

        {
            let mut ws = self.ws_tx.lock().await;
            ws.send(Message::Text(json.into())).await?;
        }

        match tokio::time::timeout(REQUEST_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.router.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }
}

/// Connection to one Chrome instance.
///
/// Owns the browser-level WebSocket and hands out [`PageSession`]s for
/// individual tabs.
pub struct CdpClient {
    /// HTTP endpoint for page discovery.
    http_endpoint: String,
    /// Browser WebSocket URL.
    browser_ws_url: String,
    /// Shared command transport.
    transport: Arc<Transport>,
    /// Background receive task handle.
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to the Chrome debugging endpoint, e.g. `http://localhost:9222`.
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();

        // The version endpoint doubles as liveness probe and carries the
        // browser-level WebSocket URL.
        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Probing {}", version_url);

        let info: BrowserInfo = reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?;

        debug!("Found browser: {}", info.browser);

        let browser_ws_url = info.web_socket_debugger_url;

        let (ws_stream, _) = tokio_tungstenite::connect_async(&browser_ws_url)
            .await
            .map_err(|e| CdpError::Connect(e.to_string()))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let transport = Arc::new(Transport::new(ws_sink));

        let recv_task = {
            let transport = transport.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, transport).await;
            })
        };

        debug!("Attached to browser socket {}", browser_ws_url);

        Ok(Self {
            http_endpoint,
            browser_ws_url,
            transport,
            recv_task,
        })
    }

    /// WebSocket receive loop.
    async fn receive_loop(mut ws_source: WsSource, transport: Arc<Transport>) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    transport.router.dispatch(&text);
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    }

    /// Send a browser-level CDP command and wait for its response.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    /// Get the browser WebSocket URL.
    pub fn browser_ws_url(&self) -> &str {
        &self.browser_ws_url
    }

    /// Create a new page already navigating to `url` and attach to it.
    pub async fn new_page(&self, url: &str) -> Result<PageSession, CdpError> {
        // Chrome requires PUT for /json/new.
        let create_url = format!("{}/json/new?{}", self.http_endpoint, url);

        let client = reqwest::Client::new();
        let page: PageDescriptor = client.put(&create_url).send().await?.json().await?;
        debug!("Opened page {} at {}", page.id, page.url);

        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": page.id.as_str(),
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::Malformed("attachToTarget reply lacks sessionId".to_string()))?
            .to_string();

        let event_rx = self.transport.router.subscribe(&session_id);

        let session = PageSession::new(page.id, session_id, self.transport.clone(), event_rx);
        session.enable_domains().await?;

        Ok(session)
    }

    /// Close a page and release its event channel.
    pub async fn close_page(&self, target_id: &str, session_id: &str) -> Result<(), CdpError> {
        self.transport.router.unsubscribe(session_id);
        self.call("Target.closeTarget", Some(json!({"targetId": target_id})))
            .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
