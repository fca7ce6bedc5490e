//! Command and event surface of one attached page.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::client::Transport;
use super::error::CdpError;
use super::protocol::CdpEnvelope;

/// A session attached to a single page/target.
pub struct PageSession {
    target_id: String,
    session_id: String,
    /// Command transport, shared with the owning client.
    transport: Arc<Transport>,
    /// Event receiver, handed out once to whoever consumes page events.
    events: Mutex<Option<mpsc::UnboundedReceiver<CdpEnvelope>>>,
}

impl PageSession {
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        transport: Arc<Transport>,
        event_rx: mpsc::UnboundedReceiver<CdpEnvelope>,
    ) -> Self {
        Self {
            target_id,
            session_id,
            transport,
            events: Mutex::new(Some(event_rx)),
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Take the page event stream. Yields `None` after the first call.
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<CdpEnvelope>> {
        self.events.lock().take()
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    /// Enable the CDP domains this crate drives.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Evaluate a JavaScript expression and return its value.
    ///
    /// Promises are awaited, so `async` page functions can be driven from
    /// here directly.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let params = json!({
            "expression": expression,
            "returnByValue": true,
            "awaitPromise": true,
        });
        let mut reply = self.call("Runtime.evaluate", Some(params)).await?;

        if let Some(details) = reply.get("exceptionDetails") {
            let text = details
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or("unhandled script exception");
            return Err(CdpError::Script(text.to_string()));
        }

        Ok(reply
            .pointer_mut("/result/value")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    /// Expose a named binding callable from page scripts.
    ///
    /// Calls surface as `Runtime.bindingCalled` events on this session.
    pub async fn add_binding(&self, name: &str) -> Result<(), CdpError> {
        self.call("Runtime.addBinding", Some(json!({"name": name})))
            .await?;
        Ok(())
    }

    /// Wait until the document reports `readyState === "complete"`.
    ///
    /// Evaluation errors while the page is still navigating (no execution
    /// context yet) count as not-ready and are retried.
    pub async fn wait_for_ready(&self, timeout: Duration) -> Result<(), CdpError> {
        let start = tokio::time::Instant::now();

        loop {
            match self.evaluate("document.readyState").await {
                Ok(state) if state.as_str() == Some("complete") => return Ok(()),
                Ok(state) => trace!("readyState = {:?}", state.as_str()),
                Err(e) => trace!("readyState probe failed: {}", e),
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout("document readiness".to_string()));
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
}
