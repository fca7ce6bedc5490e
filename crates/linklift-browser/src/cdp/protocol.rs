//! Wire types for the DevTools protocol.
//!
//! Outgoing frames are commands correlated by `id`. Incoming frames are
//! either replies (`id` set) or unsolicited events (`method` set); both
//! carry a `sessionId` when scoped to an attached page.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Outgoing command frame.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl CdpRequest {
    /// Build a command frame, scoped to a page session when one is given.
    pub(crate) fn new(id: u64, method: &str, params: Option<Value>, session: Option<&str>) -> Self {
        Self {
            id,
            method: method.to_owned(),
            params,
            session_id: session.map(str::to_owned),
        }
    }
}

/// Incoming frame, reply or event.
#[derive(Debug, Deserialize)]
pub struct CdpEnvelope {
    pub id: Option<u64>,
    result: Option<Value>,
    error: Option<CdpRemoteError>,
    method: Option<String>,
    pub params: Option<Value>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

impl CdpEnvelope {
    /// Reply payload, with a browser-reported failure folded into `Err`.
    ///
    /// A reply with neither `result` nor `error` yields `Value::Null`.
    pub fn into_reply(self) -> Result<Value, CdpRemoteError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }

    /// Event name, for unsolicited frames.
    pub fn event_name(&self) -> Option<&str> {
        self.method.as_deref()
    }
}

/// Failure payload the browser attaches to a rejected command.
#[derive(Debug, Deserialize, Error)]
#[error("{message} (code {code})")]
pub struct CdpRemoteError {
    pub code: i64,
    pub message: String,
}

/// One page entry from the `/json` discovery endpoints.
///
/// Chrome reports more fields (type, frontend URLs); only what the crate
/// reads is kept here.
#[derive(Debug, Clone, Deserialize)]
pub struct PageDescriptor {
    pub id: String,
    pub url: String,
}

/// Subset of the `/json/version` reply the crate cares about.
///
/// Chrome uses PascalCase names on this endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserInfo {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
