//! Error types for the DevTools client.

use linklift_protocols::SurfaceError;
use thiserror::Error;

use super::protocol::CdpRemoteError;

/// DevTools client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Chrome is not reachable on the debugging port.
    #[error("chrome not reachable at {0} (start it with --remote-debugging-port=9222)")]
    ChromeNotAvailable(String),

    /// WebSocket connect failed after discovery succeeded.
    #[error("websocket connect failed: {0}")]
    Connect(String),

    /// The socket or discovery HTTP exchange dropped mid-flight.
    #[error("transport error: {0}")]
    Transport(String),

    /// The browser answered a command with an error payload.
    #[error("browser rejected command: {0}")]
    Remote(#[from] CdpRemoteError),

    /// A reply did not have the shape the caller needs.
    #[error("malformed reply: {0}")]
    Malformed(String),

    /// A frame could not be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Script evaluation threw in the page.
    #[error("script threw: {0}")]
    Script(String),

    /// A command or readiness wait ran out of time.
    #[error("timed out: {0}")]
    Timeout(String),

    /// The session or connection is gone.
    #[error("session closed")]
    SessionClosed,
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::Transport(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Transport(e.to_string())
    }
}

/// Collapse client errors onto the narrower surface taxonomy: script and
/// shape problems are `Script`, lost connections are `Closed`, everything
/// else is transport noise.
impl From<CdpError> for SurfaceError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::Script(msg) => SurfaceError::Script(msg),
            CdpError::Json(e) => SurfaceError::Script(e.to_string()),
            CdpError::Timeout(msg) => SurfaceError::Timeout(msg),
            CdpError::SessionClosed => SurfaceError::Closed,
            other => SurfaceError::Transport(other.to_string()),
        }
    }
}
