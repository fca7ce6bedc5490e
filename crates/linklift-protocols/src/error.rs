//! Surface-boundary errors.

use thiserror::Error;

/// Failures crossing the surface seam.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface transport failed: {0}")]
    Transport(String),

    #[error("script evaluation failed: {0}")]
    Script(String),

    #[error("control is no longer attached to the document")]
    StaleControl,

    #[error("surface is closed")]
    Closed,

    #[error("timed out waiting for {0}")]
    Timeout(String),
}
