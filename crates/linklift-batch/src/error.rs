//! Batch-level failure taxonomy.

use std::fmt;

use thiserror::Error;

/// Why a target finished without a link.
///
/// Recorded on the target as a short stable slug; log lines carry the
/// longer diagnostic detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The share entry point never appeared in the rendered page.
    ControlNotFound,
    /// Clicks landed but no link surfaced before the deadline.
    DisclosureTimeout,
    /// The listing scan refused to pair the identifier with a link.
    AmbiguousMatch,
    /// The surface agent went away before answering.
    ChannelClosed,
    /// The surface could not be opened at all.
    SurfaceCreation,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::ControlNotFound => "control-not-found",
            FailureKind::DisclosureTimeout => "disclosure-timeout",
            FailureKind::AmbiguousMatch => "ambiguous-match",
            FailureKind::ChannelClosed => "channel-closed",
            FailureKind::SurfaceCreation => "surface-creation-failed",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The surface agent dropped its reply slot before responding.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("surface agent closed before replying")]
pub struct ChannelClosed;

/// Errors that reject a batch before any surface opens.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Two targets resolve to the same album identifier.
    #[error("duplicate album identifier in batch: {0}")]
    DuplicateIdentifier(String),
}
