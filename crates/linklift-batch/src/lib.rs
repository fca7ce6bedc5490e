//! Batch orchestration for share-link capture.
//!
//! One surface serves one session at a time: sequential batches open a
//! page per target, the listing scan resolves many targets off a single
//! shared-items page. Surfaces come from a [`SurfaceHost`] and are torn
//! down by the session that opened them.
//!
//! [`SurfaceHost`]: linklift_protocols::surface::SurfaceHost

pub mod bus;
pub mod discover;
pub mod error;
pub mod orchestrator;
pub mod session;

pub use bus::{AgentHandle, spawn_agent};
pub use discover::{assemble_targets, normalize_preview_url};
pub use error::{BatchError, ChannelClosed, FailureKind};
pub use orchestrator::{BatchMode, Orchestrator};
pub use session::AutomationSession;
