//! # LinkLift Protocols
//!
//! Shared data types and the surface traits every LinkLift crate builds on.
//! Contains only interface definitions - no implementations.

pub mod control;
pub mod error;
pub mod limits;
pub mod link;
pub mod message;
pub mod snapshot;
pub mod surface;
pub mod target;

pub use control::{ControlCandidate, ControlScope, Gesture};
pub use error::SurfaceError;
pub use link::{AlbumId, ShareLink};
pub use message::{DisclosureOutcome, ExtractOutcome, ScanOutcome};
pub use snapshot::{AlbumCard, DocumentSnapshot};
pub use surface::{Surface, SurfaceHost};
pub use target::{HandoffRecord, Target, TargetStatus};
