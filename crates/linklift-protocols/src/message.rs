//! Request/response payloads exchanged over the orchestrator's message bus.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::link::{AlbumId, ShareLink};

/// Reply to a `TriggerDisclosure` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclosureOutcome {
    /// Captured link, when the flow resolved one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_link: Option<ShareLink>,
    /// Whether the primary control was ever found.
    pub control_found: bool,
    /// Poll attempts spent looking for the primary control.
    pub attempts: u32,
    /// Surface-level failure cause, for diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

/// Reply to an `ExtractExistingLink` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_link: Option<ShareLink>,
}

/// Reply to a `ScanListingForLinks` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanOutcome {
    /// Identifier-to-link assignments the proximity matcher committed.
    ///
    /// Absence means unresolved; a fallback link is never synthesized.
    pub matches: BTreeMap<AlbumId, ShareLink>,
}
