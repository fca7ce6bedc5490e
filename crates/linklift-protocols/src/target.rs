//! Batch target records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::link::ShareLink;

/// Lifecycle of one target as the orchestrator drives it.
///
/// Only the orchestrator mutates a target's status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetStatus {
    /// Waiting for the orchestrator to pick it up.
    #[default]
    Pending,
    /// A surface is open and the disclosure flow is being driven.
    Triggering,
    /// The disclosure flow was clicked through but no link was captured yet.
    Triggered,
    /// A listing scan covering this target is running.
    Collecting,
    /// A share link was captured and recorded.
    Linked,
    /// No link could be captured.
    Failed,
}

impl TargetStatus {
    /// Terminal statuses never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TargetStatus::Linked | TargetStatus::Failed)
    }

    /// Simplified user-facing bucket; finer causes are diagnostics only.
    pub fn bucket(&self) -> &'static str {
        match self {
            TargetStatus::Pending => "pending",
            TargetStatus::Triggering | TargetStatus::Triggered | TargetStatus::Collecting => {
                "working"
            }
            TargetStatus::Linked => "succeeded",
            TargetStatus::Failed => "failed",
        }
    }
}

/// One album awaiting a discovered share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Stable id for logs and records.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Album page URL the automation opens.
    pub source_url: String,
    /// Human-readable album title.
    pub display_name: String,
    /// Preview image reference, if one was discovered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_ref: Option<String>,
    /// The captured share link, populated on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_link: Option<ShareLink>,
    #[serde(default)]
    pub status: TargetStatus,
    /// Failure cause for diagnostics, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Target {
    /// Create a pending target.
    pub fn new(source_url: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_url: source_url.into(),
            display_name: display_name.into(),
            preview_ref: None,
            result_link: None,
            status: TargetStatus::Pending,
            last_error: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a preview reference.
    pub fn with_preview(mut self, preview_ref: impl Into<String>) -> Self {
        self.preview_ref = Some(preview_ref.into());
        self
    }

    /// Record the captured link and mark the target linked.
    pub fn mark_linked(&mut self, link: ShareLink) {
        self.result_link = Some(link);
        self.last_error = None;
        self.status = TargetStatus::Linked;
    }

    /// Mark the target failed with a diagnostic cause.
    pub fn mark_failed(&mut self, cause: impl Into<String>) {
        self.last_error = Some(cause.into());
        self.status = TargetStatus::Failed;
    }
}

/// Hand-off record for one successfully linked target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffRecord {
    pub display_name: String,
    pub result_link: ShareLink,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_ref: Option<String>,
}

impl HandoffRecord {
    /// Build the hand-off list: linked targets only, input order preserved.
    ///
    /// Targets without a real captured link are excluded entirely; a raw
    /// source URL is never substituted.
    pub fn from_targets(targets: &[Target]) -> Vec<HandoffRecord> {
        targets
            .iter()
            .filter(|t| t.status == TargetStatus::Linked)
            .filter_map(|t| {
                let result_link = t.result_link.clone()?;
                Some(HandoffRecord {
                    display_name: t.display_name.clone(),
                    result_link,
                    preview_ref: t.preview_ref.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
