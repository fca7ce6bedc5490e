//! Candidate controls enumerated from a rendering surface.

use serde::{Deserialize, Serialize};

/// One clickable element with the accessibility attributes the probes read.
///
/// The host application's markup is unstable; probes match on whatever
/// labeling survives rather than on structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlCandidate {
    /// Surface-local handle used to activate this control later.
    pub handle: u32,
    /// `aria-label`.
    pub label: Option<String>,
    /// Tooltip attribute.
    pub tooltip: Option<String>,
    /// `title`.
    pub title: Option<String>,
    /// `aria-description`.
    pub description: Option<String>,
    /// Framework dispatch-hint attribute, when present.
    pub action_hint: Option<String>,
    /// Trimmed visible text.
    pub text: String,
    /// Whether the element currently has on-screen geometry.
    pub visible: bool,
}

/// Where a control enumeration looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlScope {
    /// The whole document.
    Document,
    /// Inside any currently open dialog region.
    Dialog,
    /// Inside the dialog whose heading matches this text (case-insensitive).
    DialogWithHeading(String),
}

/// How a control is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Plain programmatic click.
    Click,
    /// Full pointer sequence: press, release, click at the element center.
    PointerSequence,
}
