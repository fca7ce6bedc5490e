//! Prioritized control probes over enumerated candidates.
//!
//! The host app's markup is unstable, so controls are located by whatever
//! labeling survives a redesign. Each strategy is a named probe; probes run
//! in trust order and the list is testable without any surface attached.

use std::sync::LazyLock;

use linklift_protocols::ControlCandidate;
use regex::Regex;

/// Heading text that uniquely identifies the confirmation dialog.
///
/// Both dialog stages label their controls "Create link"; only the heading
/// tells the two apart, so the second-stage search is scoped by it.
pub const CONFIRM_DIALOG_HEADING: &str = "create link to share";

/// Labels of the first-stage control that opens the link disclosure.
pub const DISCLOSURE_LABELS: [&str; 4] = [
    "create link",
    "get link",
    "turn on link sharing",
    "get shareable link",
];

/// Label of the terminal action inside the confirmation dialog.
pub const CONFIRM_LABEL: &str = "create link";

static SHARE_CONTROL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^share(\s+album)?$").unwrap());

/// One matching strategy for the primary share control.
pub struct ControlProbe {
    /// Name reported in diagnostics when this probe selects the control.
    pub name: &'static str,
    matches: fn(&ControlCandidate) -> bool,
}

/// Probes for the control that opens the share disclosure, in trust order.
///
/// Exact attribute labels come first; free visible text is the last resort
/// because unrelated controls can collapse to similar text.
pub static PRIMARY_PROBES: [ControlProbe; 4] = [
    ControlProbe {
        name: "attribute-label",
        matches: attribute_label,
    },
    ControlProbe {
        name: "accessible-name",
        matches: accessible_name,
    },
    ControlProbe {
        name: "action-hint",
        matches: action_hint,
    },
    ControlProbe {
        name: "visible-text",
        matches: visible_text,
    },
];

/// First candidate matched by the highest-priority probe.
///
/// Probe order dominates: a low-trust match early in the document never
/// beats a high-trust match later in it. Within one probe, document order
/// decides. Returns the probe name alongside the control for diagnostics.
pub fn select_primary(
    candidates: &[ControlCandidate],
) -> Option<(&ControlCandidate, &'static str)> {
    PRIMARY_PROBES.iter().find_map(|probe| {
        candidates
            .iter()
            .find(|candidate| (probe.matches)(candidate))
            .map(|candidate| (candidate, probe.name))
    })
}

/// First-stage navigation control, by disclosure label.
///
/// Visible candidates win; when none is visible the first hidden match is
/// used as a fallback, since the host app sometimes keeps the control
/// styled away while it still responds to activation.
pub fn select_disclosure(candidates: &[ControlCandidate]) -> Option<&ControlCandidate> {
    let mut hidden = None;
    for candidate in candidates {
        let name = control_name(candidate);
        if !DISCLOSURE_LABELS.iter().any(|label| name.starts_with(label)) {
            continue;
        }
        if candidate.visible {
            return Some(candidate);
        }
        if hidden.is_none() {
            hidden = Some(candidate);
        }
    }
    hidden
}

/// Terminal action control inside the confirmation dialog.
///
/// Visible candidates only. Callers must already have scoped enumeration to
/// the confirmation dialog; the first stage keeps an identically labeled
/// control that must never be re-activated.
pub fn select_confirm(candidates: &[ControlCandidate]) -> Option<&ControlCandidate> {
    candidates
        .iter()
        .find(|candidate| candidate.visible && control_name(candidate).starts_with(CONFIRM_LABEL))
}

fn attribute_label(candidate: &ControlCandidate) -> bool {
    [&candidate.label, &candidate.tooltip, &candidate.title]
        .into_iter()
        .filter_map(|value| value.as_deref())
        .any(|value| value == "Share album" || value == "Share")
}

fn accessible_name(candidate: &ControlCandidate) -> bool {
    first_populated(&[
        &candidate.label,
        &candidate.tooltip,
        &candidate.title,
        &candidate.description,
    ])
    .is_some_and(|name| SHARE_CONTROL_RE.is_match(name.trim()))
}

fn action_hint(candidate: &ControlCandidate) -> bool {
    candidate.action_hint.as_deref().is_some_and(|hint| {
        let hint = hint.to_ascii_lowercase();
        hint.contains("share") && !hint.contains("unshare") && !hint.contains("reshare")
    })
}

fn visible_text(candidate: &ControlCandidate) -> bool {
    SHARE_CONTROL_RE.is_match(candidate.text.trim())
}

/// Visible text when present, otherwise the accessible label, lowercased.
fn control_name(candidate: &ControlCandidate) -> String {
    let text = candidate.text.trim();
    let name = if text.is_empty() {
        candidate.label.as_deref().unwrap_or("").trim()
    } else {
        text
    };
    name.to_lowercase()
}

/// First field that holds a non-blank value. Later fields are masked even
/// when they would match.
fn first_populated<'a>(values: &[&'a Option<String>]) -> Option<&'a str> {
    values
        .iter()
        .filter_map(|value| value.as_deref())
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
#[path = "probes_tests.rs"]
mod tests;
