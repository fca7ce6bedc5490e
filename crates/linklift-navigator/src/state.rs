//! Navigator lifecycle states and the legal transitions between them.
//!
//! The disclosure flow is driven by timers and mutation notifications, both
//! of which can fire after the flow has already settled. Transitions go
//! through [`NavigatorState::accepts`] so a stray wake-up can never move a
//! finished session.

/// Lifecycle of one disclosure flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorState {
    /// Created, nothing attempted yet.
    Idle,
    /// Polling the document for the control that opens the disclosure.
    AwaitingPrimaryControl,
    /// Primary control activated.
    PrimaryClicked,
    /// Waiting for the first disclosure dialog to render.
    AwaitingStage1Disclosure,
    /// First-stage navigation control activated.
    Stage1Clicked,
    /// Waiting for the confirmation dialog to render.
    AwaitingStage2Disclosure,
    /// Confirmation control activated.
    Stage2Clicked,
    /// All clicks done; watching for the minted link.
    AwaitingLink,
    /// A link was captured.
    Resolved,
    /// The await deadline elapsed without a link.
    TimedOut,
    /// The primary control never appeared.
    NotFound,
}

impl NavigatorState {
    /// Whether this state ends the flow. Terminal states accept no successor.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::TimedOut | Self::NotFound)
    }

    /// Whether `next` is a legal successor of `self`.
    ///
    /// Either disclosure wait may skip straight to [`Self::AwaitingLink`]
    /// when its settle window lapses; some accounts surface the link without
    /// the full two-stage dialog.
    pub fn accepts(self, next: NavigatorState) -> bool {
        use NavigatorState::*;
        match (self, next) {
            (Idle, AwaitingPrimaryControl | Resolved) => true,
            (AwaitingPrimaryControl, PrimaryClicked | Resolved | NotFound | TimedOut) => true,
            (PrimaryClicked, AwaitingStage1Disclosure | Resolved | TimedOut) => true,
            (AwaitingStage1Disclosure, Stage1Clicked | AwaitingLink | Resolved | TimedOut) => true,
            (Stage1Clicked, AwaitingStage2Disclosure | Resolved | TimedOut) => true,
            (AwaitingStage2Disclosure, Stage2Clicked | AwaitingLink | Resolved | TimedOut) => true,
            (Stage2Clicked, AwaitingLink | Resolved | TimedOut) => true,
            (AwaitingLink, Resolved | TimedOut) => true,
            _ => false,
        }
    }
}
