//! Fixed timing contract of the automation flow.
//!
//! These are constants rather than configuration: they encode how the host
//! application renders, not operator preference.

use std::time::Duration;

/// Interval between polls for the primary share control.
pub const PRIMARY_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Bounded attempt count for the primary share control (~10 s total).
pub const PRIMARY_POLL_ATTEMPTS: u32 = 20;

/// Settle delay after surface readiness and after each stage activation.
pub const STAGE_SETTLE: Duration = Duration::from_secs(5);

/// Hard deadline for the link watch once the primary control was clicked.
pub const LINK_AWAIT: Duration = Duration::from_secs(18);

/// Fallback poll interval while watching for the link.
pub const LINK_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// Period of the diagnostic state snapshot while a session runs.
pub const DIAGNOSTIC_INTERVAL: Duration = Duration::from_secs(3);

/// Deadline for one whole-batch listing scan.
pub const LISTING_SCAN_WINDOW: Duration = Duration::from_secs(45);

/// Hard per-target session deadline; firing it tears the surface down.
pub const SESSION_DEADLINE: Duration = Duration::from_secs(30);

/// How long a fresh surface may take to report document-complete.
pub const READY_TIMEOUT: Duration = Duration::from_secs(10);

/// Window searched after an identifier occurrence inside script payloads.
pub const AFTER_IDENTIFIER_WINDOW: usize = 1000;

/// Maximum identifier-to-link distance the listing matcher accepts.
pub const MAX_PAIR_DISTANCE: usize = 1000;
