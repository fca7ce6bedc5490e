//! Chrome-backed rendering surfaces for LinkLift.
//!
//! Drives a real Chrome/Chromium instance over the Chrome DevTools Protocol
//! (CDP) and exposes individual pages as [`Surface`]s to the navigator and
//! the orchestrator.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐    WebSocket     ┌──────────────────┐
//! │ navigator/batch  │ ◄──────────────► │  Chrome/Chromium │
//! │  (via Surface)   │       CDP        │   (real pages)   │
//! └──────────────────┘                  └──────────────────┘
//! ```
//!
//! ## Setup
//!
//! Start Chrome with remote debugging enabled:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! or let [`ChromeLauncher`] start one with a dedicated profile directory.
//! Reusing an already-running instance preserves the operator's signed-in
//! session, which the photo service requires for sharing actions.
//!
//! [`Surface`]: linklift_protocols::Surface

pub mod cdp;
mod host;
mod launcher;
mod scripts;
mod surface;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use host::CdpHost;
pub use launcher::{ChromeLauncher, LaunchError, LauncherConfig};
pub use surface::PageSurface;
