//! Chrome DevTools Protocol (CDP) client.
//!
//! Speaks the CDP JSON-RPC dialect over Chrome's debugging WebSocket:
//! commands carry an `id` and are answered by a reply with the same `id`,
//! events carry a `method` and no `id`, and everything belonging to an
//! attached page is tagged with its `sessionId`. One connection multiplexes
//! the browser endpoint and all attached pages.
//!
//! The client assumes Chrome is already serving the debug port (see the
//! launcher, which arranges that). Entry point:
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let page = client.new_page("https://photos.google.com/albums").await?;
//! page.wait_for_ready(Duration::from_secs(10)).await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::{BrowserInfo, CdpEnvelope, CdpRemoteError, CdpRequest, PageDescriptor};
pub use session::PageSession;
