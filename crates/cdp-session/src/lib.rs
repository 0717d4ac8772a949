//! Attachment layer for a live Chromium instance.
//!
//! dexcycle never launches a browser of its own: it attaches to an
//! already-running instance over its DevTools WebSocket endpoint and drives
//! pages through the chromiumoxide client. The [`BrowserSession`] and
//! [`Surface`] traits capture the narrow capability surface the bot needs,
//! so the layers above (and their tests) never touch the protocol client
//! directly.

pub mod error;
pub mod locator;
pub mod session;
pub mod surface;

pub use error::SessionError;
pub use locator::Locator;
pub use session::{BrowserSession, CdpSession};
pub use surface::{CdpSurface, Surface};
