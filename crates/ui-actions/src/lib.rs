//! Atomic UI operations for driving the swap page.
//!
//! Four primitives: click, type into, wait for presence, settle. Each call
//! is a single attempt against the surface's current document; nothing here
//! retries, and only [`wait_for`] polls (with an explicit bound). Sequencing
//! and recovery live with the caller.

pub mod errors;
pub mod primitives;

pub use errors::ActionError;
pub use primitives::{click, settle, type_text, wait_for};
