//! Error types for the action primitives.

use cdp_session::SessionError;
use thiserror::Error;

/// Failure modes of the action primitives.
#[derive(Debug, Error, Clone)]
pub enum ActionError {
    /// No element matched the locator at call time.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// Wait bound expired before the element appeared.
    #[error("wait timeout: {0}")]
    WaitTimeout(String),

    /// CDP communication or protocol failure underneath an action.
    #[error("cdp i/o error: {0}")]
    CdpIo(String),

    /// Invariant violation inside the primitive layer.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ActionError {
    /// Whether the failure may clear on a later attempt of the whole cycle.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ActionError::WaitTimeout(_) | ActionError::CdpIo(_))
    }
}

impl From<SessionError> for ActionError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::TargetNotFound(hint) => ActionError::ElementNotFound(hint),
            SessionError::CommandTimeout(hint) => ActionError::WaitTimeout(hint),
            SessionError::Attach(hint) | SessionError::CdpIo(hint) => ActionError::CdpIo(hint),
            SessionError::Internal(hint) => ActionError::Internal(hint),
        }
    }
}
