use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Failures surfaced by the session layer.
#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// Could not attach to the browser's WebSocket endpoint.
    #[error("browser attach failed: {0}")]
    Attach(String),

    /// CDP transport or protocol failure.
    #[error("cdp i/o error: {0}")]
    CdpIo(String),

    /// No element matched the locator at call time.
    #[error("target element not found: {0}")]
    TargetNotFound(String),

    /// A CDP command did not answer within its deadline.
    #[error("command timed out: {0}")]
    CommandTimeout(String),

    /// Invariant violation inside the session layer.
    #[error("internal session error: {0}")]
    Internal(String),
}

impl SessionError {
    pub(crate) fn from_cdp(err: CdpError) -> Self {
        let hint = err.to_string();
        match err {
            CdpError::NotFound => SessionError::TargetNotFound(hint),
            CdpError::Timeout => SessionError::CommandTimeout(hint),
            _ => SessionError::CdpIo(hint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_node_maps_to_target_not_found() {
        let err = SessionError::from_cdp(CdpError::NotFound);
        assert!(matches!(err, SessionError::TargetNotFound(_)));
    }

    #[test]
    fn deadline_maps_to_command_timeout() {
        let err = SessionError::from_cdp(CdpError::Timeout);
        assert!(matches!(err, SessionError::CommandTimeout(_)));
    }
}
