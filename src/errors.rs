//! Failure taxonomy of the cycle driver.

use cdp_session::SessionError;
use thiserror::Error;
use ui_actions::ActionError;

use crate::cycle::CycleStage;

/// Failures that abort a cycle.
#[derive(Debug, Error, Clone)]
pub enum CycleError {
    /// The connect control worked but provider selection did not.
    #[error("wallet connection failed: {0}")]
    WalletConnect(String),

    /// No open surface matched the wallet extension's confirmation page.
    #[error("wallet confirmation surface not found")]
    ConfirmationSurfaceNotFound,

    /// The confirmation surface was found but its confirm control was not
    /// clickable.
    #[error("wallet confirmation click failed: {0}")]
    ConfirmationClick(ActionError),

    /// A page-side primitive failed.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The session layer failed underneath a step.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// A cycle abort, tagged with the stage that raised it. Caught only by the
/// outer loop; never terminates the process.
#[derive(Debug, Error, Clone)]
#[error("cycle failed during {stage}: {error}")]
pub struct CycleFailure {
    pub stage: CycleStage,
    pub error: CycleError,
}
