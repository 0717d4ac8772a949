//! Wallet connection step.

use cdp_session::Surface;
use tracing::{info, warn};
use ui_actions::{click, ActionError};

use crate::errors::CycleError;
use crate::selectors;

/// Outcome of the connection attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WalletStatus {
    /// The page already had a wallet linked; no provider selection ran.
    AlreadyConnected,
    /// The connect flow ran and a provider was selected.
    Connected,
}

/// Policy: a failed connect-click is read as "the control is gone because a
/// wallet is already connected". The failure cause is not inspected, so a
/// genuinely broken control is indistinguishable from an established
/// connection. Kept as one function so the assumption stays visible and
/// replaceable.
fn assume_already_connected(_err: &ActionError) -> bool {
    true
}

/// Ensure a wallet is linked to the page session. Idempotent: an apparent
/// existing connection counts as success. A provider-selection failure after
/// a successful connect-click is escalated.
pub async fn connect_wallet(surface: &dyn Surface) -> Result<WalletStatus, CycleError> {
    match click(surface, &selectors::CONNECT_WALLET).await {
        Ok(()) => {}
        Err(err) if assume_already_connected(&err) => {
            info!(%err, "connect control unavailable; treating wallet as already connected");
            return Ok(WalletStatus::AlreadyConnected);
        }
        Err(err) => return Err(CycleError::Action(err)),
    }

    click(surface, &selectors::WALLET_PROVIDER_OKX)
        .await
        .map_err(|err| {
            warn!(%err, "wallet provider selection failed");
            CycleError::WalletConnect(err.to_string())
        })?;

    info!("wallet provider selected");
    Ok(WalletStatus::Connected)
}
