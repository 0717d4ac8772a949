//! Unwrap (reversal) step.

use std::time::Duration;

use cdp_session::Surface;
use tracing::{info, warn};
use ui_actions::{click, settle, ActionError};

use crate::selectors;

/// Pause between UI-affecting steps while the form re-renders.
const STEP_PAUSE: Duration = Duration::from_secs(2);

/// Flip the form to the unwrap direction and send everything back.
///
/// Best effort: the wrap leg already went through, so a failed reversal must
/// not cost the cycle. Failures are logged and swallowed; the next cycle's
/// max-amount selection picks up whatever balance was left behind.
pub async fn unwrap_asset(surface: &dyn Surface) {
    match try_unwrap(surface).await {
        Ok(()) => info!("unwrap submitted"),
        Err(err) => warn!(%err, "unwrap step failed; leaving balance for the next cycle"),
    }
}

async fn try_unwrap(surface: &dyn Surface) -> Result<(), ActionError> {
    click(surface, &selectors::DIRECTION_TOGGLE).await?;
    settle(STEP_PAUSE).await;
    click(surface, &selectors::AMOUNT_MAX).await?;
    settle(STEP_PAUSE).await;
    click(surface, &selectors::SUBMIT_SWAP).await?;
    Ok(())
}
