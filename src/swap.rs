//! Page-side swap initiation.

use std::time::Duration;

use cdp_session::Surface;
use tracing::info;
use ui_actions::{click, settle, type_text, wait_for};

use crate::errors::CycleError;
use crate::selectors;

/// Pause after the page opens before the form is interactable.
const FORM_READY_PAUSE: Duration = Duration::from_secs(3);

/// Pause between UI-affecting steps while the form re-renders.
const STEP_PAUSE: Duration = Duration::from_secs(2);

/// Bound on the presence-wait for the first controls after navigation.
const CONTROL_WAIT: Duration = Duration::from_secs(30);

/// Drive the swap form to a pending transaction request: pick the wrapped
/// asset as destination, choose the 50% quick amount, submit. Each sub-step
/// is one primitive call; the first failure aborts the rest, unmodified.
pub async fn initiate_swap(surface: &dyn Surface) -> Result<(), CycleError> {
    settle(FORM_READY_PAUSE).await;

    wait_for(surface, &selectors::DESTINATION_ASSET, CONTROL_WAIT).await?;
    click(surface, &selectors::DESTINATION_ASSET).await?;

    wait_for(surface, &selectors::ASSET_SEARCH_INPUT, CONTROL_WAIT).await?;
    type_text(
        surface,
        &selectors::ASSET_SEARCH_INPUT,
        selectors::WRAPPED_ASSET_SYMBOL,
    )
    .await?;
    click(surface, &selectors::ASSET_SUGGESTION).await?;

    settle(STEP_PAUSE).await;
    click(surface, &selectors::AMOUNT_HALF).await?;

    settle(STEP_PAUSE).await;
    click(surface, &selectors::SUBMIT_SWAP).await?;

    info!("swap submitted");
    Ok(())
}
