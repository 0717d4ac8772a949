//! Extension confirmation handling.
//!
//! The wallet extension raises its own popup surface to approve a pending
//! transaction. That surface is foreign-owned: it is discovered by scanning
//! every open surface for the extension's address signature, brought to the
//! foreground, and clicked. It is never created or closed here.
//!
//! This is the only cross-surface coordination in the bot and the part most
//! sensitive to timing; every pause is an empirically chosen constant.

use std::sync::Arc;
use std::time::Duration;

use cdp_session::{BrowserSession, Surface};
use tracing::{debug, info, warn};
use ui_actions::{click, settle, wait_for};

use crate::errors::CycleError;
use crate::selectors;

/// Pause for the extension to raise its popup before scanning.
const POPUP_RAISE_PAUSE: Duration = Duration::from_secs(3);

/// Bound on the wait for the popup to render an interactive control.
const POPUP_RENDER_WAIT: Duration = Duration::from_secs(5);

/// Pause around focus changes; the popup re-renders on activation.
const FOCUS_PAUSE: Duration = Duration::from_secs(2);

/// The popup lays out its confirm footer only at a known window size.
const POPUP_VIEWPORT: (u32, u32) = (720, 720);

/// Find the extension's pending-transaction popup and confirm it.
pub async fn confirm_pending(session: &dyn BrowserSession) -> Result<(), CycleError> {
    settle(POPUP_RAISE_PAUSE).await;

    let popup = find_confirmation_surface(session).await?;
    popup.bring_to_front().await?;

    // Absence of the generic control does not prove the confirm button is
    // unclickable, so a timeout here is tolerated.
    if let Err(err) = wait_for(popup.as_ref(), &selectors::POPUP_ANY_CONTROL, POPUP_RENDER_WAIT).await
    {
        debug!(%err, "no popup control visible yet; continuing anyway");
    }
    settle(FOCUS_PAUSE).await;

    // The render wait can cost the popup its focus; raise it again before
    // touching it.
    popup.bring_to_front().await?;
    popup
        .set_viewport(POPUP_VIEWPORT.0, POPUP_VIEWPORT.1)
        .await?;
    settle(FOCUS_PAUSE).await;

    click(popup.as_ref(), &selectors::POPUP_CONFIRM)
        .await
        .map_err(CycleError::ConfirmationClick)?;

    info!("wallet confirmation clicked");
    Ok(())
}

/// Scan all open surfaces for the extension's confirmation page. First match
/// wins; the extension raises at most one such surface at a time.
async fn find_confirmation_surface(
    session: &dyn BrowserSession,
) -> Result<Arc<dyn Surface>, CycleError> {
    for surface in session.surfaces().await? {
        // A surface mid-teardown may refuse to report an address; that makes
        // it a non-match, not an error.
        let address = surface.address().await.unwrap_or(None).unwrap_or_default();
        let is_confirmation = address.contains(selectors::WALLET_EXTENSION_ID)
            && address.contains(selectors::CONFIRMATION_PAGE_MARKER);
        debug!(%address, is_confirmation, "inspecting surface");
        if is_confirmation {
            return Ok(surface);
        }
    }
    warn!("no surface matched the wallet confirmation page");
    Err(CycleError::ConfirmationSurfaceNotFound)
}
