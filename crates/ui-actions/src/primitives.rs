//! The primitive vocabulary.

use std::time::Duration;

use cdp_session::{Locator, SessionError, Surface};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::errors::ActionError;

/// Poll interval used by [`wait_for`].
const PROBE_INTERVAL: Duration = Duration::from_millis(100);

/// Click the single element matching `locator` on `surface`.
///
/// One attempt, no poll: if the element is absent right now this fails with
/// [`ActionError::ElementNotFound`].
pub async fn click(surface: &dyn Surface, locator: &Locator) -> Result<(), ActionError> {
    debug!(target: "ui-actions", %locator, "click");
    surface
        .click(locator)
        .await
        .map_err(|err| contextualize(err, locator))
}

/// Append `text` to the input element matching `locator`.
pub async fn type_text(
    surface: &dyn Surface,
    locator: &Locator,
    text: &str,
) -> Result<(), ActionError> {
    debug!(target: "ui-actions", %locator, chars = text.len(), "type text");
    surface
        .type_text(locator, text)
        .await
        .map_err(|err| contextualize(err, locator))
}

/// Poll for an element's presence until `timeout` expires.
pub async fn wait_for(
    surface: &dyn Surface,
    locator: &Locator,
    timeout: Duration,
) -> Result<(), ActionError> {
    debug!(target: "ui-actions", %locator, ?timeout, "wait for element");
    let deadline = Instant::now() + timeout;
    loop {
        if surface
            .exists(locator)
            .await
            .map_err(|err| contextualize(err, locator))?
        {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(ActionError::WaitTimeout(format!(
                "element {locator} absent after {}ms",
                timeout.as_millis()
            )));
        }
        sleep(PROBE_INTERVAL).await;
    }
}

/// Suspend unconditionally for `duration`.
///
/// Fixed settling is most of this page's synchronization contract: there is
/// no observable completion event for its UI transitions, so callers pause
/// for an empirically chosen time and move on.
pub async fn settle(duration: Duration) {
    sleep(duration).await;
}

fn contextualize(err: SessionError, locator: &Locator) -> ActionError {
    match err {
        SessionError::TargetNotFound(_) => ActionError::ElementNotFound(locator.to_string()),
        other => ActionError::from(other),
    }
}
