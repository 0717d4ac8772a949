//! Completion waiting.

use std::time::Duration;

use cdp_session::Surface;
use rand::Rng;
use tracing::{debug, info};
use ui_actions::settle;

/// Wait out off-page transaction finality, then try to dismiss whatever
/// overlay the page raised about it.
///
/// There is no programmatic signal for on-chain finality from the page, so
/// the wait is a worst-case constant. The dismissal is a heuristic, not a
/// targeted click: a synthetic pointer tap at a pseudo-random point near the
/// viewport corner, where only backdrop should be. A missing overlay or a
/// failed tap is not an error.
pub async fn await_finality(surface: &dyn Surface, wait: Duration) {
    settle(wait).await;
    info!("finality window elapsed");

    let (x, y) = {
        let mut rng = rand::thread_rng();
        (
            rng.gen_range(1..=100) as f64,
            rng.gen_range(1..=100) as f64,
        )
    };
    match surface.click_at(x, y).await {
        Ok(()) => debug!(x, y, "dismissal click dispatched"),
        Err(err) => debug!(%err, "dismissal click failed; nothing to dismiss"),
    }
}
