//! Cycle orchestration and the outer recovery loop.
//!
//! One cycle is a strict sequence of stages; every stage's action is awaited
//! to completion before the next begins, and the first failure aborts the
//! cycle. The outer loop owns surface lifetimes: a fresh page per cycle,
//! closed on success and failure alike, then a constant cooldown before the
//! next attempt. Nothing that happens inside a cycle can stop the loop; only
//! the cancellation token can.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use cdp_session::{BrowserSession, Surface};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use ui_actions::settle;

use crate::config::Config;
use crate::confirm;
use crate::errors::{CycleError, CycleFailure};
use crate::finality;
use crate::reversal;
use crate::swap;
use crate::wallet;

/// Pacing pause after a completed cycle before the surface is torn down.
const CYCLE_WIND_DOWN: Duration = Duration::from_secs(5);

/// Stages of one wrap/swap/unwrap cycle, in strict order. There is no
/// branching: the only exits are completion and failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CycleStage {
    Idle,
    WalletConnecting,
    Swapping,
    ConfirmingWrap,
    AwaitingWrap,
    Unwrapping,
    ConfirmingUnwrap,
    AwaitingUnwrap,
    Done,
}

impl CycleStage {
    pub fn next(self) -> CycleStage {
        match self {
            CycleStage::Idle => CycleStage::WalletConnecting,
            CycleStage::WalletConnecting => CycleStage::Swapping,
            CycleStage::Swapping => CycleStage::ConfirmingWrap,
            CycleStage::ConfirmingWrap => CycleStage::AwaitingWrap,
            CycleStage::AwaitingWrap => CycleStage::Unwrapping,
            CycleStage::Unwrapping => CycleStage::ConfirmingUnwrap,
            CycleStage::ConfirmingUnwrap => CycleStage::AwaitingUnwrap,
            CycleStage::AwaitingUnwrap => CycleStage::Done,
            CycleStage::Done => CycleStage::Done,
        }
    }
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CycleStage::Idle => "idle",
            CycleStage::WalletConnecting => "wallet-connecting",
            CycleStage::Swapping => "swapping",
            CycleStage::ConfirmingWrap => "confirming-wrap",
            CycleStage::AwaitingWrap => "awaiting-wrap",
            CycleStage::Unwrapping => "unwrapping",
            CycleStage::ConfirmingUnwrap => "confirming-unwrap",
            CycleStage::AwaitingUnwrap => "awaiting-unwrap",
            CycleStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Run one full cycle against `surface`. Returns the failing stage on abort;
/// surface teardown is the caller's job.
pub async fn run_cycle(
    session: &dyn BrowserSession,
    surface: &Arc<dyn Surface>,
    config: &Config,
) -> Result<(), CycleFailure> {
    let mut stage = CycleStage::Idle;
    while stage != CycleStage::Done {
        debug!(%stage, "entering stage");
        step(session, surface, config, stage)
            .await
            .map_err(|error| CycleFailure { stage, error })?;
        stage = stage.next();
    }

    info!("cycle complete");
    settle(CYCLE_WIND_DOWN).await;
    Ok(())
}

async fn step(
    session: &dyn BrowserSession,
    surface: &Arc<dyn Surface>,
    config: &Config,
    stage: CycleStage,
) -> Result<(), CycleError> {
    match stage {
        // The fresh surface is already navigated to the start address.
        CycleStage::Idle | CycleStage::Done => Ok(()),
        CycleStage::WalletConnecting => wallet::connect_wallet(surface.as_ref())
            .await
            .map(|_status| ()),
        CycleStage::Swapping => swap::initiate_swap(surface.as_ref()).await,
        CycleStage::ConfirmingWrap | CycleStage::ConfirmingUnwrap => {
            confirm::confirm_pending(session).await
        }
        CycleStage::AwaitingWrap | CycleStage::AwaitingUnwrap => {
            finality::await_finality(surface.as_ref(), config.finality_wait).await;
            Ok(())
        }
        CycleStage::Unwrapping => {
            reversal::unwrap_asset(surface.as_ref()).await;
            Ok(())
        }
    }
}

/// Outer recovery loop: one fresh surface per cycle, failures isolated to
/// the cycle that raised them, constant cooldown between attempts.
///
/// Unbounded by design; `cancel` is the only exit. Cancellation aborts an
/// in-flight cycle at its next suspension point, and the cycle's surface is
/// still closed on the way out.
pub async fn run_loop(session: &dyn BrowserSession, config: &Config, cancel: CancellationToken) {
    loop {
        if cancel.is_cancelled() {
            break;
        }
        info!("starting new swap cycle");

        let outcome = match session.create_surface(&config.start_url).await {
            Ok(surface) => {
                let result = tokio::select! {
                    _ = cancel.cancelled() => None,
                    result = run_cycle(session, &surface, config) => Some(result),
                };
                close_surface(&surface).await;
                match result {
                    Some(result) => result,
                    None => break,
                }
            }
            Err(err) => Err(CycleFailure {
                stage: CycleStage::Idle,
                error: CycleError::Session(err),
            }),
        };

        if let Err(failure) = outcome {
            warn!(stage = %failure.stage, error = %failure.error, "cycle aborted; cooling down");
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = settle(config.cooldown) => {}
            }
        }
    }
}

async fn close_surface(surface: &Arc<dyn Surface>) {
    if let Err(err) = surface.close().await {
        debug!(%err, "failed to close cycle surface");
    }
}
