//! Runtime configuration.
//!
//! Only the control endpoint and the pacing knobs are configurable; the page
//! contract itself (locators, asset symbol, amount fractions, start address)
//! is fixed in [`crate::selectors`].

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::selectors;

/// Environment variable naming the browser's DevTools WebSocket endpoint.
pub const WS_URL_ENV: &str = "DEXCYCLE_WS_URL";

#[derive(Clone, Debug)]
pub struct Config {
    /// WebSocket control endpoint of the already-running browser.
    pub ws_url: String,
    /// Address every cycle starts from.
    pub start_url: String,
    /// Pause between cycles after a failure. Constant: consecutive failures
    /// do not grow it.
    pub cooldown: Duration,
    /// How long to wait out transaction finality; there is no signal to
    /// observe, so this is a worst-case constant.
    pub finality_wait: Duration,
}

impl Config {
    /// Resolve the runtime configuration from CLI values and the
    /// environment. A missing control endpoint is an unrecoverable startup
    /// error.
    pub fn resolve(
        ws_url: Option<String>,
        cooldown: Duration,
        finality_wait: Duration,
    ) -> Result<Self> {
        let ws_url = ws_url
            .or_else(|| env::var(WS_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
            .with_context(|| format!("no control endpoint: pass --ws-url or set {WS_URL_ENV}"))?;

        Ok(Self {
            ws_url,
            start_url: selectors::SWAP_PAGE_URL.to_string(),
            cooldown,
            finality_wait,
        })
    }
}
