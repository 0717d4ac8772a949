use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use cdp_session::{BrowserSession, CdpSession};
use dexcycle::config::Config;
use dexcycle::cycle;

/// Exit status for failures before the cycle loop is entered.
const STARTUP_FAILURE: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "dexcycle",
    version,
    about = "Unattended wrap/swap/unwrap cycle driver"
)]
struct Cli {
    /// DevTools WebSocket endpoint of the running browser
    /// (falls back to DEXCYCLE_WS_URL)
    #[arg(long)]
    ws_url: Option<String>,

    /// Pause between cycles after a failure, e.g. "10s"
    #[arg(long, value_parser = humantime::parse_duration, default_value = "10s")]
    cooldown: Duration,

    /// Stand-in wait for off-page transaction finality, e.g. "60s"
    #[arg(long, value_parser = humantime::parse_duration, default_value = "60s")]
    finality_wait: Duration,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level: tracing::Level = level.parse().context("invalid log level")?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    Ok(())
}

#[tokio::main]
async fn main() {
    // A .env next to the binary may carry the control endpoint.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli.log_level) {
        eprintln!("failed to initialize logging: {err:#}");
        std::process::exit(STARTUP_FAILURE);
    }

    let config = match Config::resolve(cli.ws_url, cli.cooldown, cli.finality_wait) {
        Ok(config) => config,
        Err(err) => {
            error!("invalid configuration: {err:#}");
            std::process::exit(STARTUP_FAILURE);
        }
    };

    let session = match CdpSession::attach(&config.ws_url).await {
        Ok(session) => session,
        Err(err) => {
            error!(%err, "unable to attach to the browser; giving up");
            std::process::exit(STARTUP_FAILURE);
        }
    };

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received; stopping after the current step");
                cancel.cancel();
            }
        });
    }

    cycle::run_loop(&session, &config, cancel).await;

    if let Err(err) = session.disconnect().await {
        error!(%err, "detach failed");
    }
    info!("cycle loop stopped");
}
