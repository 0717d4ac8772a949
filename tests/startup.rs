//! Startup-path behavior: configuration resolution and attach failure.

use std::env;
use std::time::Duration;

use cdp_session::{CdpSession, SessionError};
use dexcycle::config::{Config, WS_URL_ENV};

#[test]
fn endpoint_comes_from_the_flag_first() {
    let config = Config::resolve(
        Some("ws://127.0.0.1:9222/devtools/browser/abc".into()),
        Duration::from_secs(10),
        Duration::from_secs(60),
    )
    .unwrap();
    assert_eq!(config.ws_url, "ws://127.0.0.1:9222/devtools/browser/abc");
    assert_eq!(config.start_url, "https://ritsu.xyz/swap");
}

#[test]
fn missing_endpoint_is_a_startup_error() {
    env::remove_var(WS_URL_ENV);
    let err = Config::resolve(None, Duration::from_secs(10), Duration::from_secs(60));
    assert!(err.is_err());
}

#[tokio::test]
async fn attach_to_a_bogus_endpoint_fails() {
    let err = CdpSession::attach("not-a-websocket-endpoint")
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Attach(_)));
}
