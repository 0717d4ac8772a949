//! Component-level behavior of the individual cycle steps.

mod common;

use common::{FakeSession, FakeSurface};

use dexcycle::errors::CycleError;
use dexcycle::selectors;
use dexcycle::wallet::{self, WalletStatus};
use dexcycle::{confirm, reversal};

#[tokio::test]
async fn missing_connect_control_reads_as_connected() {
    let session = FakeSession::new();
    let surface = FakeSurface::with_missing(
        "page",
        selectors::SWAP_PAGE_URL,
        session.journal(),
        &[selectors::CONNECT_WALLET],
    );

    let status = wallet::connect_wallet(surface.as_ref()).await.unwrap();

    assert_eq!(status, WalletStatus::AlreadyConnected);
    // The provider grid must not have been touched.
    let journal = common::entries(&session.journal());
    assert!(!journal
        .iter()
        .any(|op| op.contains(selectors::WALLET_PROVIDER_OKX.expression())));
}

#[tokio::test]
async fn provider_selection_failure_escalates() {
    let session = FakeSession::new();
    let surface = FakeSurface::with_missing(
        "page",
        selectors::SWAP_PAGE_URL,
        session.journal(),
        &[selectors::WALLET_PROVIDER_OKX],
    );

    let err = wallet::connect_wallet(surface.as_ref()).await.unwrap_err();
    assert!(matches!(err, CycleError::WalletConnect(_)));
}

#[tokio::test(start_paused = true)]
async fn confirmation_targets_only_the_matching_surface() {
    let session = FakeSession::new();
    let bystander = FakeSurface::new("bystander", "https://docs.example.com/", session.journal());
    session.add_extra(bystander.clone());
    let popup = session.add_confirmation_popup();

    confirm::confirm_pending(session.as_ref()).await.unwrap();

    assert!(popup.front_count.load(std::sync::atomic::Ordering::SeqCst) >= 2);
    let journal = common::entries(&session.journal());
    assert!(journal.contains(&format!(
        "popup:click:{}",
        selectors::POPUP_CONFIRM.expression()
    )));
    assert!(journal.contains(&"popup:viewport:720x720".to_string()));
    assert_eq!(bystander.front_count.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert!(!journal.iter().any(|op| op.starts_with("bystander:click")));
}

#[tokio::test(start_paused = true)]
async fn confirmation_without_popup_fails_before_clicking() {
    let session = FakeSession::new();
    session.add_extra(FakeSurface::new(
        "bystander",
        "https://docs.example.com/",
        session.journal(),
    ));

    let err = confirm::confirm_pending(session.as_ref()).await.unwrap_err();

    assert!(matches!(err, CycleError::ConfirmationSurfaceNotFound));
    let journal = common::entries(&session.journal());
    assert!(!journal.iter().any(|op| op.contains(":click")));
}

#[tokio::test(start_paused = true)]
async fn slow_popup_render_is_tolerated() {
    let session = FakeSession::new();
    let address = format!(
        "chrome-extension://{}/{}",
        selectors::WALLET_EXTENSION_ID,
        selectors::CONFIRMATION_PAGE_MARKER,
    );
    // The generic control never shows up, but the confirm button is there.
    let popup = FakeSurface::with_missing(
        "popup",
        &address,
        session.journal(),
        &[selectors::POPUP_ANY_CONTROL],
    );
    session.add_extra(popup);

    confirm::confirm_pending(session.as_ref()).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn reversal_failures_are_swallowed() {
    let session = FakeSession::new();
    let surface = FakeSurface::with_missing(
        "page",
        selectors::SWAP_PAGE_URL,
        session.journal(),
        &[selectors::DIRECTION_TOGGLE],
    );

    // Must not escalate; the sequence stops at the first failure.
    reversal::unwrap_asset(surface.as_ref()).await;

    let journal = common::entries(&session.journal());
    assert!(!journal
        .iter()
        .any(|op| op.contains(selectors::AMOUNT_MAX.expression())));
}
