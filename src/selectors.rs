//! The UI contract.
//!
//! Every interactive element on the swap page and on the wallet extension's
//! confirmation popup is addressed by a fixed structural locator. These are
//! brittle positional contracts with markup we do not control; treat them as
//! configuration, not code, and expect a cycle abort when the page changes
//! shape.

use cdp_session::Locator;

/// Address every cycle starts from.
pub const SWAP_PAGE_URL: &str = "https://ritsu.xyz/swap";

/// Wallet-connect control inside the swap box.
pub const CONNECT_WALLET: Locator = Locator::Css("#swap-box > div > div > div.w100 > div > div");

/// OKX entry in the wallet-provider grid (third tile).
pub const WALLET_PROVIDER_OKX: Locator = Locator::Css(
    "#container > div > div:nth-child(3) > div > div > div > div > div.col.gap-20 > div.grid-wallet-options > div:nth-child(3)",
);

/// Opens the destination-asset selector.
pub const DESTINATION_ASSET: Locator =
    Locator::XPath(r#"//*[@id="swap-box"]/div/div/div[1]/div[2]/div[3]/div[2]/div/div"#);

/// Search input inside the token selector.
pub const ASSET_SEARCH_INPUT: Locator =
    Locator::XPath(r#"//*[@id="toolbox"]/div/div[2]/div/div[1]/div/input"#);

/// First suggestion in the token-selector list.
pub const ASSET_SUGGESTION: Locator =
    Locator::Css("#tokenselector > div > div.fade-in-mid.token-selector-currencies.col > div");

/// Symbol typed into the token search field.
pub const WRAPPED_ASSET_SYMBOL: &str = "WETH";

/// Quick-amount control used for the wrap leg (50% of balance).
pub const AMOUNT_HALF: Locator =
    Locator::Css("#swap-input > div.col.gap-12 > div.row2.gap-10.align > button:nth-child(3)");

/// Quick-amount control used for the unwrap leg (max).
pub const AMOUNT_MAX: Locator =
    Locator::Css("#swap-input > div.col.gap-12 > div.row2.gap-10.align > button:nth-child(4)");

/// Submits the swap form, both directions.
pub const SUBMIT_SWAP: Locator = Locator::Css("#swap-box > div > div > div.w100 > button");

/// Swap-direction toggle between the two amount boxes.
pub const DIRECTION_TOGGLE: Locator = Locator::Css(
    "#swap-box > div > div > div.col.gap-10 > div.col.align > div.box-shadow-thin.swap-exchange-icon.br10.pointer",
);

/// Identifier of the OKX wallet extension.
pub const WALLET_EXTENSION_ID: &str = "mcohilncbfahbmgdjkbpemcciiolgcge";

/// Path fragment of the extension's transaction-confirmation page.
pub const CONFIRMATION_PAGE_MARKER: &str = "notification.html";

/// Any interactive control on the confirmation popup; presence means the
/// popup has rendered.
pub const POPUP_ANY_CONTROL: Locator = Locator::Css(".okui-btn");

/// Confirm button on the extension popup.
pub const POPUP_CONFIRM: Locator = Locator::Css(
    "#app > div > div._affix_oe51y_42._borderTop_oe51y_48 > div > button.okui-btn.btn-lg.btn-fill-highlight._action-button_j3bvq_1",
);
