use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams, DispatchMouseEventType,
    MouseButton,
};
use chromiumoxide::cdp::browser_protocol::page::BringToFrontParams;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use serde_json::Value;
use tracing::debug;

use crate::error::SessionError;
use crate::locator::Locator;

/// One navigable browsing context.
///
/// Surfaces created through [`crate::BrowserSession::create_surface`] are
/// owned by the caller, which must close them. Surfaces discovered through
/// [`crate::BrowserSession::surfaces`] may belong to someone else (the
/// wallet extension's popup does); those must only be read and actuated,
/// never closed.
#[async_trait]
pub trait Surface: Send + Sync {
    /// Current address of the surface, when one is committed.
    async fn address(&self) -> Result<Option<String>, SessionError>;

    /// Click the single element matching `locator` in the current document.
    async fn click(&self, locator: &Locator) -> Result<(), SessionError>;

    /// Append `text` to the input element matching `locator`.
    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), SessionError>;

    /// Probe for an element's presence without interacting with it.
    async fn exists(&self, locator: &Locator) -> Result<bool, SessionError>;

    /// Dispatch a synthetic pointer click at viewport coordinates.
    async fn click_at(&self, x: f64, y: f64) -> Result<(), SessionError>;

    /// Raise the surface above its siblings. Input targets the frontmost
    /// surface, so this must precede actions on a background surface.
    async fn bring_to_front(&self) -> Result<(), SessionError>;

    /// Override the viewport dimensions.
    async fn set_viewport(&self, width: u32, height: u32) -> Result<(), SessionError>;

    /// Close the surface. Owner only.
    async fn close(&self) -> Result<(), SessionError>;
}

/// chromiumoxide-backed surface.
pub struct CdpSurface {
    page: Page,
}

impl CdpSurface {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Resolve an XPath expression to the center point of its first match.
    ///
    /// chromiumoxide element handles are CSS-only, so XPath targets are
    /// resolved in the page and actuated through raw input dispatch at their
    /// bounding-box center.
    async fn xpath_center(&self, expression: &str) -> Result<(f64, f64), SessionError> {
        let literal = serde_json::to_string(expression)
            .map_err(|err| SessionError::Internal(err.to_string()))?;
        let script = format!(
            r#"(() => {{
    const hit = document
        .evaluate({literal}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null)
        .singleNodeValue;
    if (!hit) {{ return null; }}
    const rect = hit.getBoundingClientRect();
    return {{ x: rect.x + rect.width / 2, y: rect.y + rect.height / 2 }};
}})()"#
        );
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(SessionError::from_cdp)?;
        let value = result.value().cloned().unwrap_or(Value::Null);
        match (
            value.get("x").and_then(Value::as_f64),
            value.get("y").and_then(Value::as_f64),
        ) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(SessionError::TargetNotFound(format!("xpath {expression}"))),
        }
    }

    async fn xpath_exists(&self, expression: &str) -> Result<bool, SessionError> {
        let literal = serde_json::to_string(expression)
            .map_err(|err| SessionError::Internal(err.to_string()))?;
        let script = format!(
            "document.evaluate({literal}, document, null, \
             XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue !== null"
        );
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(SessionError::from_cdp)?;
        Ok(result.value().and_then(Value::as_bool).unwrap_or(false))
    }

    /// Move-press-release sequence at a point, as the page sees real mice do.
    async fn dispatch_click(&self, x: f64, y: f64) -> Result<(), SessionError> {
        let moved = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseMoved)
            .x(x)
            .y(y)
            .build()
            .map_err(SessionError::Internal)?;
        self.page
            .execute(moved)
            .await
            .map_err(SessionError::from_cdp)?;

        let pressed = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MousePressed)
            .x(x)
            .y(y)
            .button(MouseButton::Left)
            .click_count(1)
            .build()
            .map_err(SessionError::Internal)?;
        self.page
            .execute(pressed)
            .await
            .map_err(SessionError::from_cdp)?;

        let released = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseReleased)
            .x(x)
            .y(y)
            .button(MouseButton::Left)
            .click_count(1)
            .build()
            .map_err(SessionError::Internal)?;
        self.page
            .execute(released)
            .await
            .map_err(SessionError::from_cdp)?;
        Ok(())
    }

    /// Per-character key dispatch into whatever holds focus.
    async fn dispatch_text(&self, text: &str) -> Result<(), SessionError> {
        for ch in text.chars() {
            let params = DispatchKeyEventParams::builder()
                .r#type(DispatchKeyEventType::Char)
                .text(ch.to_string())
                .build()
                .map_err(SessionError::Internal)?;
            self.page
                .execute(params)
                .await
                .map_err(SessionError::from_cdp)?;
        }
        Ok(())
    }
}

#[async_trait]
impl Surface for CdpSurface {
    async fn address(&self) -> Result<Option<String>, SessionError> {
        self.page.url().await.map_err(SessionError::from_cdp)
    }

    async fn click(&self, locator: &Locator) -> Result<(), SessionError> {
        match locator {
            Locator::Css(selector) => {
                let element = self
                    .page
                    .find_element(*selector)
                    .await
                    .map_err(SessionError::from_cdp)?;
                element.click().await.map_err(SessionError::from_cdp)?;
            }
            Locator::XPath(expression) => {
                let (x, y) = self.xpath_center(expression).await?;
                self.dispatch_click(x, y).await?;
            }
        }
        Ok(())
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), SessionError> {
        match locator {
            Locator::Css(selector) => {
                let element = self
                    .page
                    .find_element(*selector)
                    .await
                    .map_err(SessionError::from_cdp)?;
                element.click().await.map_err(SessionError::from_cdp)?;
                element.type_str(text).await.map_err(SessionError::from_cdp)?;
            }
            Locator::XPath(expression) => {
                // Focus via a real click first; key events land wherever
                // focus is.
                let (x, y) = self.xpath_center(expression).await?;
                self.dispatch_click(x, y).await?;
                self.dispatch_text(text).await?;
            }
        }
        Ok(())
    }

    async fn exists(&self, locator: &Locator) -> Result<bool, SessionError> {
        match locator {
            Locator::Css(selector) => match self.page.find_element(*selector).await {
                Ok(_) => Ok(true),
                Err(CdpError::NotFound) => Ok(false),
                Err(err) => Err(SessionError::from_cdp(err)),
            },
            Locator::XPath(expression) => self.xpath_exists(expression).await,
        }
    }

    async fn click_at(&self, x: f64, y: f64) -> Result<(), SessionError> {
        debug!(target: "cdp-session", x, y, "synthetic pointer click");
        self.dispatch_click(x, y).await
    }

    async fn bring_to_front(&self) -> Result<(), SessionError> {
        self.page
            .execute(BringToFrontParams::default())
            .await
            .map_err(SessionError::from_cdp)?;
        Ok(())
    }

    async fn set_viewport(&self, width: u32, height: u32) -> Result<(), SessionError> {
        let params = SetDeviceMetricsOverrideParams::builder()
            .width(width as i64)
            .height(height as i64)
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(SessionError::Internal)?;
        self.page
            .execute(params)
            .await
            .map_err(SessionError::from_cdp)?;
        Ok(())
    }

    async fn close(&self) -> Result<(), SessionError> {
        self.page
            .clone()
            .close()
            .await
            .map_err(SessionError::from_cdp)
    }
}
