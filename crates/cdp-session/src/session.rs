use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::SessionError;
use crate::surface::{CdpSurface, Surface};

/// A remote-controlled browser reachable over its DevTools endpoint.
///
/// Exactly one session exists per process and it outlives every surface the
/// bot owns. Surfaces returned by [`surfaces`](BrowserSession::surfaces)
/// include foreign-owned ones; callers decide which they may manage.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Open a fresh page surface navigated to `url`. The caller owns the
    /// returned surface and must close it.
    async fn create_surface(&self, url: &str) -> Result<Arc<dyn Surface>, SessionError>;

    /// Snapshot of every open surface in the browser, owned or not.
    async fn surfaces(&self) -> Result<Vec<Arc<dyn Surface>>, SessionError>;

    /// Detach from the browser. The browser itself keeps running.
    async fn disconnect(&self) -> Result<(), SessionError>;
}

/// chromiumoxide-backed session attached over a WebSocket endpoint.
#[derive(Debug)]
pub struct CdpSession {
    browser: Browser,
    handler_task: Mutex<Option<JoinHandle<()>>>,
}

impl CdpSession {
    /// Attach to an already-running browser. The CDP event stream must be
    /// drained for the connection to make progress, so a background task
    /// owns it for the lifetime of the session.
    pub async fn attach(ws_url: &str) -> Result<Self, SessionError> {
        let (browser, mut handler) = Browser::connect(ws_url)
            .await
            .map_err(|err| SessionError::Attach(err.to_string()))?;
        let handler_task = tokio::spawn(async move {
            while handler.next().await.is_some() {}
            debug!(target: "cdp-session", "cdp event stream ended");
        });
        info!(target: "cdp-session", url = %ws_url, "attached to browser");
        Ok(Self {
            browser,
            handler_task: Mutex::new(Some(handler_task)),
        })
    }
}

#[async_trait]
impl BrowserSession for CdpSession {
    async fn create_surface(&self, url: &str) -> Result<Arc<dyn Surface>, SessionError> {
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(SessionError::from_cdp)?;
        Ok(Arc::new(CdpSurface::new(page)))
    }

    async fn surfaces(&self) -> Result<Vec<Arc<dyn Surface>>, SessionError> {
        let pages = self
            .browser
            .pages()
            .await
            .map_err(SessionError::from_cdp)?;
        Ok(pages
            .into_iter()
            .map(|page| Arc::new(CdpSurface::new(page)) as Arc<dyn Surface>)
            .collect())
    }

    async fn disconnect(&self) -> Result<(), SessionError> {
        if let Some(task) = self.handler_task.lock().await.take() {
            task.abort();
        }
        info!(target: "cdp-session", "detached from browser");
        Ok(())
    }
}
