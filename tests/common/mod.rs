//! Scripted fakes for the session layer.
//!
//! `FakeSession` hands out `FakeSurface`s in creation order; each surface
//! fails clicks and typing on the locators its script marks missing. Every
//! operation is appended to one shared journal so tests can assert ordering
//! across surfaces.
#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cdp_session::{BrowserSession, Locator, SessionError, Surface};

use dexcycle::selectors;

pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

pub struct FakeSurface {
    pub label: String,
    pub address: String,
    missing: HashSet<&'static str>,
    journal: Journal,
    pub closed: AtomicBool,
    pub front_count: AtomicUsize,
}

impl FakeSurface {
    pub fn new(label: &str, address: &str, journal: Journal) -> Arc<Self> {
        Self::with_missing(label, address, journal, &[])
    }

    pub fn with_missing(
        label: &str,
        address: &str,
        journal: Journal,
        missing: &[Locator],
    ) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            address: address.to_string(),
            missing: missing.iter().map(Locator::expression).collect(),
            journal,
            closed: AtomicBool::new(false),
            front_count: AtomicUsize::new(0),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn record(&self, op: String) {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{}:{op}", self.label));
    }
}

#[async_trait]
impl Surface for FakeSurface {
    async fn address(&self) -> Result<Option<String>, SessionError> {
        Ok(Some(self.address.clone()))
    }

    async fn click(&self, locator: &Locator) -> Result<(), SessionError> {
        self.record(format!("click:{}", locator.expression()));
        if self.missing.contains(locator.expression()) {
            return Err(SessionError::TargetNotFound(locator.to_string()));
        }
        Ok(())
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), SessionError> {
        self.record(format!("type:{}:{text}", locator.expression()));
        if self.missing.contains(locator.expression()) {
            return Err(SessionError::TargetNotFound(locator.to_string()));
        }
        Ok(())
    }

    async fn exists(&self, locator: &Locator) -> Result<bool, SessionError> {
        Ok(!self.missing.contains(locator.expression()))
    }

    async fn click_at(&self, x: f64, y: f64) -> Result<(), SessionError> {
        self.record(format!("click_at:{x}:{y}"));
        Ok(())
    }

    async fn bring_to_front(&self) -> Result<(), SessionError> {
        self.front_count.fetch_add(1, Ordering::SeqCst);
        self.record("front".to_string());
        Ok(())
    }

    async fn set_viewport(&self, width: u32, height: u32) -> Result<(), SessionError> {
        self.record(format!("viewport:{width}x{height}"));
        Ok(())
    }

    async fn close(&self) -> Result<(), SessionError> {
        self.closed.store(true, Ordering::SeqCst);
        self.record("close".to_string());
        Ok(())
    }
}

#[derive(Default)]
struct SessionState {
    scripts: VecDeque<Vec<Locator>>,
    created: Vec<Arc<FakeSurface>>,
    extras: Vec<Arc<FakeSurface>>,
}

pub struct FakeSession {
    journal: Journal,
    state: Mutex<SessionState>,
    pub create_count: AtomicUsize,
}

impl FakeSession {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            journal: Arc::new(Mutex::new(Vec::new())),
            state: Mutex::new(SessionState::default()),
            create_count: AtomicUsize::new(0),
        })
    }

    pub fn journal(&self) -> Journal {
        Arc::clone(&self.journal)
    }

    /// Queue the missing-locator script for the next created surface. When
    /// the queue runs dry, surfaces are created with everything present.
    pub fn push_script(&self, missing: Vec<Locator>) {
        self.state.lock().unwrap().scripts.push_back(missing);
    }

    /// Register a surface that exists in the browser without being created
    /// by the bot (the extension popup, unrelated tabs).
    pub fn add_extra(&self, surface: Arc<FakeSurface>) {
        self.state.lock().unwrap().extras.push(surface);
    }

    /// Register a popup surface matching the wallet extension's
    /// confirmation-page signature.
    pub fn add_confirmation_popup(&self) -> Arc<FakeSurface> {
        let address = format!(
            "chrome-extension://{}/{}#/dapp-entry",
            selectors::WALLET_EXTENSION_ID,
            selectors::CONFIRMATION_PAGE_MARKER,
        );
        let popup = FakeSurface::new("popup", &address, self.journal());
        self.add_extra(Arc::clone(&popup));
        popup
    }

    pub fn created(&self) -> Vec<Arc<FakeSurface>> {
        self.state.lock().unwrap().created.clone()
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn create_surface(&self, url: &str) -> Result<Arc<dyn Surface>, SessionError> {
        let n = self.create_count.fetch_add(1, Ordering::SeqCst);
        let label = format!("page{n}");
        let mut state = self.state.lock().unwrap();
        let missing = state.scripts.pop_front().unwrap_or_default();
        let surface = FakeSurface::with_missing(&label, url, Arc::clone(&self.journal), &missing);
        state.created.push(Arc::clone(&surface));
        self.journal
            .lock()
            .unwrap()
            .push(format!("session:create:{label}:{url}"));
        Ok(surface)
    }

    async fn surfaces(&self) -> Result<Vec<Arc<dyn Surface>>, SessionError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .created
            .iter()
            .filter(|surface| !surface.is_closed())
            .chain(state.extras.iter())
            .map(|surface| Arc::clone(surface) as Arc<dyn Surface>)
            .collect())
    }

    async fn disconnect(&self) -> Result<(), SessionError> {
        Ok(())
    }
}
