//! Canned page driver for tests

use super::{PageDriver, PageError, PageSession};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct Counters {
    pub opens: AtomicU32,
    pub closes: AtomicU32,
    pub clicks: AtomicU32,
    pub last_url: Mutex<Option<String>>,
}

#[derive(Clone)]
pub struct FakePage {
    pub heading: Option<String>,
    pub paragraphs: Vec<String>,
    /// Paragraphs that only appear after "View more" is clicked
    pub view_more: Option<Vec<String>>,
    pub fail_paragraphs_with: Option<fn(String) -> PageError>,
}

impl FakePage {
    pub fn new(heading: Option<&str>, paragraphs: &[&str]) -> Self {
        Self {
            heading: heading.map(String::from),
            paragraphs: paragraphs.iter().map(|s| s.to_string()).collect(),
            view_more: None,
            fail_paragraphs_with: None,
        }
    }
}

pub struct FakeDriver {
    pub page: FakePage,
    /// Number of opens that fail before one succeeds
    pub failing_opens: u32,
    pub counters: Arc<Counters>,
}

impl FakeDriver {
    pub fn serving(page: FakePage) -> Self {
        Self {
            page,
            failing_opens: 0,
            counters: Arc::new(Counters::default()),
        }
    }
}

pub struct FakeSession {
    page: FakePage,
    expanded: AtomicU32,
    counters: Arc<Counters>,
}

#[async_trait]
impl PageDriver for FakeDriver {
    type Session = FakeSession;

    async fn open(&self, url: &str) -> Result<FakeSession, PageError> {
        *self.counters.last_url.lock().unwrap() = Some(url.to_string());
        let n = self.counters.opens.fetch_add(1, Ordering::SeqCst);
        if n < self.failing_opens {
            return Err(PageError::Browser(format!("net::ERR_CONNECTION_RESET ({})", n + 1)));
        }
        Ok(FakeSession {
            page: self.page.clone(),
            expanded: AtomicU32::new(0),
            counters: self.counters.clone(),
        })
    }
}

#[async_trait]
impl PageSession for FakeSession {
    async fn heading_text(&self) -> Result<Option<String>, PageError> {
        Ok(self.page.heading.clone())
    }

    async fn expand_view_more(&self) -> Result<bool, PageError> {
        if self.page.view_more.is_some() {
            self.expanded.store(1, Ordering::SeqCst);
            self.counters.clicks.fetch_add(1, Ordering::SeqCst);
            return Ok(true);
        }
        Ok(false)
    }

    async fn paragraph_texts(&self) -> Result<Vec<String>, PageError> {
        if let Some(fail) = self.page.fail_paragraphs_with {
            return Err(fail("boom".to_string()));
        }
        let mut texts = self.page.paragraphs.clone();
        if self.expanded.load(Ordering::SeqCst) == 1 {
            if let Some(extra) = &self.page.view_more {
                texts.extend(extra.iter().cloned());
            }
        }
        Ok(texts)
    }

    async fn close(self) -> Result<(), PageError> {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
