//! Headless Chrome page driver (Chrome DevTools Protocol)

use super::{PageDriver, PageError, PageSession};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const PARAGRAPHS_JS: &str = "Array.from(document.querySelectorAll('p')).map(p => p.innerText || '')";

const VIEW_MORE_TEXT: &str = "View more";

impl From<CdpError> for PageError {
    fn from(err: CdpError) -> Self {
        PageError::Browser(err.to_string())
    }
}

/// Launches a fresh headless Chrome for every page load
#[derive(Debug, Clone, Default)]
pub struct ChromeDriver {
    chrome_path: Option<PathBuf>,
}

impl ChromeDriver {
    pub fn new(chrome_path: Option<PathBuf>) -> Self {
        Self { chrome_path }
    }

    fn browser_config(&self) -> Result<BrowserConfig, PageError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(PageError::Browser)
    }
}

#[async_trait]
impl PageDriver for ChromeDriver {
    type Session = ChromeSession;

    async fn open(&self, url: &str) -> Result<ChromeSession, PageError> {
        let (mut browser, mut handler) = Browser::launch(self.browser_config()?).await?;

        // CDP events must be drained for the browser to make progress
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let page = match open_page(&browser, url).await {
            Ok(page) => page,
            Err(e) => {
                shutdown(&mut browser, &handler_task).await;
                return Err(e);
            }
        };

        debug!("[Chrome] Opened {}", url);

        Ok(ChromeSession {
            browser,
            page,
            handler_task,
        })
    }
}

async fn open_page(browser: &Browser, url: &str) -> Result<Page, PageError> {
    let page = browser.new_page(url).await?;
    page.wait_for_navigation().await?;
    Ok(page)
}

async fn shutdown(browser: &mut Browser, handler_task: &JoinHandle<()>) {
    if let Err(e) = browser.close().await {
        warn!("[Chrome] Failed to close browser: {}", e);
    }
    if let Err(e) = browser.wait().await {
        warn!("[Chrome] Failed to reap browser process: {}", e);
    }
    handler_task.abort();
}

/// One open browser with one tab
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl PageSession for ChromeSession {
    async fn heading_text(&self) -> Result<Option<String>, PageError> {
        let headings = self.page.find_elements("h1").await?;
        match headings.first() {
            Some(h1) => Ok(h1.inner_text().await?),
            None => Ok(None),
        }
    }

    async fn expand_view_more(&self) -> Result<bool, PageError> {
        for paragraph in self.page.find_elements("p").await? {
            let text = paragraph.inner_text().await?.unwrap_or_default();
            if text.contains(VIEW_MORE_TEXT) {
                paragraph.click().await?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn paragraph_texts(&self) -> Result<Vec<String>, PageError> {
        let result = self.page.evaluate(PARAGRAPHS_JS).await?;
        result
            .into_value::<Vec<String>>()
            .map_err(|e| PageError::Parse(format!("unexpected paragraph list: {}", e)))
    }

    async fn close(mut self) -> Result<(), PageError> {
        shutdown(&mut self.browser, &self.handler_task).await;
        Ok(())
    }
}
