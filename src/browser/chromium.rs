// Chromium-backed session using chromiumoxide.

use super::{BrowserSession, TriggerOutcome};
use crate::config::BrowserSettings;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

/// Clicks the node only while it is still attached to the document.
/// Returns `false` once the page has swapped the control out.
const CLICK_IF_CONNECTED: &str =
    "function() { if (!this.isConnected) { return false; } this.click(); return true; }";

pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler: Option<JoinHandle<()>>,
}

impl ChromiumSession {
    /// Launch Chromium with notification prompts suppressed and open one page
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--disable-notifications")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage");

        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &settings.chrome_path {
            builder = builder.chrome_executable(path);
        }

        let config = builder
            .build()
            .map_err(|e| anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    log::debug!("browser handler event error: {e}");
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;

        log::debug!("Chromium launched (headless: {})", settings.headless);

        Ok(Self {
            browser,
            page,
            handler: Some(handler),
        })
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    type Handle = Element;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .with_context(|| format!("navigation to {url} failed"))?;
        self.page
            .wait_for_navigation()
            .await
            .with_context(|| format!("page load for {url} failed"))?;
        Ok(())
    }

    async fn find_by_class(&mut self, class_name: &str) -> Result<Option<Element>> {
        let selector = format!(".{class_name}");
        let mut elements = self
            .page
            .find_elements(selector.as_str())
            .await
            .with_context(|| format!("lookup of class {class_name} failed"))?;

        if elements.is_empty() {
            Ok(None)
        } else {
            Ok(Some(elements.swap_remove(0)))
        }
    }

    async fn trigger(&mut self, handle: &Element) -> Result<TriggerOutcome> {
        let returns = handle
            .call_js_fn(CLICK_IF_CONNECTED, false)
            .await
            .context("click script failed")?;

        match returns.result.value.and_then(|v| v.as_bool()) {
            Some(true) => Ok(TriggerOutcome::Clicked),
            _ => Ok(TriggerOutcome::Stale),
        }
    }

    async fn page_source(&mut self) -> Result<String> {
        let result = self
            .page
            .evaluate("document.documentElement.outerHTML")
            .await
            .context("failed to get HTML")?;

        result
            .into_value::<String>()
            .map_err(|e| anyhow!("failed to convert HTML result: {e:?}"))
    }

    async fn close(&mut self) -> Result<()> {
        self.browser.close().await.context("failed to close Chromium")?;
        let _ = self.browser.wait().await;
        if let Some(handler) = self.handler.take() {
            let _ = handler.await;
        }
        Ok(())
    }
}
