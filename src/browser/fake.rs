use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;

use super::{BrowserSession, TriggerOutcome};

/// Scripted session: each class goes stale after a fixed number of clicks
#[derive(Debug, Default)]
pub struct FakeSession {
    /// class name -> clicks accepted before the node is replaced
    pub controls: HashMap<String, usize>,
    /// url -> markup returned after navigation
    pub pages: HashMap<String, String>,
    pub clicks: HashMap<String, usize>,
    /// Every successful click, in order, across all pages
    pub triggered: Vec<String>,
    pub visited: Vec<String>,
    pub closed: bool,
    current: Option<String>,
}

impl FakeSession {
    pub fn with_control(mut self, class_name: &str, live_clicks: usize) -> Self {
        self.controls.insert(class_name.to_string(), live_clicks);
        self
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn clicks_for(&self, class_name: &str) -> usize {
        self.clicks.get(class_name).copied().unwrap_or(0)
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    type Handle = String;

    async fn navigate(&mut self, url: &str) -> Result<()> {
        if !self.pages.contains_key(url) {
            bail!("navigation failed: no page for {}", url);
        }
        self.visited.push(url.to_string());
        self.current = Some(url.to_string());
        self.clicks.clear();
        Ok(())
    }

    async fn find_by_class(&mut self, class_name: &str) -> Result<Option<String>> {
        Ok(self
            .controls
            .contains_key(class_name)
            .then(|| class_name.to_string()))
    }

    async fn trigger(&mut self, handle: &String) -> Result<TriggerOutcome> {
        let live = self.controls.get(handle).copied().unwrap_or(0);
        let clicks = self.clicks.entry(handle.clone()).or_insert(0);
        if *clicks >= live {
            return Ok(TriggerOutcome::Stale);
        }
        *clicks += 1;
        self.triggered.push(handle.clone());
        Ok(TriggerOutcome::Clicked)
    }

    async fn page_source(&mut self) -> Result<String> {
        match &self.current {
            Some(url) => Ok(self.pages.get(url).cloned().unwrap_or_default()),
            None => bail!("no page loaded"),
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
