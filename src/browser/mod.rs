// Browser automation seam.
//
// The expander and the scraper only talk to BrowserSession; the Chromium
// implementation lives in chromium.rs.

pub mod chromium;

#[cfg(test)]
pub(crate) mod fake;

use anyhow::Result;
use async_trait::async_trait;

/// Result of clicking a previously located element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Clicked,
    /// The held node is no longer attached to the document
    Stale,
}

/// A single controllable browser page
#[async_trait]
pub trait BrowserSession: Send {
    /// Handle to a located element, valid until the page replaces the node
    type Handle: Send + Sync;

    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// First element carrying the class, or `None` when the page has none
    async fn find_by_class(&mut self, class_name: &str) -> Result<Option<Self::Handle>>;

    async fn trigger(&mut self, handle: &Self::Handle) -> Result<TriggerOutcome>;

    /// Serialized markup of the current document
    async fn page_source(&mut self) -> Result<String>;

    async fn close(&mut self) -> Result<()>;
}
