//! Rendering engine seam
//!
//! The crawl core never talks to a browser directly; it goes through the
//! [`RenderEngine`] / [`RenderPage`] traits so that the engine can be a
//! real headless browser in production and an in-memory fake in tests.
//! The production implementation lives in [`chromium`].

pub mod chromium;
mod settle;

pub use chromium::ChromiumEngine;
pub use settle::settle_page;

use crate::RenderResult;
use async_trait::async_trait;
use std::time::Duration;

/// A launched rendering engine that can open isolated pages
///
/// One engine instance is shared by all domain crawls; each URL gets its
/// own page. `close` must be called exactly once, after every page opened
/// from the engine has finished.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// Opens a new, isolated rendering context
    async fn new_page(&self) -> RenderResult<Box<dyn RenderPage>>;

    /// Shuts the engine down, releasing the underlying browser process
    async fn close(&self) -> RenderResult<()>;
}

/// A single rendered page
///
/// The operations mirror what the crawl needs from a page: navigate,
/// drive incremental content loading, and read the rendered anchors.
/// Every method is a cooperative suspension point.
#[async_trait]
pub trait RenderPage: Send + Sync {
    /// Navigates to `url`, waiting for the base document to be parsed
    /// (not for every subresource), bounded by `timeout`
    async fn navigate(&self, url: &str, timeout: Duration) -> RenderResult<()>;

    /// Current rendered content height in CSS pixels
    async fn content_height(&self) -> RenderResult<f64>;

    /// Scrolls the viewport forward by `pixels`
    async fn scroll_by(&self, pixels: f64) -> RenderResult<()>;

    /// Extracts every anchor href that is an absolute http/https URL
    async fn extract_links(&self) -> RenderResult<Vec<String>>;

    /// Closes the page, releasing its context
    async fn close(self: Box<Self>) -> RenderResult<()>;
}
