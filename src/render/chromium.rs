//! Chromium-backed rendering engine
//!
//! Wraps chromiumoxide behind the [`RenderEngine`] / [`RenderPage`]
//! traits. One headless browser process serves the whole crawl; every
//! URL gets its own page (isolated rendering context).

use crate::render::{RenderEngine, RenderPage};
use crate::{RenderError, RenderResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::EventDomContentEventFired;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// CDP request timeout; page settling must finish well within this
const PROTOCOL_TIMEOUT: Duration = Duration::from_secs(360);

/// Returns `document.body.scrollHeight` in page context
const CONTENT_HEIGHT_SCRIPT: &str = "document.body.scrollHeight";

/// Collects every absolute http/https anchor href in the rendered DOM
const LINK_EXTRACTION_SCRIPT: &str = r#"
Array.from(document.querySelectorAll("a"))
    .map((a) => a.href)
    .filter((href) => href && (href.startsWith("http://") || href.startsWith("https://")))
"#;

/// A launched headless Chromium instance
pub struct ChromiumEngine {
    browser: Mutex<Browser>,
    handler_task: JoinHandle<()>,
}

impl ChromiumEngine {
    /// Launches a headless browser process
    ///
    /// Launch failure is the one fatal error of a crawl run: no domain
    /// starts without an engine.
    pub async fn launch() -> RenderResult<Self> {
        let config = BrowserConfig::builder()
            .args(vec![
                "--disable-notifications",
                "--disable-geolocation",
                "--disable-permissions-api",
            ])
            .request_timeout(PROTOCOL_TIMEOUT)
            .build()
            .map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        // The handler stream must be driven for the CDP connection to make
        // progress; it runs until the browser closes.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler stopped: {}", e);
                    break;
                }
            }
        });

        tracing::info!("Rendering engine launched");

        Ok(Self {
            browser: Mutex::new(browser),
            handler_task,
        })
    }
}

#[async_trait]
impl RenderEngine for ChromiumEngine {
    async fn new_page(&self) -> RenderResult<Box<dyn RenderPage>> {
        let page = {
            let browser = self.browser.lock().await;
            browser
                .new_page("about:blank")
                .await
                .map_err(|e| RenderError::Protocol(e.to_string()))?
        };

        Ok(Box::new(ChromiumPage { page }))
    }

    async fn close(&self) -> RenderResult<()> {
        {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|e| RenderError::Protocol(e.to_string()))?;
            if let Err(e) = browser.wait().await {
                tracing::debug!("Browser process wait failed: {}", e);
            }
        }

        self.handler_task.abort();
        tracing::info!("Rendering engine closed");
        Ok(())
    }
}

/// One isolated page inside the shared browser
struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    async fn evaluate(&self, script: &str) -> RenderResult<serde_json::Value> {
        let result = self
            .page
            .evaluate_expression(script)
            .await
            .map_err(|e| RenderError::Script(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| RenderError::Script(format!("script result: {}", e)))
    }

    /// Runs a script for its side effect, ignoring the (often undefined) result
    async fn exec(&self, script: &str) -> RenderResult<()> {
        self.page
            .evaluate_expression(script)
            .await
            .map_err(|e| RenderError::Script(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl RenderPage for ChromiumPage {
    async fn navigate(&self, url: &str, timeout: Duration) -> RenderResult<()> {
        // Resolve as soon as the base document is parsed; goto itself waits
        // for full resource load, so race it against DOMContentLoaded.
        let mut dom_ready = self
            .page
            .event_listener::<EventDomContentEventFired>()
            .await
            .map_err(|e| RenderError::Protocol(e.to_string()))?;

        let navigation = async {
            tokio::select! {
                result = self.page.goto(url) => result.map(|_| ()),
                _ = dom_ready.next() => Ok(()),
            }
        };

        match tokio::time::timeout(timeout, navigation).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(RenderError::Protocol(e.to_string())),
            Err(_) => Err(RenderError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }

    async fn content_height(&self) -> RenderResult<f64> {
        let value = self.evaluate(CONTENT_HEIGHT_SCRIPT).await?;
        value
            .as_f64()
            .ok_or_else(|| RenderError::Script(format!("scrollHeight was not a number: {}", value)))
    }

    async fn scroll_by(&self, pixels: f64) -> RenderResult<()> {
        self.exec(&format!("window.scrollBy(0, {})", pixels)).await
    }

    async fn extract_links(&self) -> RenderResult<Vec<String>> {
        let value = self.evaluate(LINK_EXTRACTION_SCRIPT).await?;
        serde_json::from_value(value)
            .map_err(|e| RenderError::Script(format!("link list was not a string array: {}", e)))
    }

    async fn close(self: Box<Self>) -> RenderResult<()> {
        self.page
            .close()
            .await
            .map_err(|e| RenderError::Protocol(e.to_string()))
    }
}
