//! Crawler module: frontier management, per-domain traversal, and
//! multi-domain orchestration
//!
//! The core crawl logic lives here:
//! - [`Frontier`]: visited-set, FIFO queue, and product set for one domain
//! - [`crawl_domain`]: the concurrency-bounded batch traversal loop
//! - [`crawl_domains`]: one loop per enabled domain over a shared engine

mod frontier;
mod orchestrator;
mod traversal;

pub use frontier::Frontier;
pub use orchestrator::crawl_domains;
pub use traversal::crawl_domain;

use crate::config::Config;
use crate::output::CrawlReport;
use crate::render::ChromiumEngine;
use crate::ScoutError;
use std::sync::Arc;

/// Runs a complete crawl: launches the rendering engine, crawls every
/// enabled domain, and returns the assembled report
///
/// Engine launch failure is fatal and aborts before any domain starts;
/// everything after that point degrades per-URL or per-domain instead
/// of failing the run.
pub async fn crawl(config: &Config) -> Result<CrawlReport, ScoutError> {
    let engine = Arc::new(ChromiumEngine::launch().await?);
    Ok(crawl_domains(config, engine).await)
}
