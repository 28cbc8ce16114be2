//! Multi-domain orchestration
//!
//! Runs one independent traversal loop per enabled domain, all sharing a
//! single rendering engine (each URL still gets its own page), and
//! assembles the per-domain product sets into the final report.

use crate::config::Config;
use crate::crawler::traversal::crawl_domain;
use crate::output::CrawlReport;
use crate::render::RenderEngine;
use std::sync::Arc;

/// Crawls every enabled domain concurrently over a shared engine
///
/// All domain loops are joined before the engine is closed; a domain
/// that degrades internally (every URL failing) still contributes an
/// empty set rather than disturbing the others. The engine is closed
/// exactly once, after the last loop finishes, even on that path.
pub async fn crawl_domains(config: &Config, engine: Arc<dyn RenderEngine>) -> CrawlReport {
    let enabled = config.enabled_domains();
    tracing::info!(
        "Starting crawler for {} enabled domains: {:?}",
        enabled.len(),
        enabled.iter().map(|d| d.key.as_str()).collect::<Vec<_>>()
    );

    let crawls = enabled
        .iter()
        .map(|policy| async {
            let products = crawl_domain(policy, engine.as_ref()).await;
            (policy.key.clone(), products)
        })
        .collect::<Vec<_>>();

    let results = futures::future::join_all(crawls).await;

    if let Err(e) = engine.close().await {
        tracing::warn!("Failed to close rendering engine: {}", e);
    }

    let mut report = CrawlReport::new();
    for (key, products) in results {
        report.insert(key, products);
    }

    report
}
