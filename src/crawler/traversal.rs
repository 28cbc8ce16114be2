//! Batch traversal loop for one domain
//!
//! Repeatedly drains a bounded batch of frontier URLs, renders each
//! concurrently, settles incremental content, extracts links, and feeds
//! them back into the frontier. Per-URL failures are logged and retried,
//! never propagated; a domain crawl always runs to its termination bounds.

use crate::config::DomainPolicy;
use crate::crawler::frontier::Frontier;
use crate::render::{settle_page, RenderEngine};
use crate::RenderResult;
use std::collections::HashSet;
use std::time::Duration;

/// Fixed concurrency cap: URLs rendered at once within one domain
const MAX_CONCURRENT_PAGES: usize = 5;

/// Navigation timeout per URL
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Crawls one domain to completion, returning its product URL set
///
/// The loop takes batches of up to [`MAX_CONCURRENT_PAGES`] URLs while
/// the frontier's termination predicate holds. URLs within a batch
/// complete in nondeterministic order, but every link from a batch is
/// offered to the frontier before the next batch is taken, so batches
/// stay strictly FIFO relative to enqueue order.
pub async fn crawl_domain(policy: &DomainPolicy, engine: &dyn RenderEngine) -> HashSet<String> {
    tracing::info!("Starting crawl for domain: {}", policy.key);

    let mut frontier = Frontier::seed(policy);
    let mut batches = 0_u64;

    while frontier.should_continue(policy) {
        let batch = frontier.take_batch(MAX_CONCURRENT_PAGES);
        batches += 1;

        let fetches = batch.iter().map(|url| fetch_links(engine, url, policy));
        let results = futures::future::join_all(fetches).await;

        for links in results {
            for link in links {
                frontier.offer(&link, policy);
            }
        }

        tracing::debug!(
            "Domain {}: batch {} done, {} visited, {} queued, {} products",
            policy.key,
            batches,
            frontier.visited_count(),
            frontier.queue_len(),
            frontier.product_urls().len()
        );

        if policy.crawl_delay_ms > 0 && frontier.should_continue(policy) {
            tokio::time::sleep(Duration::from_millis(policy.crawl_delay_ms)).await;
        }
    }

    tracing::info!(
        "Finished crawl for domain {}: {} product URLs, {} pages visited in {} batches",
        policy.key,
        frontier.product_urls().len(),
        frontier.visited_count(),
        batches
    );

    frontier.into_product_urls()
}

/// Renders one URL and returns the links found on it
///
/// Navigation is attempted up to `policy.retry_attempts` times. Every
/// failure is logged; after the last attempt the URL simply contributes
/// zero links. The page is closed regardless of outcome.
async fn fetch_links(engine: &dyn RenderEngine, url: &str, policy: &DomainPolicy) -> Vec<String> {
    for attempt in 1..=policy.retry_attempts {
        match fetch_links_once(engine, url).await {
            Ok(links) => {
                tracing::debug!("Found {} links on {}", links.len(), url);
                return links;
            }
            Err(e) => {
                tracing::error!(
                    "Error crawling {} (attempt {}/{}): {}",
                    url,
                    attempt,
                    policy.retry_attempts,
                    e
                );
            }
        }
    }

    Vec::new()
}

async fn fetch_links_once(engine: &dyn RenderEngine, url: &str) -> RenderResult<Vec<String>> {
    let page = engine.new_page().await?;

    tracing::info!("Navigating to: {}", url);
    let result = async {
        page.navigate(url, NAVIGATION_TIMEOUT).await?;
        settle_page(page.as_ref()).await;
        page.extract_links().await
    }
    .await;

    // Close the page whether or not rendering succeeded.
    if let Err(e) = page.close().await {
        tracing::debug!("Failed to close page for {}: {}", url, e);
    }

    result
}
