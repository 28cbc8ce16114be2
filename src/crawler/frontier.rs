//! Frontier management for one domain's crawl
//!
//! The frontier owns the visited-set, the pending FIFO queue, and the
//! accumulated product URL set for a single domain. Every URL passes
//! through [`Frontier::offer`], which normalizes it and decides whether
//! it is a product, a page worth crawling, or noise.

use crate::config::DomainPolicy;
use crate::url::{is_in_allowed_domain, is_product_url, normalize_url};
use std::collections::{HashSet, VecDeque};

/// Hard cap on product URLs collected per domain
const MAX_PRODUCT_URLS: usize = 1000;

/// Per-domain mutable crawl state
///
/// Invariant: every URL in `queue` or `product_urls` is also in `visited`,
/// so no URL is ever processed twice. `visited` only grows.
#[derive(Debug)]
pub struct Frontier {
    visited: HashSet<String>,
    queue: VecDeque<String>,
    product_urls: HashSet<String>,
}

impl Frontier {
    /// Creates the frontier for a domain, seeded with its base URL
    pub fn seed(policy: &DomainPolicy) -> Self {
        let seed = normalize_url(&policy.base_url);
        let mut visited = HashSet::new();
        visited.insert(seed.clone());

        let mut queue = VecDeque::new();
        queue.push_back(seed);

        Self {
            visited,
            queue,
            product_urls: HashSet::new(),
        }
    }

    /// Removes and returns up to `n` URLs from the front of the queue
    ///
    /// FIFO order is preserved; fewer than `n` are returned when the
    /// queue runs short.
    pub fn take_batch(&mut self, n: usize) -> Vec<String> {
        let take = n.min(self.queue.len());
        self.queue.drain(..take).collect()
    }

    /// Offers a freshly extracted URL to the frontier
    ///
    /// The URL is normalized, then in priority order:
    /// 1. in-domain product URL, not yet visited -> recorded as a product
    ///    (product acceptance always wins; such a URL is never enqueued);
    /// 2. in-domain, not yet visited, visited budget remaining -> enqueued
    ///    for crawling;
    /// 3. in-domain, not yet visited, budget exhausted -> marked visited
    ///    only;
    /// 4. already visited -> no-op;
    /// 5. out-of-domain or malformed -> dropped without touching any state.
    pub fn offer(&mut self, url: &str, policy: &DomainPolicy) {
        let normalized = normalize_url(url);

        if !is_in_allowed_domain(&normalized, policy) {
            return;
        }

        if self.visited.contains(&normalized) {
            return;
        }

        if is_product_url(&normalized, policy) {
            self.product_urls.insert(normalized.clone());
        } else if self.visited.len() < policy.visited_budget() {
            self.queue.push_back(normalized.clone());
        }

        self.visited.insert(normalized);
    }

    /// Termination predicate, checked before each batch
    ///
    /// The crawl continues while work remains and neither bound has been
    /// hit. `max_depth * 100` caps total visited pages; it approximates
    /// depth by volume rather than tracking hops from the seed.
    pub fn should_continue(&self, policy: &DomainPolicy) -> bool {
        !self.queue.is_empty()
            && self.visited.len() < policy.visited_budget()
            && self.product_urls.len() < MAX_PRODUCT_URLS
    }

    /// Number of distinct URLs ever seen
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs waiting to be crawled
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Product URLs collected so far
    pub fn product_urls(&self) -> &HashSet<String> {
        &self.product_urls
    }

    /// Consumes the frontier, yielding the domain's product URL set
    pub fn into_product_urls(self) -> HashSet<String> {
        self.product_urls
    }
}
