//! Integration tests for the crawler
//!
//! These tests run full multi-domain crawls against an in-memory
//! rendering engine serving fixed site graphs, end-to-end from config
//! to report.

use async_trait::async_trait;
use shopscout::config::{Config, DomainPolicy};
use shopscout::output::{write_report, REPORT_FILENAME};
use shopscout::render::{RenderEngine, RenderPage};
use shopscout::{crawler, RenderError, RenderResult};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Creates a test policy for one domain
fn create_policy(key: &str, base_url: &str) -> DomainPolicy {
    DomainPolicy {
        key: key.to_string(),
        enabled: true,
        base_url: base_url.to_string(),
        product_url_patterns: vec!["/products/".to_string()],
        allowed_hosts: vec![key.to_string()],
        max_depth: 3,
        crawl_delay_ms: 0,
        retry_attempts: 1,
    }
}

/// In-memory rendering engine backed by a url -> links map
///
/// Hosts listed in `failing_hosts` fail every navigation, which is how
/// the tests model an unreachable domain.
struct FakeEngine {
    site: Arc<HashMap<String, Vec<String>>>,
    failing_hosts: Vec<String>,
    pages_opened: AtomicU32,
    pages_closed: Arc<AtomicU32>,
    close_calls: AtomicU32,
}

impl FakeEngine {
    fn new(site: HashMap<String, Vec<String>>) -> Self {
        Self {
            site: Arc::new(site),
            failing_hosts: vec![],
            pages_opened: AtomicU32::new(0),
            pages_closed: Arc::new(AtomicU32::new(0)),
            close_calls: AtomicU32::new(0),
        }
    }

    fn with_failing_host(mut self, host: &str) -> Self {
        self.failing_hosts.push(host.to_string());
        self
    }
}

#[async_trait]
impl RenderEngine for FakeEngine {
    async fn new_page(&self) -> RenderResult<Box<dyn RenderPage>> {
        self.pages_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakePage {
            site: Arc::clone(&self.site),
            failing_hosts: self.failing_hosts.clone(),
            current: Mutex::new(None),
            pages_closed: Arc::clone(&self.pages_closed),
        }))
    }

    async fn close(&self) -> RenderResult<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FakePage {
    site: Arc<HashMap<String, Vec<String>>>,
    failing_hosts: Vec<String>,
    current: Mutex<Option<String>>,
    pages_closed: Arc<AtomicU32>,
}

#[async_trait]
impl RenderPage for FakePage {
    async fn navigate(&self, url: &str, _timeout: Duration) -> RenderResult<()> {
        if self.failing_hosts.iter().any(|h| url.contains(h.as_str())) {
            return Err(RenderError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: 30_000,
            });
        }
        *self.current.lock().unwrap() = Some(url.to_string());
        Ok(())
    }

    async fn content_height(&self) -> RenderResult<f64> {
        Ok(200.0)
    }

    async fn scroll_by(&self, _pixels: f64) -> RenderResult<()> {
        Ok(())
    }

    async fn extract_links(&self) -> RenderResult<Vec<String>> {
        let url = self
            .current
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| RenderError::Script("no page loaded".to_string()))?;
        Ok(self.site.get(&url).cloned().unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> RenderResult<()> {
        self.pages_closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Two-level shop: seed -> listing pages -> product pages, with slash
/// variants, an external link, and a crawlable/product overlap
fn shop_site(host: &str) -> HashMap<String, Vec<String>> {
    let base = format!("https://{}", host);
    let mut site = HashMap::new();
    site.insert(
        base.clone(),
        vec![
            format!("{}/collections/shirts", base),
            format!("{}/collections/shoes/", base),
            format!("{}/products/featured", base),
            "https://external.com/x".to_string(),
        ],
    );
    site.insert(
        format!("{}/collections/shirts", base),
        vec![
            format!("{}/products/shirt-1", base),
            format!("{}/products/shirt-1/", base),
            format!("{}/products/shirt-2", base),
        ],
    );
    site.insert(
        format!("{}/collections/shoes", base),
        vec![
            format!("{}/products/shoe-1", base),
            // Link back to the seed; must not be re-crawled
            base.clone(),
        ],
    );
    site
}

#[tokio::test(start_paused = true)]
async fn test_full_crawl_single_domain() {
    let config = Config {
        domains: vec![create_policy("my.shop", "https://my.shop")],
    };
    let engine = Arc::new(FakeEngine::new(shop_site("my.shop")));

    let report = crawler::crawl_domains(&config, engine.clone() as Arc<dyn RenderEngine>).await;

    let products = report.products_for("my.shop").unwrap();
    assert_eq!(
        products,
        &[
            "https://my.shop/products/featured".to_string(),
            "https://my.shop/products/shirt-1".to_string(),
            "https://my.shop/products/shirt-2".to_string(),
            "https://my.shop/products/shoe-1".to_string(),
        ]
    );

    // Every opened page was closed, and the engine exactly once.
    assert_eq!(
        engine.pages_opened.load(Ordering::SeqCst),
        engine.pages_closed.load(Ordering::SeqCst)
    );
    assert_eq!(engine.close_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_trailing_slash_variants_collapse() {
    let config = Config {
        domains: vec![create_policy("my.shop", "https://my.shop")],
    };
    let engine = Arc::new(FakeEngine::new(shop_site("my.shop")));

    let report = crawler::crawl_domains(&config, engine as Arc<dyn RenderEngine>).await;
    let products = report.products_for("my.shop").unwrap();

    // shirt-1 and shirt-1/ are one product; no URL appears twice.
    let distinct: HashSet<&String> = products.iter().collect();
    assert_eq!(distinct.len(), products.len());
    assert!(products.contains(&"https://my.shop/products/shirt-1".to_string()));
    assert!(!products.contains(&"https://my.shop/products/shirt-1/".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_external_links_excluded() {
    let config = Config {
        domains: vec![create_policy("my.shop", "https://my.shop")],
    };
    let engine = Arc::new(FakeEngine::new(shop_site("my.shop")));

    let report = crawler::crawl_domains(&config, engine.clone() as Arc<dyn RenderEngine>).await;
    let products = report.products_for("my.shop").unwrap();

    assert!(products.iter().all(|u| u.contains("my.shop")));
    // external.com was never navigated to: seed + 2 listings = 3 pages.
    assert_eq!(engine.pages_opened.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_failing_domain_isolated() {
    let mut site = shop_site("good.shop");
    site.extend(shop_site("dead.shop"));

    let config = Config {
        domains: vec![
            create_policy("good.shop", "https://good.shop"),
            create_policy("dead.shop", "https://dead.shop"),
        ],
    };
    let engine = Arc::new(FakeEngine::new(site).with_failing_host("dead.shop"));

    let report = crawler::crawl_domains(&config, engine.clone() as Arc<dyn RenderEngine>).await;

    // The dead domain contributes an empty set; the good one is complete.
    assert_eq!(report.products_for("dead.shop").unwrap().len(), 0);
    assert_eq!(report.products_for("good.shop").unwrap().len(), 4);
    assert_eq!(engine.close_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_visited_budget_bounds_dense_domain() {
    // Every page links to 20 fresh in-domain pages; only the visited
    // budget (max_depth * 100) can stop this crawl.
    struct DenseEngine;
    struct DensePage {
        current: Mutex<Option<String>>,
    }

    #[async_trait]
    impl RenderEngine for DenseEngine {
        async fn new_page(&self) -> RenderResult<Box<dyn RenderPage>> {
            Ok(Box::new(DensePage {
                current: Mutex::new(None),
            }))
        }

        async fn close(&self) -> RenderResult<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl RenderPage for DensePage {
        async fn navigate(&self, url: &str, _timeout: Duration) -> RenderResult<()> {
            *self.current.lock().unwrap() = Some(url.to_string());
            Ok(())
        }

        async fn content_height(&self) -> RenderResult<f64> {
            Ok(100.0)
        }

        async fn scroll_by(&self, _pixels: f64) -> RenderResult<()> {
            Ok(())
        }

        async fn extract_links(&self) -> RenderResult<Vec<String>> {
            let base = self.current.lock().unwrap().clone().unwrap();
            Ok((0..20).map(|i| format!("{}/p{}", base, i)).collect())
        }

        async fn close(self: Box<Self>) -> RenderResult<()> {
            Ok(())
        }
    }

    let mut policy = create_policy("dense.shop", "https://dense.shop");
    policy.max_depth = 1; // 100-page budget
    let config = Config {
        domains: vec![policy],
    };

    let report =
        crawler::crawl_domains(&config, Arc::new(DenseEngine) as Arc<dyn RenderEngine>).await;

    // Terminates despite infinite crawlable URLs, with no products found.
    assert_eq!(report.products_for("dense.shop").unwrap().len(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_report_written_to_file() {
    let config = Config {
        domains: vec![create_policy("my.shop", "https://my.shop")],
    };
    let engine = Arc::new(FakeEngine::new(shop_site("my.shop")));

    let report = crawler::crawl_domains(&config, engine as Arc<dyn RenderEngine>).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(REPORT_FILENAME);
    write_report(&report, &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["my.shop"].as_array().unwrap().len(), 4);
}
