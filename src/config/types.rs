use serde::Deserialize;

/// Main configuration structure for Shopscout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// One entry per target e-commerce domain
    #[serde(default, rename = "domain")]
    pub domains: Vec<DomainPolicy>,
}

impl Config {
    /// Returns the domain policies that are enabled for crawling
    pub fn enabled_domains(&self) -> Vec<&DomainPolicy> {
        self.domains.iter().filter(|d| d.enabled).collect()
    }
}

/// Per-domain crawl policy
///
/// Immutable for the lifetime of a crawl; read-only to the crawl core.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainPolicy {
    /// Key identifying the domain in the final report (e.g. "snitch.co.in")
    pub key: String,

    /// Whether this domain is crawled at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seed URL the crawl starts from
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Substring patterns identifying product detail pages
    #[serde(rename = "product-url-patterns")]
    pub product_url_patterns: Vec<String>,

    /// Host substrings a URL must match to stay in-domain
    #[serde(rename = "allowed-hosts")]
    pub allowed_hosts: Vec<String>,

    /// Depth budget. This is a volume heuristic, not a hop count: the
    /// crawl stops once `max_depth * 100` distinct URLs have been visited.
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Pause between batches while work remains (milliseconds)
    #[serde(rename = "crawl-delay-ms", default)]
    pub crawl_delay_ms: u64,

    /// Total navigation attempts per URL before giving up on it
    #[serde(rename = "retry-attempts", default = "default_retry_attempts")]
    pub retry_attempts: u32,
}

impl DomainPolicy {
    /// Maximum number of distinct URLs this domain may visit
    pub fn visited_budget(&self) -> usize {
        self.max_depth as usize * 100
    }
}

fn default_enabled() -> bool {
    true
}

fn default_retry_attempts() -> u32 {
    1
}
