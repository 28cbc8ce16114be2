//! Output module for the final crawl report
//!
//! The report is a mapping from domain key to the distinct product URLs
//! discovered for that domain, emitted as pretty-printed JSON both to
//! stdout and to a fixed-name file in the working directory.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Fixed name of the report file written to the working directory
pub const REPORT_FILENAME: &str = "product-urls.json";

/// Final crawl artifact: domain key -> sorted product URLs
///
/// URLs are stored sorted so the serialized report is deterministic for
/// a given crawl result.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct CrawlReport {
    domains: BTreeMap<String, Vec<String>>,
}

impl CrawlReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a domain's product URL set in the report
    pub fn insert(&mut self, domain_key: String, product_urls: HashSet<String>) {
        let mut urls: Vec<String> = product_urls.into_iter().collect();
        urls.sort();
        self.domains.insert(domain_key, urls);
    }

    /// Product URLs recorded for a domain, if it was crawled
    pub fn products_for(&self, domain_key: &str) -> Option<&Vec<String>> {
        self.domains.get(domain_key)
    }

    /// Total product URLs across all domains
    pub fn total_products(&self) -> usize {
        self.domains.values().map(|urls| urls.len()).sum()
    }

    /// Serializes the report as pretty-printed JSON
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Writes the report to `path` as pretty-printed JSON
pub fn write_report(report: &CrawlReport, path: &Path) -> crate::Result<()> {
    let json = report.to_pretty_json()?;
    std::fs::write(path, json)?;
    tracing::info!("Report written to {}", path.display());
    Ok(())
}
