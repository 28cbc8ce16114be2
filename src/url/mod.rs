//! URL handling module for Shopscout
//!
//! Provides the canonical URL normalization and the pure classification
//! predicates that decide whether a discovered URL is a product page and
//! whether it stays inside a domain's allowed hosts.

mod classify;
mod normalize;

pub use classify::{is_in_allowed_domain, is_product_url};
pub use normalize::normalize_url;
