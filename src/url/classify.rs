use crate::config::DomainPolicy;
use url::Url;

/// Checks whether a URL points at a product detail page
///
/// True iff the URL (case-insensitively) contains any of the policy's
/// product URL patterns as a substring. Pure predicate, no side effects.
///
/// # Examples
///
/// ```no_run
/// use shopscout::url::is_product_url;
/// # use shopscout::config::DomainPolicy;
/// # fn example(policy: &DomainPolicy) {
/// // policy.product_url_patterns == ["/products/"]
/// assert!(is_product_url("https://example.com/Products/123", policy));
/// assert!(!is_product_url("https://example.com/collections/all", policy));
/// # }
/// ```
pub fn is_product_url(url: &str, policy: &DomainPolicy) -> bool {
    let lowered = url.to_lowercase();
    policy
        .product_url_patterns
        .iter()
        .any(|pattern| lowered.contains(&pattern.to_lowercase()))
}

/// Checks whether a URL stays inside the domain's allowed hosts
///
/// True iff the URL parses as a valid absolute URL and its host contains
/// (substring match, not exact match) any of the policy's allowed hosts.
/// This means `www.snitch.co.in` matches the allowed host `snitch.co.in`.
/// A URL that fails to parse, or has no host, classifies as `false`;
/// parsing failure is never an error here.
pub fn is_in_allowed_domain(url: &str, policy: &DomainPolicy) -> bool {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };

    let host = match parsed.host_str() {
        Some(h) => h,
        None => return false,
    };

    policy.allowed_hosts.iter().any(|allowed| host.contains(allowed.as_str()))
}
