use crate::config::types::{Config, DomainPolicy};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.domains.is_empty() {
        return Err(ConfigError::Validation(
            "configuration must declare at least one [[domain]]".to_string(),
        ));
    }

    let mut seen_keys = HashSet::new();
    for policy in &config.domains {
        validate_domain_policy(policy)?;

        if !seen_keys.insert(policy.key.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate domain key '{}'",
                policy.key
            )));
        }
    }

    Ok(())
}

/// Validates a single domain policy entry
fn validate_domain_policy(policy: &DomainPolicy) -> Result<(), ConfigError> {
    if policy.key.is_empty() {
        return Err(ConfigError::Validation(
            "domain key cannot be empty".to_string(),
        ));
    }

    let base = Url::parse(&policy.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", policy.base_url, e))
    })?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url for '{}' must use http or https, got '{}'",
            policy.key,
            base.scheme()
        )));
    }

    if policy.product_url_patterns.is_empty()
        || policy.product_url_patterns.iter().any(|p| p.is_empty())
    {
        return Err(ConfigError::Validation(format!(
            "domain '{}' must declare at least one non-empty product-url-pattern",
            policy.key
        )));
    }

    if policy.allowed_hosts.is_empty() || policy.allowed_hosts.iter().any(|h| h.is_empty()) {
        return Err(ConfigError::Validation(format!(
            "domain '{}' must declare at least one non-empty allowed-host",
            policy.key
        )));
    }

    if policy.max_depth < 1 {
        return Err(ConfigError::Validation(format!(
            "max-depth for '{}' must be >= 1, got {}",
            policy.key, policy.max_depth
        )));
    }

    if policy.retry_attempts < 1 || policy.retry_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "retry-attempts for '{}' must be between 1 and 10, got {}",
            policy.key, policy.retry_attempts
        )));
    }

    Ok(())
}
