//! Gateway configuration and base-address resolution
//!
//! The base target address is resolved once at client construction, never
//! per-request. Resolution order: explicit environment override, then a
//! hostname-based production fallback, then the localhost development
//! address, then the default production address.

use std::time::Duration;

use crate::http::RetryPolicy;

/// Environment variable overriding the resolved base address
pub const BASE_URL_ENV: &str = "STAYBOOK_API_BASE_URL";

/// Production backend origin
pub const PRODUCTION_BASE_URL: &str =
    "https://hotel-management-system-backend-reuj.onrender.com";

/// Development backend origin
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:5000";

/// Overall per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Hostname fragments that pin resolution to the production backend
const PRODUCTION_HOST_MARKERS: [&str; 2] = [
    "hotel-management-system-backend-reuj.onrender.com",
    "vercel.app",
];

/// Configuration for the outbound request gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base address every request path is joined onto
    pub base_url: String,
    /// Overall request timeout
    pub timeout: Duration,
    /// Retry policy for recoverable failures
    pub retry_policy: RetryPolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: resolve_base_url(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl GatewayConfig {
    /// Create a configuration with an explicit base address
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }
}

/// Resolve the backend base address from the process environment
pub fn resolve_base_url() -> String {
    let override_url = std::env::var(BASE_URL_ENV).ok();
    resolve_base_url_from(override_url.as_deref(), &current_hostname())
}

/// Resolution logic over explicit inputs
fn resolve_base_url_from(override_url: Option<&str>, host: &str) -> String {
    if let Some(url) = override_url {
        if !url.is_empty() {
            return url.to_string();
        }
    }

    if PRODUCTION_HOST_MARKERS
        .iter()
        .any(|marker| host.contains(marker))
    {
        return PRODUCTION_BASE_URL.to_string();
    }

    if host == "localhost" {
        return DEVELOPMENT_BASE_URL.to_string();
    }

    PRODUCTION_BASE_URL.to_string()
}

/// Hostname of the machine the client runs on
fn current_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let resolved = resolve_base_url_from(Some("http://x"), "localhost");
        assert_eq!(resolved, "http://x");
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let resolved = resolve_base_url_from(Some(""), "localhost");
        assert_eq!(resolved, DEVELOPMENT_BASE_URL);
    }

    #[test]
    fn test_localhost_resolves_to_development() {
        let resolved = resolve_base_url_from(None, "localhost");
        assert_eq!(resolved, "http://localhost:5000");
    }

    #[test]
    fn test_production_host_markers() {
        let resolved = resolve_base_url_from(None, "my-app.vercel.app");
        assert_eq!(resolved, PRODUCTION_BASE_URL);

        let resolved = resolve_base_url_from(
            None,
            "hotel-management-system-backend-reuj.onrender.com",
        );
        assert_eq!(resolved, PRODUCTION_BASE_URL);
    }

    #[test]
    fn test_unknown_host_defaults_to_production() {
        let resolved = resolve_base_url_from(None, "build-agent-17");
        assert_eq!(resolved, PRODUCTION_BASE_URL);
    }

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::new("http://localhost:5000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry_policy.max_rate_limit_retries, 3);
        assert_eq!(config.retry_policy.max_network_retries, 1);
    }
}
