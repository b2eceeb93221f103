//! Integration tests exercising the public gateway surface

use std::sync::Arc;
use std::time::Duration;

use staybook_client::http::execute_with_retry;
use staybook_client::{
    ErrorClassification, Gateway, GatewayConfig, HttpError, MemorySessionStore, RetryPolicy,
    SessionStore,
};

fn rate_limited() -> HttpError {
    HttpError {
        status_code: Some(429),
        classification: ErrorClassification::RateLimited,
        message: "Too many requests".to_string(),
        details: None,
    }
}

#[test]
fn env_override_wins_base_url_resolution() {
    // Save original env var value for restoration
    let original = std::env::var(staybook_client::config::BASE_URL_ENV).ok();

    std::env::set_var(staybook_client::config::BASE_URL_ENV, "http://x");
    assert_eq!(staybook_client::resolve_base_url(), "http://x");

    // Restore original environment state
    match original {
        Some(value) => std::env::set_var(staybook_client::config::BASE_URL_ENV, value),
        None => std::env::remove_var(staybook_client::config::BASE_URL_ENV),
    }
}

#[test]
fn clear_session_empties_the_store() {
    let session = Arc::new(MemorySessionStore::with_token("tok"));
    let gateway = Gateway::new(
        GatewayConfig::new("http://localhost:5000"),
        session.clone() as Arc<dyn SessionStore>,
    )
    .unwrap();

    gateway.clear_session().unwrap();
    assert_eq!(session.bearer_token(), None);
}

#[test]
fn default_policy_matches_documented_caps() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_rate_limit_retries, 3);
    assert_eq!(policy.rate_limit_base_delay, Duration::from_secs(1));
    assert_eq!(policy.max_network_retries, 1);
    assert_eq!(policy.network_retry_delay, Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn rate_limit_exhaustion_surfaces_the_original_error() {
    let start = tokio::time::Instant::now();

    let result: Result<(), HttpError> = execute_with_retry(
        || async { Err(rate_limited()) },
        RetryPolicy::default(),
        |_| {},
    )
    .await;

    let error = result.unwrap_err();
    assert_eq!(error.status_code, Some(429));
    assert_eq!(error.classification, ErrorClassification::RateLimited);
    // The full 1s/2s/4s schedule ran before surfacing
    assert_eq!(start.elapsed(), Duration::from_secs(7));
}

#[tokio::test(start_paused = true)]
async fn success_passes_through_without_delay() {
    let start = tokio::time::Instant::now();

    let result = execute_with_retry(
        || async { Ok::<_, HttpError>(serde_json::json!({ "ok": true })) },
        RetryPolicy::default(),
        |_| panic!("no error expected"),
    )
    .await;

    assert_eq!(result.unwrap(), serde_json::json!({ "ok": true }));
    assert_eq!(start.elapsed(), Duration::ZERO);
}
