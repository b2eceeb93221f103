//! Retry logic for failed requests
//!
//! Rate-limited responses are re-dispatched on an exponential backoff
//! schedule; response-less network failures get a single fixed-delay retry.
//! Every path is capped, and exhaustion surfaces the error that exhausted
//! it: an explicit loop over a per-request attempt counter, no recursion.

use std::future::Future;
use std::time::Duration;

use crate::http::error::{ErrorClassification, HttpError};

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum re-dispatches after rate-limited responses
    pub max_rate_limit_retries: u32,
    /// Backoff base: the nth rate-limit retry waits `base * 2^(n-1)`
    pub rate_limit_base_delay: Duration,
    /// Maximum re-dispatches after response-less network failures
    pub max_network_retries: u32,
    /// Fixed delay before a network retry
    pub network_retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_rate_limit_retries: 3,
            rate_limit_base_delay: Duration::from_secs(1),
            max_network_retries: 1,
            network_retry_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Set the rate-limit retry cap
    pub fn with_max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.max_rate_limit_retries = retries;
        self
    }

    /// Set the network retry cap
    pub fn with_max_network_retries(mut self, retries: u32) -> Self {
        self.max_network_retries = retries;
        self
    }

    /// Disable all retries
    pub fn no_retries() -> Self {
        Self {
            max_rate_limit_retries: 0,
            max_network_retries: 0,
            ..Default::default()
        }
    }
}

/// Decision on whether to re-dispatch a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Re-dispatch after the delay
    Retry { delay: Duration },
    /// Surface the error to the caller
    GiveUp,
}

/// Per-request retry state
///
/// One counter per logical request, shared across both recoverable error
/// kinds; it is scoped to the request's in-flight future and never shared
/// between concurrent requests.
#[derive(Debug)]
pub struct RetryState {
    policy: RetryPolicy,
    attempts: u32,
}

impl RetryState {
    /// Fresh state with the counter at zero
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy, attempts: 0 }
    }

    /// Decide whether the failed request should be re-dispatched,
    /// advancing the counter when it should
    pub fn decide(&mut self, error: &HttpError) -> RetryDecision {
        match error.classification {
            ErrorClassification::RateLimited
                if self.attempts < self.policy.max_rate_limit_retries =>
            {
                self.attempts += 1;
                // 1s, 2s, 4s schedule
                let delay = self.policy.rate_limit_base_delay * 2u32.pow(self.attempts - 1);
                RetryDecision::Retry { delay }
            }
            ErrorClassification::TransientNetworkFailure
                if self.attempts < self.policy.max_network_retries =>
            {
                self.attempts += 1;
                RetryDecision::Retry {
                    delay: self.policy.network_retry_delay,
                }
            }
            _ => RetryDecision::GiveUp,
        }
    }

    /// Retries performed so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Execute a request with retry logic
///
/// `request_fn` is invoked once per attempt, so every re-dispatch rebuilds
/// the request from scratch. `on_error` runs for every failed attempt,
/// before the retry decision; the gateway uses it for its unauthorized and
/// server-fault reactions.
pub async fn execute_with_retry<F, Fut, T, H>(
    mut request_fn: F,
    policy: RetryPolicy,
    mut on_error: H,
) -> Result<T, HttpError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, HttpError>>,
    H: FnMut(&HttpError),
{
    let mut state = RetryState::new(policy);

    loop {
        match request_fn().await {
            Ok(response) => return Ok(response),
            Err(error) => {
                on_error(&error);
                match state.decide(&error) {
                    RetryDecision::Retry { delay } => {
                        log::warn!(
                            "Request failed (retry {}), re-dispatching after {:?}: {}",
                            state.attempts(),
                            delay,
                            error
                        );
                        tokio::time::sleep(delay).await;
                    }
                    RetryDecision::GiveUp => {
                        if state.attempts() > 0 {
                            log::error!(
                                "Request failed after {} retries: {}",
                                state.attempts(),
                                error
                            );
                        }
                        return Err(error);
                    }
                }
            }
        }
    }
}
