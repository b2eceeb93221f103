//! HTTP gateway for backend communication
//!
//! This module provides the single chokepoint through which all outbound
//! requests pass:
//! - Bearer-token attachment from the injected session store
//! - Error classification and normalization
//! - Bounded retry with exponential backoff for rate limits and a fixed
//!   delay for network failures
//! - Session clearing on unauthorized responses

pub mod client;
pub mod error;
pub mod retry;

pub use client::Gateway;
pub use error::{ErrorClassification, HttpError};
pub use retry::{execute_with_retry, RetryDecision, RetryPolicy, RetryState};

// Re-export commonly used types
pub use reqwest::{Method, StatusCode};
