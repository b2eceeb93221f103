//! The outbound request gateway
//!
//! Every call to the booking backend passes through [`Gateway`]: it attaches
//! the session bearer token, applies the shared JSON/cookie/timeout
//! configuration, and reacts to failed responses — clearing the session on
//! 401, logging server faults, and feeding recoverable failures to the retry
//! loop. Successful responses pass through unchanged.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::http::error::{ErrorClassification, HttpError};
use crate::http::retry::{execute_with_retry, RetryPolicy};
use crate::session::{SessionStore, SESSION_TOKEN_KEY};

/// Authenticated, retrying HTTP client for the booking backend
///
/// Constructed explicitly and passed by reference; holds its resolved base
/// address and retry policy as configuration instead of relying on process
/// globals.
pub struct Gateway {
    client: ReqwestClient,
    base_url: Url,
    cookies: Arc<Jar>,
    session: Arc<dyn SessionStore>,
    retry_policy: RetryPolicy,
}

impl Gateway {
    /// Create a gateway from explicit configuration and a session store
    pub fn new(config: GatewayConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| Error::Configuration {
            message: format!("Invalid base URL: {}", config.base_url),
            source: Some(anyhow::anyhow!(e)),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        // Cookies ride along on every request, mirroring the browser
        // client's credentialed mode
        let cookies = Arc::new(Jar::default());
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .cookie_provider(cookies.clone())
            .build()
            .map_err(|e| Error::HttpRequest {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url,
            cookies,
            session,
            retry_policy: config.retry_policy,
        })
    }

    /// Create with the environment-resolved configuration
    pub fn with_default_config(session: Arc<dyn SessionStore>) -> Result<Self> {
        Self::new(GatewayConfig::default(), session)
    }

    /// Resolved base address requests are joined onto
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET a JSON resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_json(Method::GET, path, None).await
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.request_json(Method::POST, path, Some(body)).await
    }

    /// PUT a JSON body and decode the JSON response
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.request_json(Method::PUT, path, Some(body)).await
    }

    /// DELETE a resource and decode the JSON response
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request_json(Method::DELETE, path, None).await
    }

    /// Dispatch and decode as JSON
    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let response = self.execute(method, path, body).await?;
        response.json::<T>().await.map_err(|e| Error::Http {
            message: format!("Failed to parse response as JSON: {}", e),
            status_code: None,
            source: Some(anyhow::anyhow!(e)),
        })
    }

    /// Dispatch a request through the full interceptor chain, returning the
    /// raw successful response
    ///
    /// The chain is reapplied on every attempt: the bearer token is re-read
    /// from the session store and the request rebuilt before each dispatch.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response> {
        let url = self.endpoint_url(path)?;

        let response = execute_with_retry(
            || {
                let method = method.clone();
                let url = url.clone();
                let body = body.clone();
                async move {
                    let request = self.build_request(method, url, body)?;
                    let response = self
                        .client
                        .execute(request)
                        .await
                        .map_err(HttpError::from_request_error)?;

                    if !response.status().is_success() {
                        return Err(HttpError::from_response(response).await);
                    }

                    Ok(response)
                }
            },
            self.retry_policy.clone(),
            |error| self.react_to_error(error),
        )
        .await?;

        Ok(response)
    }

    /// Remove the stored session credential from every representation:
    /// the session-store entry and the cookie jar's session cookie
    pub fn clear_session(&self) -> Result<()> {
        let expired = format!("{}=; Max-Age=0", SESSION_TOKEN_KEY);
        self.cookies.add_cookie_str(&expired, &self.base_url);
        self.session.clear()
    }

    /// Join a request path onto the base address
    fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| Error::HttpRequest {
            message: format!("Failed to join path: {}", path),
            source: Some(Box::new(e)),
        })
    }

    /// Build one attempt's request, attaching the bearer token when a
    /// session exists
    fn build_request(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> std::result::Result<Request, HttpError> {
        let path = url.path().to_string();
        let mut builder = self.client.request(method, url);

        match self.session.bearer_token() {
            Some(token) => {
                log::debug!("Session token attached to request for {}", path);
                builder = builder.bearer_auth(token);
            }
            None => {
                log::warn!("No session token found for {}; proceeding unauthenticated", path);
            }
        }

        if let Some(body) = body {
            builder = builder.json(&body);
        }

        builder.build().map_err(|e| HttpError {
            status_code: None,
            classification: ErrorClassification::Other,
            message: format!("Failed to build request: {}", e),
            details: None,
        })
    }

    /// Side effects on failed attempts, applied before the retry decision
    fn react_to_error(&self, error: &HttpError) {
        match error.classification {
            ErrorClassification::AuthenticationExpired => {
                log::error!(
                    "Unauthorized response; clearing stored session: {}",
                    error.message
                );
                // The caller decides UI consequences; no navigation here
                if let Err(err) = self.clear_session() {
                    log::error!("Failed to clear session after 401: {}", err);
                }
            }
            ErrorClassification::ServerFault => {
                log::error!(
                    "Server fault {}: {} (details: {})",
                    error.status_code.unwrap_or_default(),
                    error.message,
                    error
                        .details
                        .as_ref()
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "none".to_string())
                );
            }
            _ => {}
        }
    }
}
