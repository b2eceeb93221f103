//! Request forwarding
//!
//! Everything under the configured path prefix is re-issued against the
//! backend origin: the Host header is rewritten to the backend's (origin
//! change), hop-by-hop headers are stripped in both directions, and the
//! response is relayed back unchanged. Requests outside the prefix are
//! answered 404 - the frontend dev server owns those.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use url::Url;

/// Upper bound on buffered request/response bodies
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Headers that describe the connection rather than the request, never
/// forwarded through a proxy
const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Shared proxy state
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub backend: Url,
    pub path_prefix: String,
}

/// Build the router: every method and path lands in the forwarder
pub fn router(state: AppState) -> Router {
    Router::new().fallback(forward).with_state(state)
}

/// Forward one request to the backend origin
async fn forward(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path().to_string();
    if !is_proxied_path(&state.path_prefix, &path) {
        tracing::debug!(%path, "outside proxied prefix");
        return StatusCode::NOT_FOUND.into_response();
    }

    match forward_inner(state, req).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(%path, error = %err, "forwarding failed");
            (
                StatusCode::BAD_GATEWAY,
                format!("devproxy: upstream request failed: {err}"),
            )
                .into_response()
        }
    }
}

async fn forward_inner(state: AppState, req: Request) -> anyhow::Result<Response> {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .to_string();
    let upstream = upstream_url(&state.backend, &path_and_query)?;

    let method = req.method().clone();
    let request_headers = forwardable_headers(req.headers());
    let request_body = to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|err| anyhow::anyhow!("failed to read request body: {err}"))?;

    tracing::debug!(%method, %upstream, "forwarding");

    let upstream_response = state
        .client
        .request(method, upstream)
        .headers(request_headers)
        .body(request_body)
        .send()
        .await?;

    let status = upstream_response.status();
    let response_headers = forwardable_headers(upstream_response.headers());
    let response_body = upstream_response.bytes().await?;

    tracing::debug!(%status, bytes = response_body.len(), "relaying response");

    let mut response = Response::new(Body::from(response_body));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}

/// Whether the request path falls under the proxied prefix
pub fn is_proxied_path(prefix: &str, path: &str) -> bool {
    path.starts_with(prefix)
}

/// Join the original path and query onto the backend origin
pub fn upstream_url(backend: &Url, path_and_query: &str) -> anyhow::Result<Url> {
    backend
        .join(path_and_query)
        .map_err(|err| anyhow::anyhow!("cannot join {path_and_query} onto backend URL: {err}"))
}

/// Copy of `headers` without hop-by-hop headers, Host (rewritten by the
/// upstream client), or Content-Length (recomputed for the buffered body)
pub fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::new();
    for (name, value) in headers {
        if is_forwardable(name) {
            forwarded.append(name.clone(), value.clone());
        }
    }
    forwarded
}

fn is_forwardable(name: &HeaderName) -> bool {
    let name = name.as_str();
    name != "host" && name != "content-length" && !HOP_BY_HOP_HEADERS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_prefix_matching() {
        assert!(is_proxied_path("/api", "/api/hotels/search"));
        assert!(is_proxied_path("/api", "/api"));
        assert!(!is_proxied_path("/api", "/assets/logo.svg"));
        assert!(!is_proxied_path("/api", "/"));
    }

    #[test]
    fn test_upstream_url_preserves_path_and_query() {
        let backend = Url::parse("https://backend.example.com/").unwrap();
        let url = upstream_url(&backend, "/api/hotels/search?destination=Lisbon&page=2").unwrap();
        assert_eq!(
            url.as_str(),
            "https://backend.example.com/api/hotels/search?destination=Lisbon&page=2"
        );
    }

    #[test]
    fn test_upstream_url_accepts_origin_without_trailing_slash() {
        let backend = Url::parse("http://localhost:5000").unwrap();
        let url = upstream_url(&backend, "/api/bookings").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/bookings");
    }

    #[test]
    fn test_hop_by_hop_and_host_headers_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static("localhost:5173"));
        headers.insert("connection", HeaderValue::from_static("keep-alive"));
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));
        headers.insert("content-length", HeaderValue::from_static("42"));
        headers.insert("authorization", HeaderValue::from_static("Bearer tok"));
        headers.insert("cookie", HeaderValue::from_static("session_id=abc"));

        let forwarded = forwardable_headers(&headers);

        assert!(forwarded.get("host").is_none());
        assert!(forwarded.get("connection").is_none());
        assert!(forwarded.get("transfer-encoding").is_none());
        assert!(forwarded.get("content-length").is_none());
        // Credentials still ride through to the backend
        assert_eq!(
            forwarded.get("authorization").unwrap(),
            "Bearer tok"
        );
        assert_eq!(forwarded.get("cookie").unwrap(), "session_id=abc");
    }
}
