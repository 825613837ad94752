//! Per-client request rate limiting
//!
//! Applied to every route. Responses carry `RateLimit-*` headers; requests
//! over the limit get a JSON 429 with `Retry-After`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::client::client_ip;
use platform::rate_limit::{RateLimitConfig, RateLimitResult, RateLimitStore};

use crate::AppError;

const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
const RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

pub struct RateLimitState<S> {
    pub store: Arc<S>,
    pub config: RateLimitConfig,
    /// Key by the first `X-Forwarded-For` entry instead of the peer address
    pub trust_proxy: bool,
}

impl<S> Clone for RateLimitState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            trust_proxy: self.trust_proxy,
        }
    }
}

pub async fn limit_by_client<S>(
    State(state): State<RateLimitState<S>>,
    req: Request,
    next: Next,
) -> Response
where
    S: RateLimitStore + Sync + 'static,
{
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let key = client_ip(req.headers(), peer, state.trust_proxy)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let result = state.store.check_and_increment(&key, &state.config).await;

    if !result.allowed {
        tracing::warn!(client = %key, limit = result.limit, "Rate limit exceeded");
        let mut response =
            AppError::too_many_requests("Too many requests, please try again later.")
                .into_response();
        let headers = response.headers_mut();
        set_rate_limit_headers(headers, &result);
        headers.insert(header::RETRY_AFTER, HeaderValue::from(reset_secs(&result)));
        return response;
    }

    let mut response = next.run(req).await;
    set_rate_limit_headers(response.headers_mut(), &result);
    response
}

fn set_rate_limit_headers(headers: &mut HeaderMap, result: &RateLimitResult) {
    headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(result.limit));
    headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(result.remaining));
    headers.insert(RATE_LIMIT_RESET, HeaderValue::from(reset_secs(result)));
}

/// Whole seconds until the window resets, rounded up
fn reset_secs(result: &RateLimitResult) -> u64 {
    result.reset_after.as_millis().div_ceil(1000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Router, middleware};
    use platform::rate_limit::MemoryRateLimitStore;
    use tower::ServiceExt;

    fn limited_app(max_requests: u32, trust_proxy: bool) -> Router {
        let state = RateLimitState {
            store: Arc::new(MemoryRateLimitStore::new()),
            config: RateLimitConfig::new(max_requests, Duration::from_secs(60)),
            trust_proxy,
        };
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                state,
                limit_by_client::<MemoryRateLimitStore>,
            ))
    }

    fn from_peer(ip: [u8; 4]) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri("/")
            .extension(ConnectInfo(SocketAddr::from((ip, 40000))))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_request_after_limit_is_rejected() {
        let app = limited_app(2, false);

        for remaining in ["1", "0"] {
            let response = app.clone().oneshot(from_peer([10, 0, 0, 1])).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()["ratelimit-limit"], "2");
            assert_eq!(response.headers()["ratelimit-remaining"], remaining);
        }

        let response = app.clone().oneshot(from_peer([10, 0, 0, 1])).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key(header::RETRY_AFTER));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Too many requests, please try again later.");

        let response = app.oneshot(from_peer([10, 0, 0, 2])).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_forwarded_clients_counted_separately_behind_proxy() {
        let app = limited_app(1, true);

        for client in ["203.0.113.7", "203.0.113.8"] {
            let mut request = from_peer([127, 0, 0, 1]);
            request
                .headers_mut()
                .insert("x-forwarded-for", HeaderValue::from_static(client));
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{client}");
        }

        let response = app.oneshot(from_peer([127, 0, 0, 1])).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
