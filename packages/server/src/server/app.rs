//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware::{self, Next},
    routing::{get, post},
    Router,
};
use tokio::sync::Semaphore;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use analysis::{Analyzer, EthicsModel, PageRenderer, ResultStore};

use crate::config::Config;
use crate::server::middleware::enforce_trusted_host;
use crate::server::routes::{
    analyze_handler, get_analysis_handler, health_handler, root_handler,
};

/// Shared application state
pub struct AppState<R, M, S> {
    pub analyzer: Arc<Analyzer<R, M, S>>,

    /// Bounds the number of analyses running at once
    pub analysis_permits: Arc<Semaphore>,
}

impl<R, M, S> Clone for AppState<R, M, S> {
    fn clone(&self) -> Self {
        Self {
            analyzer: self.analyzer.clone(),
            analysis_permits: self.analysis_permits.clone(),
        }
    }
}

impl<R, M, S> AppState<R, M, S> {
    pub fn new(analyzer: Analyzer<R, M, S>, max_concurrent_analyses: usize) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            analysis_permits: Arc::new(Semaphore::new(max_concurrent_analyses)),
        }
    }
}

/// Build the Axum application router.
///
/// Rate limiting is keyed by peer IP, so the returned app must be
/// served with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn build_app<R, M, S>(state: AppState<R, M, S>, config: &Config) -> Router
where
    R: PageRenderer + 'static,
    M: EthicsModel + 'static,
    S: ResultStore + 'static,
{
    // Replenish one request every (60s / per-minute limit), with the
    // full minute budget available as burst
    let per_minute = config.rate_limit_per_minute.max(1);
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(60_000 / u64::from(per_minute))
            .burst_size(per_minute)
            .finish()
            .expect("rate limiter configuration is valid"),
    );

    routes(state, config).layer(GovernorLayer {
        config: rate_limit_config,
    })
}

/// Routes and per-request middleware, without the rate limiter.
pub(crate) fn routes<R, M, S>(state: AppState<R, M, S>, config: &Config) -> Router
where
    R: PageRenderer + 'static,
    M: EthicsModel + 'static,
    S: ResultStore + 'static,
{
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let allowed_hosts = Arc::new(config.allowed_hosts.clone());

    Router::new()
        .route("/", get(root_handler))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/analyze", post(analyze_handler::<R, M, S>))
        .route("/api/v1/analysis/:id", get(get_analysis_handler::<R, M, S>))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |request: Request, next: Next| {
            let allowed = allowed_hosts.clone();
            async move { enforce_trusted_host(allowed, request, next).await }
        }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis::testing::{MockModel, MockRenderer};
    use analysis::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_config() -> Config {
        Config {
            google_api_key: "test-key".to_string(),
            port: 8000,
            database_url: None,
            redis_url: None,
            cors_origins: vec!["http://localhost:3000".to_string()],
            allowed_hosts: vec!["localhost".to_string()],
            rate_limit_per_minute: 10,
            max_concurrent_analyses: 2,
            user_agent: "EthicsDetector/1.0".to_string(),
            scraping_timeout: 30,
            max_page_size: 5 * 1024 * 1024,
        }
    }

    fn test_app(renderer: MockRenderer, model: MockModel) -> Router {
        let config = test_config();
        let state = AppState::new(
            Analyzer::new(renderer, model, MemoryStore::new()),
            config.max_concurrent_analyses,
        );
        routes(state, &config)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_analyze(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(header::HOST, "localhost")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::HOST, "localhost")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_returns_result_envelope() {
        let renderer = MockRenderer::new().with_page("https://site.com/", "<p>hello</p>");
        let app = test_app(renderer, MockModel::new());

        let response = app
            .oneshot(post_analyze(&json!({"url": "https://site.com/"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["overall_score"], 50);
        assert_eq!(body["data"]["url"], "https://site.com/");
    }

    #[tokio::test]
    async fn test_invalid_url_is_bad_request() {
        let app = test_app(MockRenderer::new(), MockModel::new());

        let response = app
            .oneshot(post_analyze(&json!({"url": "not-a-url"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_render_failure_is_success_false_not_http_error() {
        let app = test_app(MockRenderer::new(), MockModel::new());

        let response = app
            .oneshot(post_analyze(&json!({"url": "https://unreachable.com/"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_analysis_lookup_round_trip() {
        let renderer = MockRenderer::new().with_page("https://site.com/", "<p>hello</p>");
        let app = test_app(renderer, MockModel::new());

        let response = app
            .clone()
            .oneshot(post_analyze(&json!({"url": "https://site.com/"})))
            .await
            .unwrap();
        let body = body_json(response).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(get(&format!("/api/v1/analysis/{}", id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["id"], id.as_str());
    }

    #[tokio::test]
    async fn test_unknown_analysis_is_not_found() {
        let app = test_app(MockRenderer::new(), MockModel::new());

        let response = app
            .oneshot(get(
                "/api/v1/analysis/00000000-0000-0000-0000-000000000000",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app(MockRenderer::new(), MockModel::new());

        let response = app.oneshot(get("/api/v1/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_root_banner() {
        let app = test_app(MockRenderer::new(), MockModel::new());

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["service"], "AI Ethics Detector API");
        assert_eq!(body["status"], "running");
    }

    #[tokio::test]
    async fn test_untrusted_host_is_rejected() {
        let app = test_app(MockRenderer::new(), MockModel::new());

        let request = Request::builder()
            .uri("/api/v1/health")
            .header(header::HOST, "evil.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid host header");
    }

    #[tokio::test]
    async fn test_permits_are_released_between_requests() {
        let renderer = MockRenderer::new().with_page("https://site.com/", "<p>hello</p>");
        let config = test_config();
        let state = AppState::new(
            Analyzer::new(renderer, MockModel::new(), MemoryStore::new()),
            1,
        );
        let app = routes(state, &config);

        for _ in 0..3 {
            let response = app
                .clone()
                .oneshot(post_analyze(&json!({"url": "https://site.com/"})))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
