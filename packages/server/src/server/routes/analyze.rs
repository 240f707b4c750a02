use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use analysis::{AnalysisError, AnalysisResult, EthicsModel, PageRenderer, ResultStore};

use super::ApiResponse;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
    #[serde(default)]
    pub deep_scan: bool,
}

/// Run an ethics analysis for a URL.
///
/// Concurrency is bounded by the state semaphore; requests queue for a
/// permit rather than being rejected. A main-page render failure is a
/// well-formed `success: false` response, not an HTTP error, so
/// clients can distinguish "the site is broken" from "the API is
/// broken".
pub async fn analyze_handler<R, M, S>(
    Extension(state): Extension<AppState<R, M, S>>,
    Json(request): Json<AnalyzeRequest>,
) -> (StatusCode, Json<ApiResponse<AnalysisResult>>)
where
    R: PageRenderer + 'static,
    M: EthicsModel + 'static,
    S: ResultStore + 'static,
{
    let _permit = match state.analysis_permits.acquire().await {
        Ok(permit) => permit,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Service is shutting down")),
            );
        }
    };

    match state.analyzer.analyze(&request.url, request.deep_scan).await {
        Ok(result) => (StatusCode::OK, Json(ApiResponse::ok(result))),
        Err(e @ AnalysisError::InvalidUrl { .. }) => {
            (StatusCode::BAD_REQUEST, Json(ApiResponse::err(e.to_string())))
        }
        Err(AnalysisError::Render(e)) => (
            StatusCode::OK,
            Json(ApiResponse::err(format!(
                "Could not analyze the website: {}",
                e
            ))),
        ),
        Err(e) => {
            error!(url = %request.url, error = %e, "analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Internal error during analysis")),
            )
        }
    }
}

/// Fetch a previously completed analysis by id.
pub async fn get_analysis_handler<R, M, S>(
    Extension(state): Extension<AppState<R, M, S>>,
    Path(id): Path<Uuid>,
) -> (StatusCode, Json<ApiResponse<AnalysisResult>>)
where
    R: PageRenderer + 'static,
    M: EthicsModel + 'static,
    S: ResultStore + 'static,
{
    match state.analyzer.lookup(id).await {
        Ok(Some(result)) => (StatusCode::OK, Json(ApiResponse::ok(result))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err("Analysis not found")),
        ),
        Err(e) => {
            error!(id = %id, error = %e, "failed to load analysis");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Failed to load analysis")),
            )
        }
    }
}
