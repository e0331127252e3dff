//! HTTP service exposing the pipeline.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/scrapeWebsite` | Fetch a page and return its metadata and body text |
//! | `POST` | `/summarizeContent` | Summarize caller-supplied text |
//! | `POST` | `/scrapeAndSummarize` | Fetch, extract and summarize in one call |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! Successful responses are `{ "success": true, "data": ... }`. Failures are
//! `{ "error": "...", "details": "..." }` with `400` for bad input and `500`
//! for upstream failures. `OPTIONS` answers `204` with permissive CORS
//! headers; any other method is `405`.

use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::types::{ScrapeRequest, SummarizeRequest, SummaryData};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, MethodRouter},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Build the router for `pipeline`
pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/scrapeWebsite", endpoint(post(handle_scrape)))
        .route("/summarizeContent", endpoint(post(handle_summarize)))
        .route("/scrapeAndSummarize", endpoint(post(handle_scrape_and_summarize)))
        .route("/health", endpoint(get(handle_health)))
        .layer(axum::middleware::map_response(allow_any_origin))
        .with_state(pipeline)
}

/// Bind `bind_addr` and serve until the process exits
pub async fn run_server(bind_addr: &str, pipeline: Arc<Pipeline>) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "LinkBrief listening");
    serve(listener, pipeline).await
}

/// Serve on an already-bound listener
pub async fn serve(listener: TcpListener, pipeline: Arc<Pipeline>) -> std::io::Result<()> {
    axum::serve(listener, router(pipeline)).await
}

/// Add the CORS preflight and the JSON `405` to a route
fn endpoint(route: MethodRouter<Arc<Pipeline>>) -> MethodRouter<Arc<Pipeline>> {
    route.options(handle_preflight).fallback(method_not_allowed)
}

async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

// ============ Responses ============

#[derive(Serialize)]
struct SuccessBody<T> {
    success: bool,
    data: T,
}

fn success<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(SuccessBody { success: true, data })).into_response()
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// Error that converts into a JSON HTTP response
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    error: String,
    details: Option<String>,
}

impl ApiError {
    fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
            details: None,
        }
    }

    /// Map a pipeline failure; `failure` labels upstream (500) errors
    fn from_pipeline(err: PipelineError, failure: &str) -> Self {
        match err {
            PipelineError::Validation(e) => Self::bad_request(e.to_string()),
            PipelineError::Fetch(e) => Self::upstream(failure, e.to_string()),
            PipelineError::Summarize(e) => Self::upstream(failure, e.to_string()),
        }
    }

    fn upstream(failure: &str, details: String) -> Self {
        tracing::error!(error = failure, details = %details, "Request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: failure.to_string(),
            details: Some(details),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Invalid JSON body".to_string(),
            details: Some(rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}

// ============ Handlers ============

async fn handle_preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                "Content-Type, Authorization",
            ),
            (header::ACCESS_CONTROL_MAX_AGE, "3600"),
        ],
    )
        .into_response()
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "Method not allowed".to_string(),
            details: None,
        }),
    )
        .into_response()
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /scrapeWebsite`
async fn handle_scrape(
    State(pipeline): State<Arc<Pipeline>>,
    body: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    let url = required(request.url, "URL is required")?;

    let metadata = pipeline
        .scrape(&url)
        .await
        .map_err(|e| ApiError::from_pipeline(e, "Failed to scrape website"))?;
    Ok(success(metadata))
}

/// `POST /summarizeContent`
async fn handle_summarize(
    State(pipeline): State<Arc<Pipeline>>,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    let content = required(request.content, "Content is required")?;

    let summary = pipeline
        .summarize(&content, request.title.as_deref(), request.url.as_deref())
        .await
        .map_err(|e| ApiError::from_pipeline(e, "Failed to summarize content"))?;
    Ok(success(SummaryData { summary }))
}

/// `POST /scrapeAndSummarize`
async fn handle_scrape_and_summarize(
    State(pipeline): State<Arc<Pipeline>>,
    body: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    let url = required(request.url, "URL is required")?;

    let brief = pipeline
        .scrape_and_summarize(&url)
        .await
        .map_err(|e| ApiError::from_pipeline(e, "Failed to scrape and summarize"))?;
    Ok(success(brief))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, SummarizeError, ValidationError};

    #[test]
    fn test_validation_errors_are_400() {
        let err = ApiError::from_pipeline(
            ValidationError::MissingUrl.into(),
            "Failed to scrape website",
        );
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, "URL is required");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_upstream_errors_are_500_with_details() {
        let err = ApiError::from_pipeline(
            FetchError::HttpStatus(502).into(),
            "Failed to scrape website",
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, "Failed to scrape website");
        assert_eq!(
            err.details.as_deref(),
            Some("Request failed with status code 502")
        );

        let err = ApiError::from_pipeline(
            SummarizeError::Config("OpenAI API key is not configured".to_string()).into(),
            "Failed to summarize content",
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.details.unwrap().contains("API key"));
    }

    #[test]
    fn test_required_rejects_blank() {
        assert!(required(None, "URL is required").is_err());
        assert!(required(Some("  ".to_string()), "URL is required").is_err());
        assert_eq!(
            required(Some("example.com".to_string()), "URL is required").unwrap(),
            "example.com"
        );
    }
}
