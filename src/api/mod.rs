//! REST API for hashpulse
//!
//! This module defines the routes, the response envelope and the mapping
//! from service errors to HTTP statuses. Handlers live in submodules.

pub mod analytics;
pub mod hashtags;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorCategory, HashpulseErrorTrait};
use crate::models::{Category, Platform};
use crate::service::AnalyticsService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalyticsService>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: AnalyticsService) -> Self {
        Self {
            service: Arc::new(service),
            start_time: Instant::now(),
        }
    }

    /// Run a service call on the blocking thread pool
    ///
    /// Store access is synchronous (SQLite I/O behind a mutex) and must not
    /// hold up the async workers.
    pub async fn run<T, F>(&self, call: F) -> Result<T, ApiError>
    where
        F: FnOnce(&AnalyticsService) -> crate::error::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let service = Arc::clone(&self.service);
        let result = tokio::task::spawn_blocking(move || call(&service))
            .await
            .map_err(|e| Error::with_source("Service task failed", e))?;
        Ok(result?)
    }
}

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Service error rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.category() {
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
            String::from("Internal server error")
        } else {
            self.0.to_string()
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Optional filters shared by the query endpoints
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub platform: Option<String>,
    pub category: Option<String>,
    pub days: Option<u32>,
    pub limit: Option<usize>,
}

impl FilterQuery {
    pub fn platform(&self) -> Result<Option<Platform>, ApiError> {
        parse_optional(self.platform.as_deref(), Platform::parse, "platform")
    }

    pub fn category(&self) -> Result<Option<Category>, ApiError> {
        parse_optional(self.category.as_deref(), Category::parse, "category")
    }
}

fn parse_optional<T>(
    raw: Option<&str>,
    parse: fn(&str) -> Option<T>,
    what: &str,
) -> Result<Option<T>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .ok_or_else(|| Error::invalid(format!("unknown {what}: {value}")).into()),
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub tracked_hashtags: usize,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        // Hashtag endpoints
        .route("/api/hashtags/trending", get(hashtags::trending))
        .route("/api/hashtags/search/{query}", get(hashtags::search))
        .route("/api/hashtags/snapshots", post(hashtags::ingest_snapshots))
        .route("/api/hashtags/{hashtag}", get(hashtags::details))
        .route("/api/hashtags/{hashtag}/timeseries", get(hashtags::time_series))
        // Analytics endpoints
        .route("/api/analytics/trends/{hashtag}", get(analytics::trend))
        .route("/api/analytics/predictions/{hashtag}", get(analytics::predictions))
        .route("/api/analytics/growth", get(analytics::growth))
        .route("/api/analytics/categories", get(analytics::categories))
        .route("/api/analytics/platforms/comparison", get(analytics::platforms))
        .route("/api/analytics/sentiment", get(analytics::sentiment))
        .route("/api/analytics/overview", get(analytics::overview))
        .route_layer(middleware::from_fn(track_requests))
        .with_state(state)
}

async fn track_requests(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| String::from("unmatched"));

    let response = next.run(request).await;
    crate::metrics::record_api_request(&route, response.status().as_u16());
    response
}

async fn health_check(State(state): State<AppState>) -> ApiResult<HealthResponse> {
    let tracked_hashtags = state.run(|service| service.store().count()).await?;

    Ok(ApiResponse::success(HealthResponse {
        status: String::from("healthy"),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        tracked_hashtags,
    }))
}

async fn metrics_endpoint() -> Response {
    match crate::metrics::encode_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to encode metrics")),
            )
                .into_response()
        }
    }
}
