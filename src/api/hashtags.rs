//! Hashtag lookup and ingestion handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{ApiError, ApiResponse, ApiResult, AppState, FilterQuery};
use crate::models::{HashtagRecord, HashtagSnapshot};
use crate::service::{HashtagView, IngestSummary, TimeSeries};

/// `GET /api/hashtags/trending`
pub async fn trending(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Vec<HashtagRecord>> {
    let (platform, category) = (query.platform()?, query.category()?);
    let records = state
        .run(move |service| service.trending(platform, category, query.limit))
        .await?;
    Ok(ApiResponse::success(records))
}

/// `GET /api/hashtags/search/{query}`
pub async fn search(
    State(state): State<AppState>,
    Path(term): Path<String>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Vec<HashtagRecord>> {
    let platform = query.platform()?;
    let records = state
        .run(move |service| service.search(&term, platform, query.limit))
        .await?;
    Ok(ApiResponse::success(records))
}

/// `GET /api/hashtags/{hashtag}`
pub async fn details(
    State(state): State<AppState>,
    Path(hashtag): Path<String>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Vec<HashtagView>> {
    let platform = query.platform()?;
    let views = state
        .run(move |service| service.hashtag_details(&hashtag, platform))
        .await?;
    Ok(ApiResponse::success(views))
}

/// `GET /api/hashtags/{hashtag}/timeseries`
pub async fn time_series(
    State(state): State<AppState>,
    Path(hashtag): Path<String>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<TimeSeries> {
    let platform = query.platform()?;
    let series = state
        .run(move |service| service.time_series(&hashtag, platform, query.days))
        .await?;
    Ok(ApiResponse::success(series))
}

/// `POST /api/hashtags/snapshots` with a JSON array of snapshots
pub async fn ingest_snapshots(
    State(state): State<AppState>,
    Json(snapshots): Json<Vec<HashtagSnapshot>>,
) -> Result<(StatusCode, Json<ApiResponse<IngestSummary>>), ApiError> {
    let summary = state
        .run(move |service| service.ingest(&snapshots))
        .await?;
    tracing::info!(
        ingested = summary.ingested,
        tracked = summary.tracked,
        "Snapshots ingested via API"
    );
    Ok((StatusCode::CREATED, ApiResponse::success(summary)))
}
