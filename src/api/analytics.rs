//! Trend, prediction, ranking and report handlers

use axum::extract::{Path, Query, State};

use super::{ApiResponse, ApiResult, AppState, FilterQuery};
use crate::analytics::{CategoryStats, OverviewStats, PlatformStats, SentimentOverview};
use crate::service::{GrowthReport, PredictionReport, TrendReport};

/// `GET /api/analytics/trends/{hashtag}`
pub async fn trend(
    State(state): State<AppState>,
    Path(hashtag): Path<String>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<TrendReport> {
    let platform = query.platform()?;
    let report = state
        .run(move |service| service.compute_trend(&hashtag, platform, query.days))
        .await?;
    Ok(ApiResponse::success(report))
}

/// `GET /api/analytics/predictions/{hashtag}`
pub async fn predictions(
    State(state): State<AppState>,
    Path(hashtag): Path<String>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<PredictionReport> {
    let platform = query.platform()?;
    let report = state
        .run(move |service| service.compute_predictions(&hashtag, platform))
        .await?;
    Ok(ApiResponse::success(report))
}

/// `GET /api/analytics/growth`
pub async fn growth(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<GrowthReport> {
    let (platform, category) = (query.platform()?, query.category()?);
    let report = state
        .run(move |service| service.compute_growth_ranking(platform, category, query.days))
        .await?;
    Ok(ApiResponse::success(report))
}

/// `GET /api/analytics/categories`
pub async fn categories(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Vec<CategoryStats>> {
    let platform = query.platform()?;
    let stats = state
        .run(move |service| service.category_report(platform, query.days))
        .await?;
    Ok(ApiResponse::success(stats))
}

/// `GET /api/analytics/platforms/comparison`
pub async fn platforms(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Vec<PlatformStats>> {
    let stats = state
        .run(move |service| service.platform_report(query.days))
        .await?;
    Ok(ApiResponse::success(stats))
}

/// `GET /api/analytics/sentiment`
pub async fn sentiment(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<SentimentOverview> {
    let (platform, category) = (query.platform()?, query.category()?);
    let overview = state
        .run(move |service| service.sentiment_report(platform, category, query.days))
        .await?;
    Ok(ApiResponse::success(overview))
}

/// `GET /api/analytics/overview`
pub async fn overview(State(state): State<AppState>) -> ApiResult<OverviewStats> {
    let stats = state.run(|service| service.overview()).await?;
    Ok(ApiResponse::success(stats))
}
