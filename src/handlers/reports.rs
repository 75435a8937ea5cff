use crate::schemas::{ApiResponse, AppState, CachedData, ReportQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use common::{CategorySpending, FinancialSummary};
use tracing::{error, instrument};

/// Get the financial summary for a user over a reporting period
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/reports/summary",
    tag = "reports",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ReportQuery,
    ),
    responses(
        (status = 200, description = "Financial summary retrieved successfully", body = ApiResponse<FinancialSummary>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_financial_summary(
    Path(user_id): Path<i32>,
    Query(query): Query<ReportQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FinancialSummary>>, StatusCode> {
    // Create cache key
    let cache_key = format!("summary_{}_{:?}", user_id, query);

    // Check cache first
    if let Some(CachedData::Summary(summary)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: summary,
            message: "Financial summary retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let summary = match compute::summary::financial_summary(
        &state.db,
        user_id,
        query.start_date,
        query.end_date,
    )
    .await
    {
        Ok(summary) => summary,
        Err(e) => {
            error!("Failed to compute financial summary for user {}: {}", user_id, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Summary(summary.clone()))
        .await;

    let response = ApiResponse {
        data: summary,
        message: "Financial summary retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Get the per-category spending breakdown for a user over a reporting period
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/reports/category-spending",
    tag = "reports",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ReportQuery,
    ),
    responses(
        (status = 200, description = "Category spending retrieved successfully", body = ApiResponse<Vec<CategorySpending>>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_category_spending(
    Path(user_id): Path<i32>,
    Query(query): Query<ReportQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategorySpending>>>, StatusCode> {
    // Create cache key
    let cache_key = format!("category_spending_{}_{:?}", user_id, query);

    // Check cache first
    if let Some(CachedData::CategorySpending(spending)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: spending,
            message: "Category spending retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let spending = match compute::category_spending::category_spending(
        &state.db,
        user_id,
        query.start_date,
        query.end_date,
    )
    .await
    {
        Ok(spending) => spending,
        Err(e) => {
            error!("Failed to compute category spending for user {}: {}", user_id, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::CategorySpending(spending.clone()))
        .await;

    let response = ApiResponse {
        data: spending,
        message: "Category spending retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
