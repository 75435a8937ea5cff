use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use model::entities::{budget, transaction_category, BudgetPeriod};
use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new budget
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateBudgetRequest {
    /// Budget name
    pub name: String,
    /// Category to scope the budget to; omit for an overall budget
    pub category_id: Option<i32>,
    /// Budget amount (must be positive)
    pub budget_amount: Decimal,
    /// Descriptive cadence: "weekly", "monthly" or "yearly"
    pub period_type: String,
    /// First day of the budget window, inclusive
    pub start_date: NaiveDate,
    /// Last day of the budget window, inclusive
    pub end_date: NaiveDate,
}

/// Request body for updating a budget. Only provided fields are applied.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateBudgetRequest {
    /// Budget name
    pub name: Option<String>,
    /// Category to scope the budget to
    pub category_id: Option<i32>,
    /// Budget amount
    pub budget_amount: Option<Decimal>,
    /// Descriptive cadence: "weekly", "monthly" or "yearly"
    pub period_type: Option<String>,
    /// First day of the budget window, inclusive
    pub start_date: Option<NaiveDate>,
    /// Last day of the budget window, inclusive
    pub end_date: Option<NaiveDate>,
}

/// Budget response model
#[derive(Debug, Serialize, ToSchema)]
pub struct BudgetResponse {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub category_id: Option<i32>,
    pub budget_amount: Decimal,
    pub period_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<budget::Model> for BudgetResponse {
    fn from(model: budget::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            category_id: model.category_id,
            budget_amount: model.budget_amount,
            period_type: model.period_type.to_value(),
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn bad_request(error: String, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error,
            code: code.to_string(),
            success: false,
        }),
    )
}

fn internal_error() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
            code: "DATABASE_ERROR".to_string(),
            success: false,
        }),
    )
}

/// Create a new budget for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/budgets",
    tag = "budgets",
    params(
        ("user_id" = i32, Path, description = "Owning user ID"),
    ),
    request_body = CreateBudgetRequest,
    responses(
        (status = 201, description = "Budget created successfully", body = ApiResponse<BudgetResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_budget(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateBudgetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BudgetResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_budget function for user_id: {}", user_id);
    debug!(
        "Creating budget '{}' with amount {} and period '{}'",
        request.name, request.budget_amount, request.period_type
    );

    let Ok(period_type) = BudgetPeriod::try_from_value(&request.period_type) else {
        warn!(
            "Rejected budget create with invalid period '{}'",
            request.period_type
        );
        return Err(bad_request(
            format!(
                "Invalid period '{}', expected 'weekly', 'monthly' or 'yearly'",
                request.period_type
            ),
            "INVALID_PERIOD_TYPE",
        ));
    };

    if request.budget_amount <= Decimal::ZERO {
        warn!(
            "Rejected budget create with non-positive amount {}",
            request.budget_amount
        );
        return Err(bad_request(
            "Budget amount must be positive".to_string(),
            "NON_POSITIVE_AMOUNT",
        ));
    }

    // A scoped budget must reference a category owned by the same user.
    if let Some(category_id) = request.category_id {
        match transaction_category::Entity::find_by_id(category_id)
            .filter(transaction_category::Column::UserId.eq(user_id))
            .one(&state.db)
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!(
                    "Category {} not found for user {} on budget create",
                    category_id, user_id
                );
                return Err(bad_request(
                    format!("Category {} does not belong to user {}", category_id, user_id),
                    "INVALID_CATEGORY",
                ));
            }
            Err(db_error) => {
                error!("Failed to lookup category {}: {}", category_id, db_error);
                return Err(internal_error());
            }
        }
    }

    let now = Utc::now();
    let new_budget = budget::ActiveModel {
        user_id: Set(user_id),
        name: Set(request.name.clone()),
        category_id: Set(request.category_id),
        budget_amount: Set(request.budget_amount),
        period_type: Set(period_type),
        start_date: Set(request.start_date),
        end_date: Set(request.end_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_budget.insert(&state.db).await {
        Ok(budget_model) => {
            info!(
                "Budget created successfully with ID: {}, name: {}",
                budget_model.id, budget_model.name
            );
            let response = ApiResponse {
                data: BudgetResponse::from(budget_model),
                message: "Budget created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create budget for user {}: {}", user_id, db_error);
            Err(internal_error())
        }
    }
}

/// Get all budgets of a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/budgets",
    tag = "budgets",
    params(
        ("user_id" = i32, Path, description = "Owning user ID"),
    ),
    responses(
        (status = 200, description = "Budgets retrieved successfully", body = ApiResponse<Vec<BudgetResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_budgets(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BudgetResponse>>>, StatusCode> {
    trace!("Entering get_budgets function for user_id: {}", user_id);

    match budget::Entity::find()
        .filter(budget::Column::UserId.eq(user_id))
        .all(&state.db)
        .await
    {
        Ok(budgets) => {
            debug!("Retrieved {} budgets for user {}", budgets.len(), user_id);
            let response = ApiResponse {
                data: budgets.into_iter().map(BudgetResponse::from).collect(),
                message: "Budgets retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve budgets for user {}: {}", user_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific budget by ID
#[utoipa::path(
    get,
    path = "/api/v1/budgets/{budget_id}",
    tag = "budgets",
    params(
        ("budget_id" = i32, Path, description = "Budget ID"),
    ),
    responses(
        (status = 200, description = "Budget retrieved successfully", body = ApiResponse<BudgetResponse>),
        (status = 404, description = "Budget not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_budget(
    Path(budget_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BudgetResponse>>, StatusCode> {
    trace!("Entering get_budget function for budget_id: {}", budget_id);

    match budget::Entity::find_by_id(budget_id).one(&state.db).await {
        Ok(Some(budget_model)) => {
            let response = ApiResponse {
                data: BudgetResponse::from(budget_model),
                message: "Budget retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Budget with ID {} not found", budget_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve budget with ID {}: {}", budget_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a budget
#[utoipa::path(
    put,
    path = "/api/v1/budgets/{budget_id}",
    tag = "budgets",
    params(
        ("budget_id" = i32, Path, description = "Budget ID"),
    ),
    request_body = UpdateBudgetRequest,
    responses(
        (status = 200, description = "Budget updated successfully", body = ApiResponse<BudgetResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Budget not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_budget(
    Path(budget_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateBudgetRequest>,
) -> Result<Json<ApiResponse<BudgetResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_budget function for budget_id: {}", budget_id);

    let existing_budget = match budget::Entity::find_by_id(budget_id).one(&state.db).await {
        Ok(Some(budget_model)) => budget_model,
        Ok(None) => {
            warn!("Budget with ID {} not found for update", budget_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Budget {} not found", budget_id),
                    code: "BUDGET_NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup budget with ID {}: {}", budget_id, db_error);
            return Err(internal_error());
        }
    };

    let mut budget_active: budget::ActiveModel = existing_budget.into();

    // Update only provided fields
    if let Some(name) = request.name {
        debug!("Updating budget name to: {}", name);
        budget_active.name = Set(name);
    }
    if let Some(category_id) = request.category_id {
        debug!("Updating budget category_id to: {}", category_id);
        budget_active.category_id = Set(Some(category_id));
    }
    if let Some(budget_amount) = request.budget_amount {
        debug!("Updating budget amount to: {}", budget_amount);
        budget_active.budget_amount = Set(budget_amount);
    }
    if let Some(period_type) = request.period_type {
        let Ok(period_type) = BudgetPeriod::try_from_value(&period_type) else {
            return Err(bad_request(
                format!(
                    "Invalid period '{}', expected 'weekly', 'monthly' or 'yearly'",
                    period_type
                ),
                "INVALID_PERIOD_TYPE",
            ));
        };
        debug!("Updating budget period_type to: {:?}", period_type);
        budget_active.period_type = Set(period_type);
    }
    if let Some(start_date) = request.start_date {
        debug!("Updating budget start_date to: {}", start_date);
        budget_active.start_date = Set(start_date);
    }
    if let Some(end_date) = request.end_date {
        debug!("Updating budget end_date to: {}", end_date);
        budget_active.end_date = Set(end_date);
    }
    budget_active.updated_at = Set(Utc::now());

    match budget_active.update(&state.db).await {
        Ok(updated_budget) => {
            info!("Budget with ID {} updated successfully", budget_id);
            let response = ApiResponse {
                data: BudgetResponse::from(updated_budget),
                message: "Budget updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update budget with ID {}: {}", budget_id, db_error);
            Err(internal_error())
        }
    }
}

/// Delete a budget
#[utoipa::path(
    delete,
    path = "/api/v1/budgets/{budget_id}",
    tag = "budgets",
    params(
        ("budget_id" = i32, Path, description = "Budget ID"),
    ),
    responses(
        (status = 200, description = "Budget deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Budget not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_budget(
    Path(budget_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_budget function for budget_id: {}", budget_id);

    match budget::Entity::delete_by_id(budget_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Budget with ID {} deleted successfully", budget_id);
                let response = ApiResponse {
                    data: format!("Budget {} deleted", budget_id),
                    message: "Budget deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("Budget with ID {} not found for deletion", budget_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete budget with ID {}: {}", budget_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
