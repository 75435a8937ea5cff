use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use model::entities::investment;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new investment
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateInvestmentRequest {
    /// Investment name
    pub name: String,
    /// Asset class label ("stock", "etf", "crypto", ...)
    pub investment_type: String,
    /// Number of units held; supports up to 8 fractional digits
    pub quantity: Decimal,
    /// Per-unit purchase price (must be positive)
    pub purchase_price: Decimal,
    /// Total current value of the position
    pub current_value: Decimal,
    /// Date the position was opened
    pub purchase_date: NaiveDate,
}

/// Request body for updating an investment. Only provided fields are applied.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateInvestmentRequest {
    /// Investment name
    pub name: Option<String>,
    /// Asset class label
    pub investment_type: Option<String>,
    /// Number of units held
    pub quantity: Option<Decimal>,
    /// Per-unit purchase price
    pub purchase_price: Option<Decimal>,
    /// Total current value of the position
    pub current_value: Option<Decimal>,
    /// Date the position was opened
    pub purchase_date: Option<NaiveDate>,
}

/// Investment response model
#[derive(Debug, Serialize, ToSchema)]
pub struct InvestmentResponse {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub investment_type: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub current_value: Decimal,
    pub purchase_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<investment::Model> for InvestmentResponse {
    fn from(model: investment::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            investment_type: model.investment_type,
            quantity: model.quantity,
            purchase_price: model.purchase_price,
            current_value: model.current_value,
            purchase_date: model.purchase_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Create a new investment for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/investments",
    tag = "investments",
    params(
        ("user_id" = i32, Path, description = "Owning user ID"),
    ),
    request_body = CreateInvestmentRequest,
    responses(
        (status = 201, description = "Investment created successfully", body = ApiResponse<InvestmentResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_investment(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateInvestmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InvestmentResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    trace!("Entering create_investment function for user_id: {}", user_id);
    debug!(
        "Creating investment '{}' with quantity {} and current value {}",
        request.name, request.quantity, request.current_value
    );

    if request.quantity <= Decimal::ZERO || request.purchase_price <= Decimal::ZERO {
        warn!("Rejected investment create with non-positive quantity or price");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Quantity and purchase price must be positive".to_string(),
                code: "NON_POSITIVE_AMOUNT".to_string(),
                success: false,
            }),
        ));
    }
    if request.current_value < Decimal::ZERO {
        warn!("Rejected investment create with negative current value");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Current value cannot be negative".to_string(),
                code: "NEGATIVE_VALUE".to_string(),
                success: false,
            }),
        ));
    }

    let now = Utc::now();
    let new_investment = investment::ActiveModel {
        user_id: Set(user_id),
        name: Set(request.name.clone()),
        investment_type: Set(request.investment_type.clone()),
        quantity: Set(request.quantity),
        purchase_price: Set(request.purchase_price),
        current_value: Set(request.current_value),
        purchase_date: Set(request.purchase_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_investment.insert(&state.db).await {
        Ok(investment_model) => {
            info!(
                "Investment created successfully with ID: {}, name: {}",
                investment_model.id, investment_model.name
            );
            let response = ApiResponse {
                data: InvestmentResponse::from(investment_model),
                message: "Investment created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create investment for user {}: {}", user_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create investment".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all investments of a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/investments",
    tag = "investments",
    params(
        ("user_id" = i32, Path, description = "Owning user ID"),
    ),
    responses(
        (status = 200, description = "Investments retrieved successfully", body = ApiResponse<Vec<InvestmentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_investments(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InvestmentResponse>>>, StatusCode> {
    trace!("Entering get_investments function for user_id: {}", user_id);

    match investment::Entity::find()
        .filter(investment::Column::UserId.eq(user_id))
        .all(&state.db)
        .await
    {
        Ok(investments) => {
            debug!(
                "Retrieved {} investments for user {}",
                investments.len(),
                user_id
            );
            let response = ApiResponse {
                data: investments
                    .into_iter()
                    .map(InvestmentResponse::from)
                    .collect(),
                message: "Investments retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve investments for user {}: {}",
                user_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific investment by ID
#[utoipa::path(
    get,
    path = "/api/v1/investments/{investment_id}",
    tag = "investments",
    params(
        ("investment_id" = i32, Path, description = "Investment ID"),
    ),
    responses(
        (status = 200, description = "Investment retrieved successfully", body = ApiResponse<InvestmentResponse>),
        (status = 404, description = "Investment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_investment(
    Path(investment_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<InvestmentResponse>>, StatusCode> {
    trace!(
        "Entering get_investment function for investment_id: {}",
        investment_id
    );

    match investment::Entity::find_by_id(investment_id)
        .one(&state.db)
        .await
    {
        Ok(Some(investment_model)) => {
            let response = ApiResponse {
                data: InvestmentResponse::from(investment_model),
                message: "Investment retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Investment with ID {} not found", investment_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve investment with ID {}: {}",
                investment_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update an investment
#[utoipa::path(
    put,
    path = "/api/v1/investments/{investment_id}",
    tag = "investments",
    params(
        ("investment_id" = i32, Path, description = "Investment ID"),
    ),
    request_body = UpdateInvestmentRequest,
    responses(
        (status = 200, description = "Investment updated successfully", body = ApiResponse<InvestmentResponse>),
        (status = 404, description = "Investment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_investment(
    Path(investment_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateInvestmentRequest>,
) -> Result<Json<ApiResponse<InvestmentResponse>>, StatusCode> {
    trace!(
        "Entering update_investment function for investment_id: {}",
        investment_id
    );

    let existing_investment = match investment::Entity::find_by_id(investment_id)
        .one(&state.db)
        .await
    {
        Ok(Some(investment_model)) => investment_model,
        Ok(None) => {
            warn!("Investment with ID {} not found for update", investment_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup investment with ID {}: {}",
                investment_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut investment_active: investment::ActiveModel = existing_investment.into();

    // Update only provided fields
    if let Some(name) = request.name {
        debug!("Updating investment name to: {}", name);
        investment_active.name = Set(name);
    }
    if let Some(investment_type) = request.investment_type {
        debug!("Updating investment type to: {}", investment_type);
        investment_active.investment_type = Set(investment_type);
    }
    if let Some(quantity) = request.quantity {
        debug!("Updating investment quantity to: {}", quantity);
        investment_active.quantity = Set(quantity);
    }
    if let Some(purchase_price) = request.purchase_price {
        debug!("Updating investment purchase price to: {}", purchase_price);
        investment_active.purchase_price = Set(purchase_price);
    }
    if let Some(current_value) = request.current_value {
        debug!("Updating investment current value to: {}", current_value);
        investment_active.current_value = Set(current_value);
    }
    if let Some(purchase_date) = request.purchase_date {
        debug!("Updating investment purchase date to: {}", purchase_date);
        investment_active.purchase_date = Set(purchase_date);
    }
    investment_active.updated_at = Set(Utc::now());

    match investment_active.update(&state.db).await {
        Ok(updated_investment) => {
            info!("Investment with ID {} updated successfully", investment_id);
            let response = ApiResponse {
                data: InvestmentResponse::from(updated_investment),
                message: "Investment updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update investment with ID {}: {}",
                investment_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete an investment
#[utoipa::path(
    delete,
    path = "/api/v1/investments/{investment_id}",
    tag = "investments",
    params(
        ("investment_id" = i32, Path, description = "Investment ID"),
    ),
    responses(
        (status = 200, description = "Investment deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Investment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_investment(
    Path(investment_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!(
        "Entering delete_investment function for investment_id: {}",
        investment_id
    );

    match investment::Entity::delete_by_id(investment_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Investment with ID {} deleted successfully", investment_id);
                let response = ApiResponse {
                    data: format!("Investment {} deleted", investment_id),
                    message: "Investment deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("Investment with ID {} not found for deletion", investment_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete investment with ID {}: {}",
                investment_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
