use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use model::entities::debt;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new debt
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateDebtRequest {
    /// Who the debt is owed to
    pub lender: String,
    /// Debt label ("mortgage", "credit_card", ...)
    pub debt_type: String,
    /// Amount originally borrowed (must be positive)
    pub original_amount: Decimal,
    /// Outstanding balance
    pub current_balance: Decimal,
    /// Fractional interest rate, e.g. 0.0525 for 5.25%
    pub interest_rate: Decimal,
    /// Minimum periodic payment
    pub minimum_payment: Decimal,
    /// Next due date, if any
    pub due_date: Option<NaiveDate>,
}

/// Request body for updating a debt. Only provided fields are applied.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateDebtRequest {
    /// Who the debt is owed to
    pub lender: Option<String>,
    /// Debt label
    pub debt_type: Option<String>,
    /// Amount originally borrowed
    pub original_amount: Option<Decimal>,
    /// Outstanding balance
    pub current_balance: Option<Decimal>,
    /// Fractional interest rate
    pub interest_rate: Option<Decimal>,
    /// Minimum periodic payment
    pub minimum_payment: Option<Decimal>,
    /// Next due date
    pub due_date: Option<NaiveDate>,
}

/// Debt response model
#[derive(Debug, Serialize, ToSchema)]
pub struct DebtResponse {
    pub id: i32,
    pub user_id: i32,
    pub lender: String,
    pub debt_type: String,
    pub original_amount: Decimal,
    pub current_balance: Decimal,
    pub interest_rate: Decimal,
    pub minimum_payment: Decimal,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<debt::Model> for DebtResponse {
    fn from(model: debt::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            lender: model.lender,
            debt_type: model.debt_type,
            original_amount: model.original_amount,
            current_balance: model.current_balance,
            interest_rate: model.interest_rate,
            minimum_payment: model.minimum_payment,
            due_date: model.due_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Create a new debt for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/debts",
    tag = "debts",
    params(
        ("user_id" = i32, Path, description = "Owning user ID"),
    ),
    request_body = CreateDebtRequest,
    responses(
        (status = 201, description = "Debt created successfully", body = ApiResponse<DebtResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_debt(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateDebtRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DebtResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_debt function for user_id: {}", user_id);
    debug!(
        "Creating debt to '{}' with balance {}",
        request.lender, request.current_balance
    );

    if request.original_amount <= Decimal::ZERO {
        warn!(
            "Rejected debt create with non-positive original amount {}",
            request.original_amount
        );
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Original amount must be positive".to_string(),
                code: "NON_POSITIVE_AMOUNT".to_string(),
                success: false,
            }),
        ));
    }
    if request.current_balance < Decimal::ZERO {
        warn!(
            "Rejected debt create with negative balance {}",
            request.current_balance
        );
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Current balance cannot be negative".to_string(),
                code: "NEGATIVE_VALUE".to_string(),
                success: false,
            }),
        ));
    }

    let now = Utc::now();
    let new_debt = debt::ActiveModel {
        user_id: Set(user_id),
        lender: Set(request.lender.clone()),
        debt_type: Set(request.debt_type.clone()),
        original_amount: Set(request.original_amount),
        current_balance: Set(request.current_balance),
        interest_rate: Set(request.interest_rate),
        minimum_payment: Set(request.minimum_payment),
        due_date: Set(request.due_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_debt.insert(&state.db).await {
        Ok(debt_model) => {
            info!(
                "Debt created successfully with ID: {}, lender: {}",
                debt_model.id, debt_model.lender
            );
            let response = ApiResponse {
                data: DebtResponse::from(debt_model),
                message: "Debt created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create debt for user {}: {}", user_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create debt".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all debts of a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/debts",
    tag = "debts",
    params(
        ("user_id" = i32, Path, description = "Owning user ID"),
    ),
    responses(
        (status = 200, description = "Debts retrieved successfully", body = ApiResponse<Vec<DebtResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_debts(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DebtResponse>>>, StatusCode> {
    trace!("Entering get_debts function for user_id: {}", user_id);

    match debt::Entity::find()
        .filter(debt::Column::UserId.eq(user_id))
        .all(&state.db)
        .await
    {
        Ok(debts) => {
            debug!("Retrieved {} debts for user {}", debts.len(), user_id);
            let response = ApiResponse {
                data: debts.into_iter().map(DebtResponse::from).collect(),
                message: "Debts retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve debts for user {}: {}", user_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific debt by ID
#[utoipa::path(
    get,
    path = "/api/v1/debts/{debt_id}",
    tag = "debts",
    params(
        ("debt_id" = i32, Path, description = "Debt ID"),
    ),
    responses(
        (status = 200, description = "Debt retrieved successfully", body = ApiResponse<DebtResponse>),
        (status = 404, description = "Debt not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_debt(
    Path(debt_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DebtResponse>>, StatusCode> {
    trace!("Entering get_debt function for debt_id: {}", debt_id);

    match debt::Entity::find_by_id(debt_id).one(&state.db).await {
        Ok(Some(debt_model)) => {
            let response = ApiResponse {
                data: DebtResponse::from(debt_model),
                message: "Debt retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Debt with ID {} not found", debt_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve debt with ID {}: {}", debt_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a debt
#[utoipa::path(
    put,
    path = "/api/v1/debts/{debt_id}",
    tag = "debts",
    params(
        ("debt_id" = i32, Path, description = "Debt ID"),
    ),
    request_body = UpdateDebtRequest,
    responses(
        (status = 200, description = "Debt updated successfully", body = ApiResponse<DebtResponse>),
        (status = 404, description = "Debt not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_debt(
    Path(debt_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateDebtRequest>,
) -> Result<Json<ApiResponse<DebtResponse>>, StatusCode> {
    trace!("Entering update_debt function for debt_id: {}", debt_id);

    let existing_debt = match debt::Entity::find_by_id(debt_id).one(&state.db).await {
        Ok(Some(debt_model)) => debt_model,
        Ok(None) => {
            warn!("Debt with ID {} not found for update", debt_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup debt with ID {}: {}", debt_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut debt_active: debt::ActiveModel = existing_debt.into();

    // Update only provided fields
    if let Some(lender) = request.lender {
        debug!("Updating debt lender to: {}", lender);
        debt_active.lender = Set(lender);
    }
    if let Some(debt_type) = request.debt_type {
        debug!("Updating debt type to: {}", debt_type);
        debt_active.debt_type = Set(debt_type);
    }
    if let Some(original_amount) = request.original_amount {
        debug!("Updating debt original amount to: {}", original_amount);
        debt_active.original_amount = Set(original_amount);
    }
    if let Some(current_balance) = request.current_balance {
        debug!("Updating debt current balance to: {}", current_balance);
        debt_active.current_balance = Set(current_balance);
    }
    if let Some(interest_rate) = request.interest_rate {
        debug!("Updating debt interest rate to: {}", interest_rate);
        debt_active.interest_rate = Set(interest_rate);
    }
    if let Some(minimum_payment) = request.minimum_payment {
        debug!("Updating debt minimum payment to: {}", minimum_payment);
        debt_active.minimum_payment = Set(minimum_payment);
    }
    if let Some(due_date) = request.due_date {
        debug!("Updating debt due date to: {}", due_date);
        debt_active.due_date = Set(Some(due_date));
    }
    debt_active.updated_at = Set(Utc::now());

    match debt_active.update(&state.db).await {
        Ok(updated_debt) => {
            info!("Debt with ID {} updated successfully", debt_id);
            let response = ApiResponse {
                data: DebtResponse::from(updated_debt),
                message: "Debt updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update debt with ID {}: {}", debt_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a debt
#[utoipa::path(
    delete,
    path = "/api/v1/debts/{debt_id}",
    tag = "debts",
    params(
        ("debt_id" = i32, Path, description = "Debt ID"),
    ),
    responses(
        (status = 200, description = "Debt deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Debt not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_debt(
    Path(debt_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_debt function for debt_id: {}", debt_id);

    match debt::Entity::delete_by_id(debt_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Debt with ID {} deleted successfully", debt_id);
                let response = ApiResponse {
                    data: format!("Debt {} deleted", debt_id),
                    message: "Debt deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("Debt with ID {} not found for deletion", debt_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete debt with ID {}: {}", debt_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
