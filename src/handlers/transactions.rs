use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use model::entities::{transaction, transaction_category, FlowKind};
use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new transaction
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// Transaction amount (always positive; direction comes from kind)
    pub amount: Decimal,
    /// Transaction description
    pub description: String,
    /// Transaction kind: "income" or "expense"
    pub kind: String,
    /// Category the transaction belongs to (must be owned by the same user)
    pub category_id: i32,
    /// Calendar date of the transaction
    pub transaction_date: NaiveDate,
}

/// Request body for updating a transaction.
///
/// Only provided fields are applied. Kind/category consistency is
/// checked on the create path only; updates apply the fields as given.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateTransactionRequest {
    /// Transaction amount
    pub amount: Option<Decimal>,
    /// Transaction description
    pub description: Option<String>,
    /// Transaction kind: "income" or "expense"
    pub kind: Option<String>,
    /// Category ID
    pub category_id: Option<i32>,
    /// Calendar date of the transaction
    pub transaction_date: Option<NaiveDate>,
}

/// Transaction response model
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i32,
    pub user_id: i32,
    pub amount: Decimal,
    pub description: String,
    pub kind: String,
    pub category_id: i32,
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<transaction::Model> for TransactionResponse {
    fn from(model: transaction::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            amount: model.amount,
            description: model.description,
            kind: model.kind.to_value(),
            category_id: model.category_id,
            transaction_date: model.transaction_date,
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

/// Create a new transaction for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/transactions",
    tag = "transactions",
    params(
        ("user_id" = i32, Path, description = "Owning user ID"),
    ),
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created successfully", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_transaction(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    trace!("Entering create_transaction function for user_id: {}", user_id);
    debug!(
        "Creating transaction: amount={}, kind={}, category_id={}",
        request.amount, request.kind, request.category_id
    );

    let Ok(kind) = FlowKind::try_from_value(&request.kind) else {
        warn!("Rejected transaction create with invalid kind '{}'", request.kind);
        return Err(bad_request(
            format!("Invalid kind '{}', expected 'income' or 'expense'", request.kind),
            "INVALID_KIND",
        ));
    };

    if request.amount <= Decimal::ZERO {
        warn!("Rejected transaction create with non-positive amount {}", request.amount);
        return Err(bad_request(
            "Transaction amount must be positive".to_string(),
            "NON_POSITIVE_AMOUNT",
        ));
    }

    // The category must exist and belong to the same user; its kind must
    // match the transaction's kind. Updates do not repeat this check.
    let category = match transaction_category::Entity::find_by_id(request.category_id)
        .filter(transaction_category::Column::UserId.eq(user_id))
        .one(&state.db)
        .await
    {
        Ok(Some(category)) => category,
        Ok(None) => {
            warn!(
                "Category {} not found for user {} on transaction create",
                request.category_id, user_id
            );
            return Err(bad_request(
                format!("Category {} does not belong to user {}", request.category_id, user_id),
                "INVALID_CATEGORY",
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup category {}: {}", request.category_id, db_error);
            return Err(internal_error());
        }
    };

    if category.kind != kind {
        warn!(
            "Category kind {:?} does not match transaction kind {:?}",
            category.kind, kind
        );
        return Err(bad_request(
            format!(
                "Category '{}' is a {} category and cannot hold a {} transaction",
                category.name,
                category.kind.to_value(),
                kind.to_value()
            ),
            "CATEGORY_KIND_MISMATCH",
        ));
    }

    let now = Utc::now();
    let new_transaction = transaction::ActiveModel {
        user_id: Set(user_id),
        amount: Set(request.amount),
        description: Set(request.description.clone()),
        kind: Set(kind),
        category_id: Set(request.category_id),
        transaction_date: Set(request.transaction_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_transaction.insert(&state.db).await {
        Ok(transaction_model) => {
            info!(
                "Transaction created successfully with ID: {}, amount: {}",
                transaction_model.id, transaction_model.amount
            );
            let response = ApiResponse {
                data: TransactionResponse::from(transaction_model),
                message: "Transaction created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create transaction for user {}: {}", user_id, db_error);
            Err(internal_error())
        }
    }
}

/// Get all transactions of a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/transactions",
    tag = "transactions",
    params(
        ("user_id" = i32, Path, description = "Owning user ID"),
    ),
    responses(
        (status = 200, description = "Transactions retrieved successfully", body = ApiResponse<Vec<TransactionResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_transactions(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransactionResponse>>>, StatusCode> {
    trace!("Entering get_transactions function for user_id: {}", user_id);

    match transaction::Entity::find()
        .filter(transaction::Column::UserId.eq(user_id))
        .all(&state.db)
        .await
    {
        Ok(transactions) => {
            debug!(
                "Retrieved {} transactions for user {}",
                transactions.len(),
                user_id
            );
            let response = ApiResponse {
                data: transactions
                    .into_iter()
                    .map(TransactionResponse::from)
                    .collect(),
                message: "Transactions retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve transactions for user {}: {}",
                user_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific transaction by ID
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID"),
    ),
    responses(
        (status = 200, description = "Transaction retrieved successfully", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TransactionResponse>>, StatusCode> {
    trace!(
        "Entering get_transaction function for transaction_id: {}",
        transaction_id
    );

    match transaction::Entity::find_by_id(transaction_id)
        .one(&state.db)
        .await
    {
        Ok(Some(transaction_model)) => {
            let response = ApiResponse {
                data: TransactionResponse::from(transaction_model),
                message: "Transaction retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Transaction with ID {} not found", transaction_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve transaction with ID {}: {}",
                transaction_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a transaction
#[utoipa::path(
    put,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID"),
    ),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated successfully", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<Json<ApiResponse<TransactionResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!(
        "Entering update_transaction function for transaction_id: {}",
        transaction_id
    );

    let existing_transaction = match transaction::Entity::find_by_id(transaction_id)
        .one(&state.db)
        .await
    {
        Ok(Some(transaction_model)) => transaction_model,
        Ok(None) => {
            warn!("Transaction with ID {} not found for update", transaction_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Transaction {} not found", transaction_id),
                    code: "TRANSACTION_NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!(
                "Failed to lookup transaction with ID {}: {}",
                transaction_id, db_error
            );
            return Err(internal_error());
        }
    };

    let mut transaction_active: transaction::ActiveModel = existing_transaction.into();

    // Update only provided fields
    if let Some(amount) = request.amount {
        debug!("Updating transaction amount to: {}", amount);
        transaction_active.amount = Set(amount);
    }
    if let Some(description) = request.description {
        debug!("Updating transaction description");
        transaction_active.description = Set(description);
    }
    if let Some(kind) = request.kind {
        let Ok(kind) = FlowKind::try_from_value(&kind) else {
            return Err(bad_request(
                format!("Invalid kind '{}', expected 'income' or 'expense'", kind),
                "INVALID_KIND",
            ));
        };
        debug!("Updating transaction kind to: {:?}", kind);
        transaction_active.kind = Set(kind);
    }
    if let Some(category_id) = request.category_id {
        debug!("Updating transaction category_id to: {}", category_id);
        transaction_active.category_id = Set(category_id);
    }
    if let Some(transaction_date) = request.transaction_date {
        debug!("Updating transaction date to: {}", transaction_date);
        transaction_active.transaction_date = Set(transaction_date);
    }
    transaction_active.updated_at = Set(Utc::now());

    match transaction_active.update(&state.db).await {
        Ok(updated_transaction) => {
            info!("Transaction with ID {} updated successfully", transaction_id);
            let response = ApiResponse {
                data: TransactionResponse::from(updated_transaction),
                message: "Transaction updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update transaction with ID {}: {}",
                transaction_id, db_error
            );
            Err(internal_error())
        }
    }
}

/// Delete a transaction
#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID"),
    ),
    responses(
        (status = 200, description = "Transaction deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!(
        "Entering delete_transaction function for transaction_id: {}",
        transaction_id
    );

    match transaction::Entity::delete_by_id(transaction_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Transaction with ID {} deleted successfully", transaction_id);
                let response = ApiResponse {
                    data: format!("Transaction {} deleted", transaction_id),
                    message: "Transaction deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Transaction with ID {} not found for deletion",
                    transaction_id
                );
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete transaction with ID {}: {}",
                transaction_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
