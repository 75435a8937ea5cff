use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use model::entities::{transaction_category, FlowKind};
use sea_orm::{ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new transaction category
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCategoryRequest {
    /// Category name
    pub name: String,
    /// Category kind: "income" or "expense"
    pub kind: String,
}

/// Request body for updating a transaction category
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCategoryRequest {
    /// Category name
    pub name: Option<String>,
    /// Category kind: "income" or "expense"
    pub kind: Option<String>,
}

/// Transaction category response model
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub kind: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<transaction_category::Model> for CategoryResponse {
    fn from(model: transaction_category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            kind: model.kind.to_value(),
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}

fn invalid_kind_response(kind: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!("Invalid kind '{}', expected 'income' or 'expense'", kind),
            code: "INVALID_KIND".to_string(),
            success: false,
        }),
    )
}

/// Create a new transaction category for a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/categories",
    tag = "categories",
    params(
        ("user_id" = i32, Path, description = "Owning user ID"),
    ),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_category(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_category function for user_id: {}", user_id);
    debug!("Creating category '{}' with kind '{}'", request.name, request.kind);

    let Ok(kind) = FlowKind::try_from_value(&request.kind) else {
        warn!("Rejected category create with invalid kind '{}'", request.kind);
        return Err(invalid_kind_response(&request.kind));
    };

    let new_category = transaction_category::ActiveModel {
        name: Set(request.name.clone()),
        kind: Set(kind),
        user_id: Set(user_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    match new_category.insert(&state.db).await {
        Ok(category_model) => {
            info!(
                "Category created successfully with ID: {}, name: {}",
                category_model.id, category_model.name
            );
            let response = ApiResponse {
                data: CategoryResponse::from(category_model),
                message: "Category created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create category '{}' for user {}: {}",
                request.name, user_id, db_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create category".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all categories of a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/categories",
    tag = "categories",
    params(
        ("user_id" = i32, Path, description = "Owning user ID"),
    ),
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_categories(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, StatusCode> {
    trace!("Entering get_categories function for user_id: {}", user_id);

    match transaction_category::Entity::find()
        .filter(transaction_category::Column::UserId.eq(user_id))
        .all(&state.db)
        .await
    {
        Ok(categories) => {
            debug!("Retrieved {} categories for user {}", categories.len(), user_id);
            let response = ApiResponse {
                data: categories.into_iter().map(CategoryResponse::from).collect(),
                message: "Categories retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve categories for user {}: {}", user_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific category by ID
#[utoipa::path(
    get,
    path = "/api/v1/categories/{category_id}",
    tag = "categories",
    params(
        ("category_id" = i32, Path, description = "Category ID"),
    ),
    responses(
        (status = 200, description = "Category retrieved successfully", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_category(
    Path(category_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CategoryResponse>>, StatusCode> {
    trace!("Entering get_category function for category_id: {}", category_id);

    match transaction_category::Entity::find_by_id(category_id)
        .one(&state.db)
        .await
    {
        Ok(Some(category_model)) => {
            let response = ApiResponse {
                data: CategoryResponse::from(category_model),
                message: "Category retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Category with ID {} not found", category_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve category with ID {}: {}", category_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/v1/categories/{category_id}",
    tag = "categories",
    params(
        ("category_id" = i32, Path, description = "Category ID"),
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated successfully", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_category(
    Path(category_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_category function for category_id: {}", category_id);

    let existing_category = match transaction_category::Entity::find_by_id(category_id)
        .one(&state.db)
        .await
    {
        Ok(Some(category_model)) => category_model,
        Ok(None) => {
            warn!("Category with ID {} not found for update", category_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Category {} not found", category_id),
                    code: "CATEGORY_NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup category with ID {}: {}", category_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to lookup category".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let mut category_active: transaction_category::ActiveModel = existing_category.into();

    // Update only provided fields
    if let Some(name) = request.name {
        debug!("Updating category name to: {}", name);
        category_active.name = Set(name);
    }
    if let Some(kind) = request.kind {
        let Ok(kind) = FlowKind::try_from_value(&kind) else {
            return Err(invalid_kind_response(&kind));
        };
        debug!("Updating category kind to: {:?}", kind);
        category_active.kind = Set(kind);
    }

    match category_active.update(&state.db).await {
        Ok(updated_category) => {
            info!("Category with ID {} updated successfully", category_id);
            let response = ApiResponse {
                data: CategoryResponse::from(updated_category),
                message: "Category updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update category with ID {}: {}", category_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to update category".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{category_id}",
    tag = "categories",
    params(
        ("category_id" = i32, Path, description = "Category ID"),
    ),
    responses(
        (status = 200, description = "Category deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_category(
    Path(category_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_category function for category_id: {}", category_id);

    match transaction_category::Entity::delete_by_id(category_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Category with ID {} deleted successfully", category_id);
                let response = ApiResponse {
                    data: format!("Category {} deleted", category_id),
                    message: "Category deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("Category with ID {} not found for deletion", category_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete category with ID {}: {}", category_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
