use chrono::NaiveDate;
use common::{BudgetPerformance, CategorySpending, FinancialSummary};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for expensive report computations
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Summary(FinancialSummary),
    CategorySpending(Vec<CategorySpending>),
}

/// Query parameters for the report endpoints
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// Start of the reporting period, inclusive (YYYY-MM-DD)
    pub start_date: NaiveDate,
    /// End of the reporting period, inclusive (YYYY-MM-DD)
    pub end_date: NaiveDate,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::categories::create_category,
        crate::handlers::categories::get_categories,
        crate::handlers::categories::get_category,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,
        crate::handlers::transactions::create_transaction,
        crate::handlers::transactions::get_transactions,
        crate::handlers::transactions::get_transaction,
        crate::handlers::transactions::update_transaction,
        crate::handlers::transactions::delete_transaction,
        crate::handlers::budgets::create_budget,
        crate::handlers::budgets::get_budgets,
        crate::handlers::budgets::get_budget,
        crate::handlers::budgets::update_budget,
        crate::handlers::budgets::delete_budget,
        crate::handlers::investments::create_investment,
        crate::handlers::investments::get_investments,
        crate::handlers::investments::get_investment,
        crate::handlers::investments::update_investment,
        crate::handlers::investments::delete_investment,
        crate::handlers::debts::create_debt,
        crate::handlers::debts::get_debts,
        crate::handlers::debts::get_debt,
        crate::handlers::debts::update_debt,
        crate::handlers::debts::delete_debt,
        crate::handlers::reports::get_financial_summary,
        crate::handlers::reports::get_category_spending,
    ),
    components(
        schemas(
            ApiResponse<FinancialSummary>,
            ApiResponse<Vec<CategorySpending>>,
            ErrorResponse,
            HealthResponse,
            FinancialSummary,
            BudgetPerformance,
            CategorySpending,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UpdateUserRequest,
            crate::handlers::users::UserResponse,
            crate::handlers::categories::CreateCategoryRequest,
            crate::handlers::categories::UpdateCategoryRequest,
            crate::handlers::categories::CategoryResponse,
            crate::handlers::transactions::CreateTransactionRequest,
            crate::handlers::transactions::UpdateTransactionRequest,
            crate::handlers::transactions::TransactionResponse,
            crate::handlers::budgets::CreateBudgetRequest,
            crate::handlers::budgets::UpdateBudgetRequest,
            crate::handlers::budgets::BudgetResponse,
            crate::handlers::investments::CreateInvestmentRequest,
            crate::handlers::investments::UpdateInvestmentRequest,
            crate::handlers::investments::InvestmentResponse,
            crate::handlers::debts::CreateDebtRequest,
            crate::handlers::debts::UpdateDebtRequest,
            crate::handlers::debts::DebtResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "categories", description = "Transaction category endpoints"),
        (name = "transactions", description = "Transaction endpoints"),
        (name = "budgets", description = "Budget endpoints"),
        (name = "investments", description = "Investment endpoints"),
        (name = "debts", description = "Debt endpoints"),
        (name = "reports", description = "Financial reporting endpoints"),
    ),
    info(
        title = "Ledgerly API",
        description = "Personal finance management API - transactions, budgets, investments, debts and financial reports",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
