use crate::handlers::{
    budgets::{create_budget, delete_budget, get_budget, get_budgets, update_budget},
    categories::{
        create_category, delete_category, get_categories, get_category, update_category,
    },
    debts::{create_debt, delete_debt, get_debt, get_debts, update_debt},
    health::health_check,
    investments::{
        create_investment, delete_investment, get_investment, get_investments, update_investment,
    },
    reports::{get_category_spending, get_financial_summary},
    transactions::{
        create_transaction, delete_transaction, get_transaction, get_transactions,
        update_transaction,
    },
    users::{create_user, delete_user, get_user, get_users, update_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // User CRUD routes
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(get_users))
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/users/:user_id", put(update_user))
        .route("/api/v1/users/:user_id", delete(delete_user))
        // Transaction category CRUD routes
        .route("/api/v1/users/:user_id/categories", post(create_category))
        .route("/api/v1/users/:user_id/categories", get(get_categories))
        .route("/api/v1/categories/:category_id", get(get_category))
        .route("/api/v1/categories/:category_id", put(update_category))
        .route("/api/v1/categories/:category_id", delete(delete_category))
        // Transaction CRUD routes
        .route("/api/v1/users/:user_id/transactions", post(create_transaction))
        .route("/api/v1/users/:user_id/transactions", get(get_transactions))
        .route("/api/v1/transactions/:transaction_id", get(get_transaction))
        .route("/api/v1/transactions/:transaction_id", put(update_transaction))
        .route("/api/v1/transactions/:transaction_id", delete(delete_transaction))
        // Budget CRUD routes
        .route("/api/v1/users/:user_id/budgets", post(create_budget))
        .route("/api/v1/users/:user_id/budgets", get(get_budgets))
        .route("/api/v1/budgets/:budget_id", get(get_budget))
        .route("/api/v1/budgets/:budget_id", put(update_budget))
        .route("/api/v1/budgets/:budget_id", delete(delete_budget))
        // Investment CRUD routes
        .route("/api/v1/users/:user_id/investments", post(create_investment))
        .route("/api/v1/users/:user_id/investments", get(get_investments))
        .route("/api/v1/investments/:investment_id", get(get_investment))
        .route("/api/v1/investments/:investment_id", put(update_investment))
        .route("/api/v1/investments/:investment_id", delete(delete_investment))
        // Debt CRUD routes
        .route("/api/v1/users/:user_id/debts", post(create_debt))
        .route("/api/v1/users/:user_id/debts", get(get_debts))
        .route("/api/v1/debts/:debt_id", get(get_debt))
        .route("/api/v1/debts/:debt_id", put(update_debt))
        .route("/api/v1/debts/:debt_id", delete(delete_debt))
        // Report routes
        .route(
            "/api/v1/users/:user_id/reports/summary",
            get(get_financial_summary),
        )
        .route(
            "/api/v1/users/:user_id/reports/category-spending",
            get(get_category_spending),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
