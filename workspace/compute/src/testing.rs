//! Shared fixtures for compute tests: an in-memory database with the
//! full schema applied, plus seeding helpers for every record type.

use chrono::{NaiveDate, Utc};
use migration::{Migrator, MigratorTrait};
use model::entities::{
    budget, debt, investment, transaction, transaction_category, user, BudgetPeriod, FlowKind,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub async fn seed_user(db: &DatabaseConnection, username: &str) -> user::Model {
    user::ActiveModel {
        username: Set(username.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed user")
}

pub async fn seed_category(
    db: &DatabaseConnection,
    user_id: i32,
    name: &str,
    kind: FlowKind,
) -> transaction_category::Model {
    transaction_category::ActiveModel {
        name: Set(name.to_string()),
        kind: Set(kind),
        user_id: Set(user_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed category")
}

pub async fn seed_transaction(
    db: &DatabaseConnection,
    user_id: i32,
    category_id: i32,
    kind: FlowKind,
    amount: Decimal,
    transaction_date: NaiveDate,
) -> transaction::Model {
    let now = Utc::now();
    transaction::ActiveModel {
        user_id: Set(user_id),
        amount: Set(amount),
        description: Set("seeded transaction".to_string()),
        kind: Set(kind),
        category_id: Set(category_id),
        transaction_date: Set(transaction_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed transaction")
}

pub async fn seed_budget(
    db: &DatabaseConnection,
    user_id: i32,
    name: &str,
    category_id: Option<i32>,
    budget_amount: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> budget::Model {
    let now = Utc::now();
    budget::ActiveModel {
        user_id: Set(user_id),
        name: Set(name.to_string()),
        category_id: Set(category_id),
        budget_amount: Set(budget_amount),
        period_type: Set(BudgetPeriod::Monthly),
        start_date: Set(start_date),
        end_date: Set(end_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed budget")
}

pub async fn seed_investment(
    db: &DatabaseConnection,
    user_id: i32,
    name: &str,
    current_value: Decimal,
) -> investment::Model {
    let now = Utc::now();
    investment::ActiveModel {
        user_id: Set(user_id),
        name: Set(name.to_string()),
        investment_type: Set("stock".to_string()),
        quantity: Set(Decimal::new(250_000_000, 8)), // 2.5 units
        purchase_price: Set(Decimal::new(10_000, 2)),
        current_value: Set(current_value),
        purchase_date: Set(date(2023, 6, 1)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed investment")
}

pub async fn seed_debt(
    db: &DatabaseConnection,
    user_id: i32,
    lender: &str,
    current_balance: Decimal,
) -> debt::Model {
    let now = Utc::now();
    debt::ActiveModel {
        user_id: Set(user_id),
        lender: Set(lender.to_string()),
        debt_type: Set("loan".to_string()),
        original_amount: Set(current_balance),
        current_balance: Set(current_balance),
        interest_rate: Set(Decimal::new(525, 4)), // 5.25%
        minimum_payment: Set(Decimal::new(5_000, 2)),
        due_date: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed debt")
}
