//! Point-in-time financial summary composition.

use chrono::NaiveDate;
use common::FinancialSummary;
use model::entities::{debt, investment, transaction, FlowKind};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, instrument};

use crate::budget_performance::budget_performance;
use crate::error::Result;

/// Composes the financial summary for one user over the inclusive
/// `[period_start, period_end]` range.
///
/// Transaction totals and budget performance are scoped to the period.
/// Investment and debt valuations are snapshots over all of the user's
/// records, independent of the period. The four underlying reads have
/// no data dependency on each other and run concurrently; the first
/// failure aborts the whole composition, so no partial summary is ever
/// returned. An unknown user yields all-zero totals and empty lists.
#[instrument(skip(db), fields(user_id = user_id, period_start = %period_start, period_end = %period_end))]
pub async fn financial_summary(
    db: &DatabaseConnection,
    user_id: i32,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Result<FinancialSummary> {
    let ((total_income, total_expenses), total_investments_value, total_debt_balance, performance) =
        futures::try_join!(
            transaction_totals(db, user_id, period_start, period_end),
            investments_value(db, user_id),
            debt_balance(db, user_id),
            budget_performance(db, user_id, period_start, period_end),
        )?;

    debug!(
        "Summary for user_id={}: income={}, expenses={}, investments={}, debts={}, budgets={}",
        user_id,
        total_income,
        total_expenses,
        total_investments_value,
        total_debt_balance,
        performance.len()
    );

    Ok(FinancialSummary {
        user_id,
        period_start,
        period_end,
        total_income,
        total_expenses,
        net_income: total_income - total_expenses,
        total_investments_value,
        total_debt_balance,
        budget_performance: performance,
    })
}

/// Sums the user's transactions inside the period, split by kind.
/// Returns `(total_income, total_expenses)`.
async fn transaction_totals(
    db: &DatabaseConnection,
    user_id: i32,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Result<(Decimal, Decimal)> {
    let transactions = transaction::Entity::find()
        .filter(transaction::Column::UserId.eq(user_id))
        .filter(transaction::Column::TransactionDate.gte(period_start))
        .filter(transaction::Column::TransactionDate.lte(period_end))
        .all(db)
        .await?;

    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for tx in transactions {
        // The stored kind is trusted as-is; write-path consistency with
        // the category's kind is the collaborators' concern.
        match tx.kind {
            FlowKind::Income => income += tx.amount,
            FlowKind::Expense => expenses += tx.amount,
        }
    }

    Ok((income, expenses))
}

/// Current total value across all of the user's investments. Not
/// filtered by the reporting period: valuation is always "as of now".
async fn investments_value(db: &DatabaseConnection, user_id: i32) -> Result<Decimal> {
    let investments = investment::Entity::find()
        .filter(investment::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    Ok(investments.into_iter().map(|i| i.current_value).sum())
}

/// Current total balance across all of the user's debts. Not filtered
/// by the reporting period.
async fn debt_balance(db: &DatabaseConnection, user_id: i32) -> Result<Decimal> {
    let debts = debt::Entity::find()
        .filter(debt::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    Ok(debts.into_iter().map(|d| d.current_balance).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        date, seed_budget, seed_category, seed_debt, seed_investment, seed_transaction, seed_user,
        setup_db,
    };
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_transaction_totals_and_net_income() {
        let db = setup_db().await;
        let user = seed_user(&db, "summary").await;
        let salary = seed_category(&db, user.id, "Salary", FlowKind::Income).await;
        let food = seed_category(&db, user.id, "Food", FlowKind::Expense).await;

        // Income 5000 + 1200, expenses 800 + 300, all inside January.
        seed_transaction(
            &db,
            user.id,
            salary.id,
            FlowKind::Income,
            Decimal::new(500000, 2),
            date(2024, 1, 15),
        )
        .await;
        seed_transaction(
            &db,
            user.id,
            salary.id,
            FlowKind::Income,
            Decimal::new(120000, 2),
            date(2024, 1, 20),
        )
        .await;
        seed_transaction(
            &db,
            user.id,
            food.id,
            FlowKind::Expense,
            Decimal::new(80000, 2),
            date(2024, 1, 10),
        )
        .await;
        seed_transaction(
            &db,
            user.id,
            food.id,
            FlowKind::Expense,
            Decimal::new(30000, 2),
            date(2024, 1, 25),
        )
        .await;

        let summary = financial_summary(&db, user.id, date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        assert_eq!(summary.total_income, Decimal::new(620000, 2));
        assert_eq!(summary.total_expenses, Decimal::new(110000, 2));
        assert_eq!(summary.net_income, Decimal::new(510000, 2));
        assert_eq!(summary.net_income, summary.total_income - summary.total_expenses);
        assert_eq!(summary.period_start, date(2024, 1, 1));
        assert_eq!(summary.period_end, date(2024, 1, 31));
    }

    #[tokio::test]
    async fn test_valuations_are_period_independent_snapshots() {
        let db = setup_db().await;
        let user = seed_user(&db, "summary").await;

        seed_investment(&db, user.id, "Index fund", Decimal::new(180000, 2)).await;
        seed_investment(&db, user.id, "Brokerage", Decimal::new(2500000, 2)).await;
        seed_debt(&db, user.id, "Bank", Decimal::new(1200000, 2)).await;

        // Two disjoint periods give the same snapshot totals.
        let january = financial_summary(&db, user.id, date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        let june = financial_summary(&db, user.id, date(2030, 6, 1), date(2030, 6, 30))
            .await
            .unwrap();

        assert_eq!(january.total_investments_value, Decimal::new(2680000, 2));
        assert_eq!(june.total_investments_value, Decimal::new(2680000, 2));
        assert_eq!(january.total_debt_balance, Decimal::new(1200000, 2));
        assert_eq!(june.total_debt_balance, Decimal::new(1200000, 2));
    }

    #[tokio::test]
    async fn test_unknown_user_yields_zero_summary() {
        let db = setup_db().await;

        let summary = financial_summary(&db, 424242, date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expenses, Decimal::ZERO);
        assert_eq!(summary.net_income, Decimal::ZERO);
        assert_eq!(summary.total_investments_value, Decimal::ZERO);
        assert_eq!(summary.total_debt_balance, Decimal::ZERO);
        assert!(summary.budget_performance.is_empty());
    }

    #[tokio::test]
    async fn test_summary_includes_overlapping_budget_performance() {
        let db = setup_db().await;
        let user = seed_user(&db, "summary").await;
        let food = seed_category(&db, user.id, "Food", FlowKind::Expense).await;

        seed_budget(
            &db,
            user.id,
            "Overall",
            None,
            Decimal::new(300000, 2),
            date(2024, 1, 1),
            date(2024, 1, 31),
        )
        .await;
        // Entirely in February: must not appear for a January report.
        seed_budget(
            &db,
            user.id,
            "February",
            None,
            Decimal::new(100000, 2),
            date(2024, 2, 1),
            date(2024, 2, 29),
        )
        .await;

        seed_transaction(
            &db,
            user.id,
            food.id,
            FlowKind::Expense,
            Decimal::new(65000, 2),
            date(2024, 1, 12),
        )
        .await;

        let summary = financial_summary(&db, user.id, date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        assert_eq!(summary.budget_performance.len(), 1);
        let row = &summary.budget_performance[0];
        assert_eq!(row.budget_name, "Overall");
        assert_eq!(row.spent_amount, Decimal::new(65000, 2));
        assert_eq!(row.remaining_amount, Decimal::new(235000, 2));
        assert_eq!(row.percentage_used, Decimal::new(2167, 2));
    }

    #[tokio::test]
    async fn test_pure_read_is_idempotent() {
        let db = setup_db().await;
        let user = seed_user(&db, "summary").await;
        let food = seed_category(&db, user.id, "Food", FlowKind::Expense).await;
        seed_transaction(
            &db,
            user.id,
            food.id,
            FlowKind::Expense,
            Decimal::new(12345, 2),
            date(2024, 1, 7),
        )
        .await;

        let first = financial_summary(&db, user.id, date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        let second = financial_summary(&db, user.id, date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        assert_eq!(first, second);
    }
}
