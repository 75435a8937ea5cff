//! Budget evaluation against a reporting period.

use chrono::NaiveDate;
use common::BudgetPerformance;
use futures::stream::{self, StreamExt, TryStreamExt};
use model::entities::{budget, transaction, FlowKind};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument, trace};

use crate::error::{ComputeError, Result};

/// Upper bound on concurrent per-budget spend queries, so a user with
/// many budgets cannot exhaust the store's connections.
pub const MAX_SPEND_QUERY_CONCURRENCY: usize = 8;

/// Evaluates every budget of the user whose own `[start_date, end_date]`
/// window overlaps the reporting period.
///
/// Overlap is interval overlap, not containment: a budget partially
/// covering the period still appears. Spend is always measured against
/// the reporting period itself, never the budget's window. Budgets
/// without overlap are excluded entirely rather than reported with zero
/// spend. Results are ordered by budget id.
#[instrument(skip(db), fields(user_id = user_id, period_start = %period_start, period_end = %period_end))]
pub async fn budget_performance(
    db: &DatabaseConnection,
    user_id: i32,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Result<Vec<BudgetPerformance>> {
    let budgets = budget::Entity::find()
        .filter(budget::Column::UserId.eq(user_id))
        .filter(budget::Column::StartDate.lte(period_end))
        .filter(budget::Column::EndDate.gte(period_start))
        .order_by_asc(budget::Column::Id)
        .all(db)
        .await?;

    debug!(
        "Evaluating {} overlapping budgets for user_id={}",
        budgets.len(),
        user_id
    );

    // Per-budget spend queries are independent; `buffered` bounds the
    // fan-out while preserving budget order.
    let performance = stream::iter(budgets)
        .map(|budget| async move {
            let spent = spent_in_period(db, user_id, budget.category_id, period_start, period_end)
                .await?;
            Ok::<_, ComputeError>(evaluate_budget(budget, spent))
        })
        .buffered(MAX_SPEND_QUERY_CONCURRENCY)
        .try_collect()
        .await?;

    Ok(performance)
}

/// Sums the user's expense transactions inside the reporting period,
/// optionally restricted to one category. `None` means an overall
/// budget spanning all expense categories.
async fn spent_in_period(
    db: &DatabaseConnection,
    user_id: i32,
    category_id: Option<i32>,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Result<Decimal> {
    let mut query = transaction::Entity::find()
        .filter(transaction::Column::UserId.eq(user_id))
        .filter(transaction::Column::Kind.eq(FlowKind::Expense))
        .filter(transaction::Column::TransactionDate.gte(period_start))
        .filter(transaction::Column::TransactionDate.lte(period_end));

    if let Some(category_id) = category_id {
        query = query.filter(transaction::Column::CategoryId.eq(category_id));
    }

    let spent = query.all(db).await?.into_iter().map(|tx| tx.amount).sum();

    trace!(
        "Spent {} for user_id={} category_id={:?} from {} to {}",
        spent, user_id, category_id, period_start, period_end
    );

    Ok(spent)
}

fn evaluate_budget(budget: budget::Model, spent_amount: Decimal) -> BudgetPerformance {
    // Schema guarantees budget_amount > 0, but the division must not
    // run against zero even so.
    let percentage_used = if budget.budget_amount.is_zero() {
        Decimal::ZERO
    } else {
        (spent_amount / budget.budget_amount * Decimal::ONE_HUNDRED).round_dp(2)
    };

    BudgetPerformance {
        budget_id: budget.id,
        budget_name: budget.name,
        budget_amount: budget.budget_amount,
        spent_amount,
        remaining_amount: budget.budget_amount - spent_amount,
        percentage_used,
    }
}
