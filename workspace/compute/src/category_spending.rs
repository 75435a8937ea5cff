//! Per-category expense breakdown for a reporting period.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use common::CategorySpending;
use model::entities::{transaction, transaction_category, FlowKind};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, instrument};

use crate::error::Result;

/// Groups the user's expense transactions within the inclusive
/// `[period_start, period_end]` range by category.
///
/// Only categories with at least one matching transaction appear. Each
/// row carries the category total, the transaction count, and the
/// category's share of the period total as a percentage. A period with
/// no expenses yields an empty list. Rows are ordered by `category_id`
/// so results are reproducible; callers may re-sort for display.
#[instrument(skip(db), fields(user_id = user_id, period_start = %period_start, period_end = %period_end))]
pub async fn category_spending(
    db: &DatabaseConnection,
    user_id: i32,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Result<Vec<CategorySpending>> {
    let rows = transaction::Entity::find()
        .find_also_related(transaction_category::Entity)
        .filter(transaction::Column::UserId.eq(user_id))
        .filter(transaction::Column::Kind.eq(FlowKind::Expense))
        .filter(
            Condition::all()
                .add(transaction::Column::TransactionDate.gte(period_start))
                .add(transaction::Column::TransactionDate.lte(period_end)),
        )
        .all(db)
        .await?;

    debug!(
        "Found {} expense transactions for user_id={} from {} to {}",
        rows.len(),
        user_id,
        period_start,
        period_end
    );

    // Group by category. BTreeMap keeps the output ordered by category_id.
    let mut groups: BTreeMap<i32, (String, Decimal, i64)> = BTreeMap::new();
    for (tx, category) in rows {
        // Category ownership is enforced at write time; a transaction
        // without a category row would be dropped by the join.
        let Some(category) = category else { continue };
        let entry = groups
            .entry(category.id)
            .or_insert_with(|| (category.name.clone(), Decimal::ZERO, 0));
        entry.1 += tx.amount;
        entry.2 += 1;
    }

    let grand_total: Decimal = groups.values().map(|(_, total, _)| *total).sum();

    let spending = groups
        .into_iter()
        .map(|(category_id, (category_name, total_amount, transaction_count))| {
            // Explicit zero-total guard: never divide by zero.
            let percentage_of_total = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                (total_amount / grand_total * Decimal::ONE_HUNDRED).round_dp(2)
            };

            CategorySpending {
                category_id,
                category_name,
                total_amount,
                transaction_count,
                percentage_of_total,
            }
        })
        .collect();

    Ok(spending)
}
