use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Spending aggregated over one expense category within a reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySpending {
    pub category_id: i32,
    pub category_name: String,
    /// Sum of expense transaction amounts in the category.
    pub total_amount: Decimal,
    /// Number of expense transactions in the category.
    pub transaction_count: i64,
    /// Share of the period's total expenses, 0-100, rounded to two places.
    /// Zero when the period total is zero.
    pub percentage_of_total: Decimal,
}

/// How one budget fared against the expenses of a reporting period.
///
/// Spend is always measured against the requested reporting period, not
/// the budget's own window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BudgetPerformance {
    pub budget_id: i32,
    pub budget_name: String,
    pub budget_amount: Decimal,
    pub spent_amount: Decimal,
    /// `budget_amount - spent_amount`; negative means overspend.
    pub remaining_amount: Decimal,
    /// 0-100 (may exceed 100 on overspend), rounded to two places.
    /// Zero when `budget_amount` is zero.
    pub percentage_used: Decimal,
}

/// Point-in-time financial summary for one user over a reporting period.
///
/// Transaction totals and budget performance are scoped to the period;
/// investment and debt valuations are current snapshots, independent of
/// the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FinancialSummary {
    pub user_id: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub net_income: Decimal,
    /// Sum of `current_value` over all of the user's investments.
    pub total_investments_value: Decimal,
    /// Sum of `current_balance` over all of the user's debts.
    pub total_debt_balance: Decimal,
    pub budget_performance: Vec<BudgetPerformance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Monetary values cross the API boundary as decimal strings, never
    /// as binary floats.
    #[test]
    fn test_summary_serializes_decimals_as_strings() {
        let summary = FinancialSummary {
            user_id: 7,
            period_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            total_income: Decimal::new(620000, 2),
            total_expenses: Decimal::new(110000, 2),
            net_income: Decimal::new(510000, 2),
            total_investments_value: Decimal::new(2680000, 2),
            total_debt_balance: Decimal::ZERO,
            budget_performance: vec![BudgetPerformance {
                budget_id: 1,
                budget_name: "Overall".to_string(),
                budget_amount: Decimal::new(300000, 2),
                spent_amount: Decimal::new(110000, 2),
                remaining_amount: Decimal::new(190000, 2),
                percentage_used: Decimal::new(3667, 2),
            }],
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["total_income"], "6200.00");
        assert_eq!(value["net_income"], "5100.00");
        assert_eq!(value["period_start"], "2024-01-01");
        assert_eq!(value["budget_performance"][0]["percentage_used"], "36.67");
    }
}
