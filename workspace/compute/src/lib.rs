//! Read-only financial aggregation over the persisted records.
//!
//! The three entry points are pure read-and-compute operations against
//! an injected database connection:
//!
//! - [`category_spending::category_spending`] groups a user's expense
//!   transactions in a period by category.
//! - [`budget_performance::budget_performance`] evaluates every budget
//!   whose window overlaps the period against the period's expenses.
//! - [`summary::financial_summary`] composes transaction totals,
//!   investment and debt snapshots, and budget performance into one
//!   report.
//!
//! All money math stays in `rust_decimal::Decimal`; the only rounding
//! is on the two percentage outputs.

pub mod budget_performance;
pub mod category_spending;
pub mod error;
pub mod summary;

#[cfg(test)]
pub mod testing;
