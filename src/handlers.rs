pub mod budgets;
pub mod categories;
pub mod debts;
pub mod health;
pub mod investments;
pub mod reports;
pub mod transactions;
pub mod users;
