use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::user;

/// An outstanding debt.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub lender: String,
    /// Free-form label ("mortgage", "credit_card", ...).
    pub debt_type: String,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub original_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub current_balance: Decimal,
    /// Fractional rate, e.g. 0.0525 for 5.25%.
    #[sea_orm(column_type = "Decimal(Some((8, 4)))")]
    pub interest_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub minimum_payment: Decimal,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
