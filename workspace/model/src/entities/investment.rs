use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::user;

/// A held investment position.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "investments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    /// Free-form asset class label ("stock", "etf", "crypto", ...).
    pub investment_type: String,
    /// Eight fractional digits so fractional share and crypto units
    /// survive the round trip.
    #[sea_orm(column_type = "Decimal(Some((24, 8)))")]
    pub quantity: Decimal,
    /// Per-unit price at purchase.
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub purchase_price: Decimal,
    /// Total current value of the position, not per-unit.
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub current_value: Decimal,
    pub purchase_date: NaiveDate,
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
