use sea_orm::entity::prelude::*;

/// Represents a user of the system.
///
/// Registration, sessions and password hashing live in the surrounding
/// application; the reporting engine only needs the owning identifier.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
    #[sea_orm(has_many = "super::transaction_category::Entity")]
    TransactionCategory,
    #[sea_orm(has_many = "super::budget::Entity")]
    Budget,
    #[sea_orm(has_many = "super::investment::Entity")]
    Investment,
    #[sea_orm(has_many = "super::debt::Entity")]
    Debt,
}

impl ActiveModelBehavior for ActiveModel {}
