use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Users
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::Username).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        // 2. Transaction categories
        manager
            .create_table(
                Table::create()
                    .table(TransactionCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransactionCategory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TransactionCategory::Name).string().not_null())
                    .col(ColumnDef::new(TransactionCategory::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(TransactionCategory::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(TransactionCategory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transaction-category-user")
                            .from(TransactionCategory::Table, TransactionCategory::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 3. Transactions
        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transaction::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transaction::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Transaction::Amount)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transaction::Description).string().not_null())
                    .col(ColumnDef::new(Transaction::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(Transaction::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Transaction::TransactionDate).date().not_null())
                    .col(
                        ColumnDef::new(Transaction::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transaction::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transaction-user")
                            .from(Transaction::Table, Transaction::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transaction-category")
                            .from(Transaction::Table, Transaction::CategoryId)
                            .to(TransactionCategory::Table, TransactionCategory::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 4. Budgets
        manager
            .create_table(
                Table::create()
                    .table(Budget::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Budget::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Budget::UserId).integer().not_null())
                    .col(ColumnDef::new(Budget::Name).string().not_null())
                    .col(ColumnDef::new(Budget::CategoryId).integer())
                    .col(
                        ColumnDef::new(Budget::BudgetAmount)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Budget::PeriodType).string_len(16).not_null())
                    .col(ColumnDef::new(Budget::StartDate).date().not_null())
                    .col(ColumnDef::new(Budget::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Budget::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Budget::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budget-user")
                            .from(Budget::Table, Budget::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budget-category")
                            .from(Budget::Table, Budget::CategoryId)
                            .to(TransactionCategory::Table, TransactionCategory::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 5. Investments
        manager
            .create_table(
                Table::create()
                    .table(Investment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Investment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Investment::UserId).integer().not_null())
                    .col(ColumnDef::new(Investment::Name).string().not_null())
                    .col(ColumnDef::new(Investment::InvestmentType).string().not_null())
                    .col(
                        ColumnDef::new(Investment::Quantity)
                            .decimal_len(24, 8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Investment::PurchasePrice)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Investment::CurrentValue)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Investment::PurchaseDate).date().not_null())
                    .col(
                        ColumnDef::new(Investment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Investment::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-investment-user")
                            .from(Investment::Table, Investment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 6. Debts
        manager
            .create_table(
                Table::create()
                    .table(Debt::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Debt::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Debt::UserId).integer().not_null())
                    .col(ColumnDef::new(Debt::Lender).string().not_null())
                    .col(ColumnDef::new(Debt::DebtType).string().not_null())
                    .col(
                        ColumnDef::new(Debt::OriginalAmount)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Debt::CurrentBalance)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Debt::InterestRate)
                            .decimal_len(8, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Debt::MinimumPayment)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Debt::DueDate).date())
                    .col(
                        ColumnDef::new(Debt::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Debt::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-debt-user")
                            .from(Debt::Table, Debt::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        manager
            .drop_table(Table::drop().table(Debt::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Investment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budget::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transaction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransactionCategory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
}

#[derive(DeriveIden)]
enum TransactionCategory {
    #[sea_orm(iden = "transaction_categories")]
    Table,
    Id,
    Name,
    Kind,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Transaction {
    #[sea_orm(iden = "transactions")]
    Table,
    Id,
    UserId,
    Amount,
    Description,
    Kind,
    CategoryId,
    TransactionDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Budget {
    #[sea_orm(iden = "budgets")]
    Table,
    Id,
    UserId,
    Name,
    CategoryId,
    BudgetAmount,
    PeriodType,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Investment {
    #[sea_orm(iden = "investments")]
    Table,
    Id,
    UserId,
    Name,
    InvestmentType,
    Quantity,
    PurchasePrice,
    CurrentValue,
    PurchaseDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Debt {
    #[sea_orm(iden = "debts")]
    Table,
    Id,
    UserId,
    Lender,
    DebtType,
    OriginalAmount,
    CurrentBalance,
    InterestRate,
    MinimumPayment,
    DueDate,
    CreatedAt,
    UpdatedAt,
}
