use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Caretakers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Caretakers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Caretakers::FullName).string_len(255).not_null())
                    .col(ColumnDef::new(Caretakers::Phone).string_len(32).null())
                    .col(
                        ColumnDef::new(Caretakers::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Caretakers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Caretakers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Caretakers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Caretakers {
    Table,
    Id,
    FullName,
    Phone,
    Status,
    CreatedAt,
    UpdatedAt,
}
