use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Service::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Service::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Service::Description).string_len(500).null())
                    // Stored in cents.
                    .col(
                        ColumnDef::new(Service::BasePriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Service::Category)
                            .string_len(50)
                            .not_null()
                            .default("other"),
                    )
                    .col(
                        ColumnDef::new(Service::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Service::ImageUrl).string_len(255).null())
                    .col(
                        ColumnDef::new(Service::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Service::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Service {
    Table,
    Id,
    Name,
    Description,
    BasePriceCents,
    Category,
    IsAvailable,
    ImageUrl,
    CreatedAt,
}
