use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vendor::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Vendor::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Vendor::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Vendor::ServiceType).string_len(100).not_null())
                    .col(ColumnDef::new(Vendor::ContactName).string_len(100).null())
                    .col(ColumnDef::new(Vendor::Phone).string_len(15).null())
                    .col(ColumnDef::new(Vendor::Email).string_len(100).null())
                    // Hundredths of a point, 0..=500.
                    .col(ColumnDef::new(Vendor::RatingHundredths).integer().null())
                    .col(ColumnDef::new(Vendor::Notes).text().null())
                    .col(
                        ColumnDef::new(Vendor::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Vendor::CreatedAt)
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
            .drop_table(Table::drop().table(Vendor::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Vendor {
    Table,
    Id,
    Name,
    ServiceType,
    ContactName,
    Phone,
    Email,
    RatingHundredths,
    Notes,
    IsActive,
    CreatedAt,
}
