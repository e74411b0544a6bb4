use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventService::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventService::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventService::EventId).uuid().not_null())
                    .col(ColumnDef::new(EventService::ServiceId).uuid().not_null())
                    .col(
                        ColumnDef::new(EventService::AgreedPriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EventService::Notes).text().null())
                    .col(
                        ColumnDef::new(EventService::AddedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_es_event")
                            .from(EventService::Table, EventService::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_es_service")
                            .from(EventService::Table, EventService::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_es_unique")
                    .table(EventService::Table)
                    .col(EventService::EventId)
                    .col(EventService::ServiceId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventService::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EventService {
    Table,
    Id,
    EventId,
    ServiceId,
    AgreedPriceCents,
    Notes,
    AddedAt,
}

#[derive(Iden)]
enum Event {
    Table,
    Id,
}

#[derive(Iden)]
enum Service {
    Table,
    Id,
}
