pub use sea_orm_migration::prelude::*;

mod m20251104_000001_create_app_users;
mod m20251104_000002_create_clients;
mod m20251105_000003_create_services;
mod m20251105_000004_create_vendors;
mod m20251106_000005_create_events;
mod m20251106_000006_create_event_services;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251104_000001_create_app_users::Migration),
            Box::new(m20251104_000002_create_clients::Migration),
            Box::new(m20251105_000003_create_services::Migration),
            Box::new(m20251105_000004_create_vendors::Migration),
            Box::new(m20251106_000005_create_events::Migration),
            Box::new(m20251106_000006_create_event_services::Migration),
        ]
    }
}
