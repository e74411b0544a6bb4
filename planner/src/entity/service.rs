use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[sea_orm(string_value = "photography")]
    Photography,
    #[sea_orm(string_value = "catering")]
    Catering,
    #[sea_orm(string_value = "decoration")]
    Decoration,
    #[sea_orm(string_value = "music")]
    Music,
    #[sea_orm(string_value = "transport")]
    Transport,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub base_price_cents: i64,
    pub category: Category,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime,
}

impl Model {
    pub fn base_price(&self) -> Decimal {
        money::from_cents(self.base_price_cents)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_service::Entity")]
    EventService,
}

impl Related<super::event_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventService.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
