use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vendor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub service_type: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Rating in hundredths of a point (0..=500).
    pub rating_hundredths: Option<i32>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
}

impl Model {
    pub fn rating(&self) -> Option<Decimal> {
        self.rating_hundredths.map(|r| Decimal::new(r.into(), 2))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
