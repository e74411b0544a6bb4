use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::entity::{
    app_user,
    event::{self, Status},
    service,
};

use super::RuleError;

const RECENT_EVENTS: u64 = 5;

#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_events: u64,
    pub total_services: u64,
    pub pending_events: u64,
    pub recent_events: Vec<event::Model>,
}

pub async fn dashboard_stats<C: ConnectionTrait>(conn: &C) -> Result<DashboardStats, RuleError> {
    Ok(DashboardStats {
        total_users: app_user::Entity::find().count(conn).await?,
        total_events: event::Entity::find().count(conn).await?,
        total_services: service::Entity::find().count(conn).await?,
        pending_events: event::Entity::find()
            .filter(event::Column::Status.eq(Status::Pending))
            .count(conn)
            .await?,
        recent_events: event::Entity::find()
            .order_by_desc(event::Column::CreatedAt)
            .order_by_desc(event::Column::Id)
            .limit(RECENT_EVENTS)
            .all(conn)
            .await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::app_user::Role;
    use crate::rules::{
        Actor,
        events::cancel_event,
        test_support::{insert_event, insert_service, insert_user, setup_db},
    };

    #[tokio::test]
    async fn counts_and_recent_events() {
        let db = setup_db().await;
        let user = insert_user(&db, "ana", Role::Client).await;
        insert_service(&db, "Fotografía").await;
        let mut ids = Vec::new();
        for _ in 0..7 {
            ids.push(insert_event(&db, user.id, 0).await.id);
        }
        cancel_event(&db, &Actor::new(user.id, user.role), ids[0]).await.unwrap();

        let stats = dashboard_stats(&db).await.unwrap();
        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.total_services, 1);
        assert_eq!(stats.total_events, 7);
        assert_eq!(stats.pending_events, 6);
        assert_eq!(stats.recent_events.len(), 5);
        assert!(!stats.recent_events.iter().any(|e| e.id == ids[0]));
    }
}
