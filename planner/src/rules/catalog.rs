use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::entity::{event_service, service};

use super::{RuleError, events::find_service};

/// Services clients can attach to their events.
pub async fn list_available_services<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<service::Model>, RuleError> {
    Ok(service::Entity::find()
        .filter(service::Column::IsAvailable.eq(true))
        .order_by_asc(service::Column::Name)
        .all(conn)
        .await?)
}

/// Deletes a catalog service unless an event still references it.
pub async fn delete_service<C: ConnectionTrait>(conn: &C, service_id: Uuid) -> Result<(), RuleError> {
    let service = find_service(conn, service_id).await?;

    let in_use = event_service::Entity::find()
        .filter(event_service::Column::ServiceId.eq(service.id))
        .count(conn)
        .await?;
    if in_use > 0 {
        tracing::warn!(%service_id, references = in_use, "refusing to delete service in use");
        return Err(RuleError::InUse {
            entity: "service",
            name: service.name,
            count: in_use,
        });
    }

    service::Entity::delete_by_id(service.id).exec(conn).await?;
    tracing::info!(%service_id, "service deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::app_user::Role;
    use crate::rules::events::add_service_to_event;
    use crate::rules::test_support::{insert_event, insert_service, insert_user, setup_db};
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, Set};

    #[tokio::test]
    async fn delete_unreferenced_service_ok() {
        let db = setup_db().await;
        let svc = insert_service(&db, "Transporte").await;

        delete_service(&db, svc.id).await.unwrap();
        assert!(service::Entity::find_by_id(svc.id).one(&db).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_referenced_service_rejected() {
        let db = setup_db().await;
        let user = insert_user(&db, "ana", Role::Client).await;
        let e1 = insert_event(&db, user.id, 0).await;
        let e2 = insert_event(&db, user.id, 0).await;
        let svc = insert_service(&db, "Transporte").await;
        add_service_to_event(&db, e1.id, svc.id, Decimal::from(50), None).await.unwrap();
        add_service_to_event(&db, e2.id, svc.id, Decimal::from(60), None).await.unwrap();

        let err = delete_service(&db, svc.id).await.unwrap_err();
        match err {
            RuleError::InUse { count, ref name, .. } => {
                assert_eq!(count, 2);
                assert_eq!(name, "Transporte");
            }
            other => panic!("expected InUse, got {other:?}"),
        }
        assert!(service::Entity::find_by_id(svc.id).one(&db).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_missing_service_not_found() {
        let db = setup_db().await;
        let res = delete_service(&db, Uuid::now_v7()).await;
        assert!(matches!(res, Err(RuleError::NotFound(_))));
    }

    #[tokio::test]
    async fn available_services_excludes_hidden() {
        let db = setup_db().await;
        insert_service(&db, "Decoración floral").await;
        let hidden = insert_service(&db, "Mariachi").await;
        let mut active: service::ActiveModel = hidden.into();
        active.is_available = Set(false);
        active.update(&db).await.unwrap();

        let names: Vec<_> = list_available_services(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Decoración floral"]);
    }
}
