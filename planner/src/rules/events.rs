use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::{
    event::{self, Status},
    event_service, service,
};
use crate::forms::EventFields;
use crate::validation;

use super::{Actor, RuleError, ensure_can_modify_event};

/// An event together with its contracted services and their total.
#[derive(Debug, Clone)]
pub struct EventDetail {
    pub event: event::Model,
    pub services: Vec<(event_service::Model, service::Model)>,
    pub total: Decimal,
}

pub async fn find_event<C: ConnectionTrait>(conn: &C, event_id: Uuid) -> Result<event::Model, RuleError> {
    event::Entity::find_by_id(event_id)
        .one(conn)
        .await?
        .ok_or_else(|| RuleError::not_found("Event"))
}

pub async fn find_service<C: ConnectionTrait>(
    conn: &C,
    service_id: Uuid,
) -> Result<service::Model, RuleError> {
    service::Entity::find_by_id(service_id)
        .one(conn)
        .await?
        .ok_or_else(|| RuleError::not_found("Service"))
}

/// Loads an event the actor is allowed to see or change.
pub async fn find_event_for<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    event_id: Uuid,
) -> Result<event::Model, RuleError> {
    let event = find_event(conn, event_id).await?;
    ensure_can_modify_event(actor, &event)?;
    Ok(event)
}

pub fn sum_agreed_prices<'a>(rows: impl IntoIterator<Item = &'a event_service::Model>) -> Decimal {
    rows.into_iter().map(event_service::Model::agreed_price).sum()
}

pub async fn compute_event_total<C: ConnectionTrait>(
    conn: &C,
    event_id: Uuid,
) -> Result<Decimal, RuleError> {
    let rows = event_service::Entity::find()
        .filter(event_service::Column::EventId.eq(event_id))
        .all(conn)
        .await?;
    Ok(sum_agreed_prices(&rows))
}

/// Attaches a service to an event at an agreed price.
///
/// Each (event, service) pair may appear at most once and the price must be
/// strictly positive.
pub async fn add_service_to_event<C: ConnectionTrait>(
    conn: &C,
    event_id: Uuid,
    service_id: Uuid,
    price: Decimal,
    notes: Option<String>,
) -> Result<event_service::Model, RuleError> {
    let price_cents = validation::positive_amount("Agreed price", price)?;
    let event = find_event(conn, event_id).await?;
    let service = find_service(conn, service_id).await?;

    let existing = event_service::Entity::find()
        .filter(event_service::Column::EventId.eq(event.id))
        .filter(event_service::Column::ServiceId.eq(service.id))
        .count(conn)
        .await?;
    let duplicate_msg = format!("Service \"{}\" is already added to this event", service.name);
    if existing > 0 {
        return Err(RuleError::Duplicate(duplicate_msg));
    }

    let row = event_service::ActiveModel {
        id: Set(Uuid::now_v7()),
        event_id: Set(event.id),
        service_id: Set(service.id),
        agreed_price_cents: Set(price_cents),
        notes: Set(notes.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty())),
        added_at: Set(Utc::now().naive_utc()),
    }
    .insert(conn)
    .await
    .map_err(|e| RuleError::from_insert(e, &duplicate_msg))?;

    tracing::info!(
        event_id = %event.id,
        service_id = %service.id,
        agreed_price = %row.agreed_price(),
        "service added to event"
    );
    Ok(row)
}

pub async fn remove_service_from_event<C: ConnectionTrait>(
    conn: &C,
    event_id: Uuid,
    service_id: Uuid,
) -> Result<(), RuleError> {
    let row = event_service::Entity::find()
        .filter(event_service::Column::EventId.eq(event_id))
        .filter(event_service::Column::ServiceId.eq(service_id))
        .one(conn)
        .await?
        .ok_or_else(|| RuleError::NotFound("Service is not part of this event".into()))?;

    event_service::Entity::delete_by_id(row.id).exec(conn).await?;

    tracing::info!(%event_id, %service_id, "service removed from event");
    Ok(())
}

pub async fn event_with_services<C: ConnectionTrait>(
    conn: &C,
    event: event::Model,
) -> Result<EventDetail, RuleError> {
    let pairs = event_service::Entity::find()
        .filter(event_service::Column::EventId.eq(event.id))
        .order_by_asc(event_service::Column::AddedAt)
        .order_by_asc(event_service::Column::Id)
        .find_also_related(service::Entity)
        .all(conn)
        .await?;

    // The service FK is RESTRICT, so every row has its service.
    let services: Vec<_> = pairs
        .into_iter()
        .filter_map(|(row, svc)| svc.map(|s| (row, s)))
        .collect();
    let total = sum_agreed_prices(services.iter().map(|(row, _)| row));

    Ok(EventDetail {
        event,
        services,
        total,
    })
}

pub async fn list_events_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<event::Model>, RuleError> {
    Ok(event::Entity::find()
        .filter(event::Column::UserId.eq(user_id))
        .order_by_desc(event::Column::EventDate)
        .all(conn)
        .await?)
}

/// New events always start out pending and belong to the actor.
pub async fn create_event<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    fields: EventFields,
) -> Result<event::Model, RuleError> {
    let now = Utc::now().naive_utc();
    let model = event::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(actor.id),
        title: Set(fields.title),
        description: Set(fields.description),
        event_date: Set(fields.event_date),
        venue: Set(fields.venue),
        guest_count: Set(fields.guest_count),
        budget_cents: Set(fields.budget_cents),
        status: Set(Status::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;

    tracing::info!(event_id = %model.id, user_id = %actor.id, "event created");
    Ok(model)
}

/// Applies an edit. A status change is only honoured for admins.
pub async fn update_event<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    event_id: Uuid,
    fields: EventFields,
    status: Option<Status>,
) -> Result<event::Model, RuleError> {
    let event = find_event_for(conn, actor, event_id).await?;

    let mut active: event::ActiveModel = event.into();
    active.title = Set(fields.title);
    active.description = Set(fields.description);
    active.event_date = Set(fields.event_date);
    active.venue = Set(fields.venue);
    active.guest_count = Set(fields.guest_count);
    active.budget_cents = Set(fields.budget_cents);
    if actor.is_admin()
        && let Some(status) = status
    {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    Ok(active.update(conn).await?)
}

pub async fn cancel_event<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    event_id: Uuid,
) -> Result<event::Model, RuleError> {
    let event = find_event_for(conn, actor, event_id).await?;

    let mut active: event::ActiveModel = event.into();
    active.status = Set(Status::Cancelled);
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = active.update(conn).await?;

    tracing::info!(%event_id, actor = %actor.id, "event cancelled");
    Ok(updated)
}

/// Deletes an event and its service associations.
pub async fn delete_event<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    event_id: Uuid,
) -> Result<(), RuleError> {
    let event = find_event_for(conn, actor, event_id).await?;

    event_service::Entity::delete_many()
        .filter(event_service::Column::EventId.eq(event.id))
        .exec(conn)
        .await?;
    event::Entity::delete_by_id(event.id).exec(conn).await?;

    tracing::info!(%event_id, actor = %actor.id, "event deleted");
    Ok(())
}
