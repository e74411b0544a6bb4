use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::forms::{AddServiceForm, EventForm};
use crate::rules::{catalog, events};

use super::{
    ApiErr, ApiState,
    dto::{EventDetailResponse, EventResponse, ServiceResponse},
    jwt::AuthClaims,
};

/// Catalog of services a client can book.
pub async fn list_catalog(
    AuthClaims(_): AuthClaims,
    State(state): State<ApiState>,
) -> Result<Json<Vec<ServiceResponse>>, ApiErr> {
    let services = catalog::list_available_services(&state.db).await?;
    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

pub async fn list_my_events(
    AuthClaims(claims): AuthClaims,
    State(state): State<ApiState>,
) -> Result<Json<Vec<EventResponse>>, ApiErr> {
    let events = events::list_events_for_user(&state.db, claims.sub).await?;
    Ok(Json(events.into_iter().map(EventResponse::from).collect()))
}

pub async fn create_event(
    AuthClaims(claims): AuthClaims,
    State(state): State<ApiState>,
    Json(body): Json<EventForm>,
) -> Result<(StatusCode, Json<EventResponse>), ApiErr> {
    let fields = body.validate()?;
    let event = events::create_event(&state.db, &claims.actor(), fields).await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

pub async fn get_event(
    AuthClaims(claims): AuthClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventDetailResponse>, ApiErr> {
    let event = events::find_event_for(&state.db, &claims.actor(), id).await?;
    let detail = events::event_with_services(&state.db, event).await?;
    Ok(Json(EventDetailResponse::from(detail)))
}

pub async fn update_event(
    AuthClaims(claims): AuthClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<EventForm>,
) -> Result<Json<EventResponse>, ApiErr> {
    let fields = body.validate()?;
    let event = events::update_event(&state.db, &claims.actor(), id, fields, body.status).await?;
    Ok(Json(EventResponse::from(event)))
}

pub async fn cancel_event(
    AuthClaims(claims): AuthClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, ApiErr> {
    let event = events::cancel_event(&state.db, &claims.actor(), id).await?;
    Ok(Json(EventResponse::from(event)))
}

pub async fn delete_event(
    AuthClaims(claims): AuthClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    events::delete_event(&txn, &claims.actor(), id).await?;
    txn.commit().await.map_err(ApiErr::internal)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Books a catalog service for the event and returns the refreshed detail.
pub async fn add_service(
    AuthClaims(claims): AuthClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddServiceForm>,
) -> Result<(StatusCode, Json<EventDetailResponse>), ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    let event = events::find_event_for(&txn, &claims.actor(), id).await?;
    events::add_service_to_event(&txn, event.id, body.service_id, body.agreed_price, body.notes)
        .await?;
    let detail = events::event_with_services(&txn, event).await?;
    txn.commit().await.map_err(ApiErr::internal)?;

    Ok((StatusCode::CREATED, Json(EventDetailResponse::from(detail))))
}

pub async fn remove_service(
    AuthClaims(claims): AuthClaims,
    State(state): State<ApiState>,
    Path((id, service_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<EventDetailResponse>, ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    let event = events::find_event_for(&txn, &claims.actor(), id).await?;
    events::remove_service_from_event(&txn, event.id, service_id).await?;
    let detail = events::event_with_services(&txn, event).await?;
    txn.commit().await.map_err(ApiErr::internal)?;

    Ok(Json(EventDetailResponse::from(detail)))
}
