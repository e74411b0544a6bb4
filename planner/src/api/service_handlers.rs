use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entity::service;
use crate::forms::ServiceForm;
use crate::rules::{catalog, events::find_service};

use super::{
    ApiErr, ApiState,
    dto::{ListQuery, PaginatedResponse, ServiceResponse},
    jwt::AdminClaims,
};

pub async fn list_services(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<PaginatedResponse<ServiceResponse>>, ApiErr> {
    let (page, page_size) = params.page_and_size();

    let mut query = service::Entity::find();
    if let Some(search) = params.search_term() {
        query = query.filter(service::Column::Name.contains(search));
    }

    let paginator = query
        .order_by_asc(service::Column::Name)
        .paginate(&state.db, page_size);

    let total = paginator.num_items().await.map_err(ApiErr::internal)?;
    let services = paginator
        .fetch_page(page - 1)
        .await
        .map_err(ApiErr::internal)?;

    Ok(Json(PaginatedResponse {
        data: services.into_iter().map(ServiceResponse::from).collect(),
        total,
        page,
        page_size,
    }))
}

pub async fn create_service(
    AdminClaims(claims): AdminClaims,
    State(state): State<ApiState>,
    Json(body): Json<ServiceForm>,
) -> Result<(StatusCode, Json<ServiceResponse>), ApiErr> {
    let fields = body.validate()?;

    let model = service::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(fields.name),
        description: Set(fields.description),
        base_price_cents: Set(fields.base_price_cents),
        category: Set(fields.category),
        is_available: Set(fields.is_available),
        image_url: Set(fields.image_url),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&state.db)
    .await
    .map_err(ApiErr::internal)?;

    tracing::info!(service_id = %model.id, actor = %claims.sub, "service created");
    Ok((StatusCode::CREATED, Json(ServiceResponse::from(model))))
}

pub async fn get_service(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, ApiErr> {
    let service = find_service(&state.db, id).await?;
    Ok(Json(ServiceResponse::from(service)))
}

pub async fn update_service(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ServiceForm>,
) -> Result<Json<ServiceResponse>, ApiErr> {
    let fields = body.validate()?;
    let service = find_service(&state.db, id).await?;

    let mut active: service::ActiveModel = service.into();
    active.name = Set(fields.name);
    active.description = Set(fields.description);
    active.base_price_cents = Set(fields.base_price_cents);
    active.category = Set(fields.category);
    active.image_url = Set(fields.image_url);
    active.is_available = Set(fields.is_available);

    let updated = active.update(&state.db).await.map_err(ApiErr::internal)?;
    Ok(Json(ServiceResponse::from(updated)))
}

/// Refuses with 409 while any event still books the service.
pub async fn delete_service(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    catalog::delete_service(&txn, id).await?;
    txn.commit().await.map_err(ApiErr::internal)?;
    Ok(StatusCode::NO_CONTENT)
}
