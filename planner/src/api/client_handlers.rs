use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use uuid::Uuid;

use crate::entity::client;
use crate::forms::ClientForm;

use super::{
    ApiErr, ApiState,
    dto::{ClientResponse, ListQuery, PaginatedResponse},
    jwt::AdminClaims,
};

pub async fn list_clients(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<PaginatedResponse<ClientResponse>>, ApiErr> {
    let (page, page_size) = params.page_and_size();

    let mut query = client::Entity::find();
    if let Some(search) = params.search_term() {
        query = query.filter(client::Column::Name.contains(search));
    }

    let paginator = query
        .order_by_desc(client::Column::CreatedAt)
        .paginate(&state.db, page_size);

    let total = paginator.num_items().await.map_err(ApiErr::internal)?;
    let clients = paginator
        .fetch_page(page - 1)
        .await
        .map_err(ApiErr::internal)?;

    Ok(Json(PaginatedResponse {
        data: clients.into_iter().map(ClientResponse::from).collect(),
        total,
        page,
        page_size,
    }))
}

pub async fn create_client(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Json(body): Json<ClientForm>,
) -> Result<(StatusCode, Json<ClientResponse>), ApiErr> {
    let fields = body.validate()?;

    let model = client::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(fields.name),
        email: Set(fields.email),
        phone: Set(fields.phone),
        address: Set(fields.address),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&state.db)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ApiErr::conflict("A client with this email already exists")
        }
        _ => ApiErr::internal(e),
    })?;

    Ok((StatusCode::CREATED, Json(ClientResponse::from(model))))
}
