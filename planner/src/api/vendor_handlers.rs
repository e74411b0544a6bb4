use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::vendor;
use crate::forms::VendorForm;

use super::{
    ApiErr, ApiState,
    dto::{ListQuery, PaginatedResponse, VendorResponse},
    jwt::AdminClaims,
};

async fn find_vendor(state: &ApiState, id: Uuid) -> Result<vendor::Model, ApiErr> {
    vendor::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(ApiErr::internal)?
        .ok_or_else(|| ApiErr::not_found("Vendor not found"))
}

pub async fn list_vendors(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<PaginatedResponse<VendorResponse>>, ApiErr> {
    let (page, page_size) = params.page_and_size();

    let mut query = vendor::Entity::find();
    if let Some(search) = params.search_term() {
        query = query.filter(vendor::Column::Name.contains(search));
    }

    let paginator = query
        .order_by_asc(vendor::Column::Name)
        .paginate(&state.db, page_size);

    let total = paginator.num_items().await.map_err(ApiErr::internal)?;
    let vendors = paginator
        .fetch_page(page - 1)
        .await
        .map_err(ApiErr::internal)?;

    Ok(Json(PaginatedResponse {
        data: vendors.into_iter().map(VendorResponse::from).collect(),
        total,
        page,
        page_size,
    }))
}

pub async fn create_vendor(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Json(body): Json<VendorForm>,
) -> Result<(StatusCode, Json<VendorResponse>), ApiErr> {
    let fields = body.validate()?;

    let model = vendor::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(fields.name),
        service_type: Set(fields.service_type),
        contact_name: Set(fields.contact_name),
        phone: Set(fields.phone),
        email: Set(fields.email),
        rating_hundredths: Set(fields.rating_hundredths),
        notes: Set(fields.notes),
        is_active: Set(fields.is_active),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&state.db)
    .await
    .map_err(ApiErr::internal)?;

    tracing::info!(vendor_id = %model.id, "vendor created");
    Ok((StatusCode::CREATED, Json(VendorResponse::from(model))))
}

pub async fn get_vendor(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VendorResponse>, ApiErr> {
    Ok(Json(VendorResponse::from(find_vendor(&state, id).await?)))
}

pub async fn update_vendor(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<VendorForm>,
) -> Result<Json<VendorResponse>, ApiErr> {
    let fields = body.validate()?;
    let vendor = find_vendor(&state, id).await?;

    let mut active: vendor::ActiveModel = vendor.into();
    active.name = Set(fields.name);
    active.service_type = Set(fields.service_type);
    active.contact_name = Set(fields.contact_name);
    active.phone = Set(fields.phone);
    active.email = Set(fields.email);
    active.rating_hundredths = Set(fields.rating_hundredths);
    active.notes = Set(fields.notes);
    active.is_active = Set(fields.is_active);

    let updated = active.update(&state.db).await.map_err(ApiErr::internal)?;
    Ok(Json(VendorResponse::from(updated)))
}

pub async fn delete_vendor(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiErr> {
    let result = vendor::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(ApiErr::internal)?;

    if result.rows_affected == 0 {
        return Err(ApiErr::not_found("Vendor not found"));
    }

    tracing::info!(vendor_id = %id, "vendor deleted");
    Ok(StatusCode::NO_CONTENT)
}
