use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entity::event;
use crate::rules::{events, stats};

use super::{
    ApiErr, ApiState,
    dto::{DashboardResponse, EventDetailResponse, EventResponse, ListQuery, PaginatedResponse},
    jwt::AdminClaims,
};

pub async fn dashboard(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
) -> Result<Json<DashboardResponse>, ApiErr> {
    let stats = stats::dashboard_stats(&state.db).await?;
    Ok(Json(DashboardResponse::from(stats)))
}

/// All events, newest event date first. `search` matches the title.
pub async fn list_events(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<PaginatedResponse<EventResponse>>, ApiErr> {
    let (page, page_size) = params.page_and_size();

    let mut query = event::Entity::find();
    if let Some(search) = params.search_term() {
        query = query.filter(event::Column::Title.contains(search));
    }

    let paginator = query
        .order_by_desc(event::Column::EventDate)
        .order_by_desc(event::Column::Id)
        .paginate(&state.db, page_size);

    let total = paginator.num_items().await.map_err(ApiErr::internal)?;
    let events = paginator
        .fetch_page(page - 1)
        .await
        .map_err(ApiErr::internal)?;

    Ok(Json(PaginatedResponse {
        data: events.into_iter().map(EventResponse::from).collect(),
        total,
        page,
        page_size,
    }))
}

pub async fn get_event(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventDetailResponse>, ApiErr> {
    let event = events::find_event(&state.db, id).await?;
    let detail = events::event_with_services(&state.db, event).await?;
    Ok(Json(EventDetailResponse::from(detail)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{admin_token, make_state, send};
    use crate::entity::app_user::Role;
    use crate::rules::test_support::{insert_event, insert_user, setup_db};
    use axum::{
        Router,
        http::{Method, StatusCode},
    };

    #[tokio::test]
    async fn dashboard_counts() {
        let db = setup_db().await;
        let admin = insert_user(&db, "root", Role::Admin).await;
        let user = insert_user(&db, "ana", Role::Client).await;
        insert_event(&db, user.id, 0).await;
        let app = Router::new()
            .route("/dashboard", axum::routing::get(dashboard))
            .route("/events/{id}", axum::routing::get(get_event))
            .with_state(make_state(db));

        let (status, json) =
            send(&app, Method::GET, "/dashboard", Some(&admin_token(admin.id)), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_users"], 2);
        assert_eq!(json["total_events"], 1);
        assert_eq!(json["pending_events"], 1);
        assert_eq!(json["recent_events"].as_array().unwrap().len(), 1);

        let uri = format!("/events/{}", Uuid::now_v7());
        let (status, json) = send(&app, Method::GET, &uri, Some(&admin_token(admin.id)), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Event not found");
    }
}
