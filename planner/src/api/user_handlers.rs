use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait};
use uuid::Uuid;

use crate::entity::app_user;
use crate::rules::users;

use super::{
    ApiErr, ApiState,
    dto::{ListQuery, PaginatedResponse, UserResponse},
    jwt::AdminClaims,
};

pub async fn list_users(
    AdminClaims(_): AdminClaims,
    State(state): State<ApiState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<PaginatedResponse<UserResponse>>, ApiErr> {
    let (page, page_size) = params.page_and_size();

    let mut query = app_user::Entity::find();
    if let Some(search) = params.search_term() {
        query = query.filter(app_user::Column::Username.contains(search));
    }

    let paginator = query
        .order_by_desc(app_user::Column::RegisteredAt)
        .paginate(&state.db, page_size);

    let total = paginator.num_items().await.map_err(ApiErr::internal)?;
    let users = paginator
        .fetch_page(page - 1)
        .await
        .map_err(ApiErr::internal)?;

    Ok(Json(PaginatedResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
        total,
        page,
        page_size,
    }))
}

pub async fn toggle_active(
    AdminClaims(claims): AdminClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiErr> {
    let user = users::toggle_user_active(&state.db, &claims.actor(), id).await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user(
    AdminClaims(claims): AdminClaims,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    users::delete_user(&txn, &claims.actor(), id).await?;
    txn.commit().await.map_err(ApiErr::internal)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{admin_token, client_token, make_state, send};
    use crate::entity::{app_user::Role, event};
    use crate::rules::test_support::{insert_event, insert_user, setup_db};
    use axum::{Router, http::Method};

    fn make_router(state: ApiState) -> Router {
        Router::new()
            .route("/users", axum::routing::get(list_users))
            .route("/users/{id}", axum::routing::delete(delete_user))
            .route("/users/{id}/toggle-active", axum::routing::post(toggle_active))
            .with_state(state)
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let app = make_router(make_state(setup_db().await));
        let (status, _) = send(&app, Method::GET, "/users", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn client_token_is_forbidden() {
        let db = setup_db().await;
        let user = insert_user(&db, "ana", Role::Client).await;
        let app = make_router(make_state(db));
        let (status, _) = send(&app, Method::GET, "/users", Some(&client_token(user.id)), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn role_comes_from_stored_account() {
        let db = setup_db().await;
        let user = insert_user(&db, "ana", Role::Client).await;
        let app = make_router(make_state(db));
        // Token claims admin, the account row says client.
        let (status, _) = send(&app, Method::GET, "/users", Some(&admin_token(user.id)), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn token_of_unknown_account_is_unauthorized() {
        let app = make_router(make_state(setup_db().await));
        let (status, _) =
            send(&app, Method::GET, "/users", Some(&admin_token(Uuid::now_v7())), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn list_users_paginates_and_searches() {
        let db = setup_db().await;
        let admin = insert_user(&db, "root", Role::Admin).await;
        for name in ["ana", "anabel", "luis"] {
            insert_user(&db, name, Role::Client).await;
        }
        let app = make_router(make_state(db));
        let token = admin_token(admin.id);

        let (status, json) = send(&app, Method::GET, "/users?page_size=2", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 4);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);

        let (_, json) = send(&app, Method::GET, "/users?search=ana", Some(&token), None).await;
        assert_eq!(json["total"], 2);
        assert!(json["data"][0].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn toggle_self_conflicts() {
        let db = setup_db().await;
        let admin = insert_user(&db, "root", Role::Admin).await;
        let app = make_router(make_state(db));

        let uri = format!("/users/{}/toggle-active", admin.id);
        let (status, json) = send(&app, Method::POST, &uri, Some(&admin_token(admin.id)), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"], "You cannot deactivate your own account");
    }

    #[tokio::test]
    async fn toggle_flips_active_flag() {
        let db = setup_db().await;
        let admin = insert_user(&db, "root", Role::Admin).await;
        let user = insert_user(&db, "ana", Role::Client).await;
        let app = make_router(make_state(db));

        let uri = format!("/users/{}/toggle-active", user.id);
        let (_, json) = send(&app, Method::POST, &uri, Some(&admin_token(admin.id)), None).await;
        assert_eq!(json["is_active"], false);
        let (_, json) = send(&app, Method::POST, &uri, Some(&admin_token(admin.id)), None).await;
        assert_eq!(json["is_active"], true);
    }

    #[tokio::test]
    async fn delete_user_removes_their_events() {
        let db = setup_db().await;
        let admin = insert_user(&db, "root", Role::Admin).await;
        let user = insert_user(&db, "ana", Role::Client).await;
        insert_event(&db, user.id, 0).await;
        let app = make_router(make_state(db.clone()));

        let uri = format!("/users/{}", user.id);
        let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin_token(admin.id)), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(event::Entity::find().count(&db).await.unwrap(), 0);

        let self_uri = format!("/users/{}", admin.id);
        let (status, _) =
            send(&app, Method::DELETE, &self_uri, Some(&admin_token(admin.id)), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
