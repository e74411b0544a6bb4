use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::set_header::response::SetResponseHeaderLayer;

use crate::auth::Auth;
use crate::rules::RuleError;

pub mod admin_handlers;
pub mod auth_handlers;
pub mod client_handlers;
pub mod dto;
pub mod event_handlers;
pub mod jwt;
pub mod service_handlers;
pub mod user_handlers;
pub mod vendor_handlers;

// ---------- shared state ----------

#[derive(Clone)]
pub struct ApiState {
    pub auth: Arc<Auth>,
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub session_hours: u64,
}

// ---------- error type ----------

/// A JSON error response: `{"error": "..."}` with an HTTP status.
#[derive(Debug)]
pub struct ApiErr(StatusCode, String);

impl ApiErr {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self(status, msg.into())
    }

    pub fn internal(e: impl std::fmt::Display) -> Self {
        tracing::error!(error = %e, "internal error");
        Self(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(StatusCode::NOT_FOUND, msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self(StatusCode::CONFLICT, msg.into())
    }
}

impl From<RuleError> for ApiErr {
    fn from(e: RuleError) -> Self {
        let status = match &e {
            RuleError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RuleError::Duplicate(_) | RuleError::InUse { .. } | RuleError::SelfAction(_) => {
                StatusCode::CONFLICT
            }
            RuleError::Forbidden(_) => StatusCode::FORBIDDEN,
            RuleError::NotFound(_) => StatusCode::NOT_FOUND,
            RuleError::Internal(_) | RuleError::Db(_) => return ApiErr::internal(e),
        };
        Self(status, e.to_string())
    }
}

impl From<crate::validation::ValidationError> for ApiErr {
    fn from(e: crate::validation::ValidationError) -> Self {
        Self(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.1 });
        (self.0, Json(body)).into_response()
    }
}

// ---------- router ----------

pub fn api_router(state: ApiState, cors_allowed_origins: &[String]) -> Router {
    let allowed_origins: Vec<HeaderValue> = cors_allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let cors = if allowed_origins.is_empty() {
        CorsLayer::new() // no origins allowed = same-origin only
    } else {
        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
    };

    Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .route("/health/db", get(db_health))
        .nest("/api/v1", api_v1())
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(NormalizePathLayer::trim_trailing_slash())
        .with_state(state)
}

async fn db_health(State(state): State<ApiState>) -> Response {
    match state.db.ping().await {
        Ok(()) => Json(serde_json::json!({ "status": "ok" })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "error", "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

fn api_v1() -> Router<ApiState> {
    Router::new()
        // auth
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login))
        .route("/auth/me", get(auth_handlers::me))
        // client: catalog + own events
        .route("/services", get(event_handlers::list_catalog))
        .route(
            "/events",
            get(event_handlers::list_my_events).post(event_handlers::create_event),
        )
        .route(
            "/events/{id}",
            get(event_handlers::get_event)
                .put(event_handlers::update_event)
                .delete(event_handlers::delete_event),
        )
        .route("/events/{id}/cancel", post(event_handlers::cancel_event))
        .route("/events/{id}/services", post(event_handlers::add_service))
        .route(
            "/events/{id}/services/{service_id}",
            delete(event_handlers::remove_service),
        )
        // admin
        .route("/admin/dashboard", get(admin_handlers::dashboard))
        .route("/admin/events", get(admin_handlers::list_events))
        .route("/admin/events/{id}", get(admin_handlers::get_event))
        .route(
            "/admin/services",
            get(service_handlers::list_services).post(service_handlers::create_service),
        )
        .route(
            "/admin/services/{id}",
            get(service_handlers::get_service)
                .put(service_handlers::update_service)
                .delete(service_handlers::delete_service),
        )
        .route("/admin/users", get(user_handlers::list_users))
        .route("/admin/users/{id}", delete(user_handlers::delete_user))
        .route(
            "/admin/users/{id}/toggle-active",
            post(user_handlers::toggle_active),
        )
        .route(
            "/admin/vendors",
            get(vendor_handlers::list_vendors).post(vendor_handlers::create_vendor),
        )
        .route(
            "/admin/vendors/{id}",
            get(vendor_handlers::get_vendor)
                .put(vendor_handlers::update_vendor)
                .delete(vendor_handlers::delete_vendor),
        )
        .route(
            "/admin/clients",
            get(client_handlers::list_clients).post(client_handlers::create_client),
        )
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::{ApiState, jwt};
    use crate::auth::Auth;
    use crate::entity::app_user::Role;

    pub const JWT_SECRET: &str = "test-jwt-secret-key-32-chars-pad";

    pub fn make_state(db: DatabaseConnection) -> ApiState {
        ApiState {
            auth: Arc::new(Auth::new(db.clone())),
            db,
            jwt_secret: JWT_SECRET.to_string(),
            session_hours: 1,
        }
    }

    fn token(id: Uuid, role: Role) -> String {
        let claims = jwt::Claims {
            sub: id,
            username: "someone".to_string(),
            role,
            exp: (chrono::Utc::now().timestamp() as u64) + 3600,
        };
        jwt::encode_jwt(&claims, JWT_SECRET).unwrap()
    }

    pub fn admin_token(id: Uuid) -> String {
        token(id, Role::Admin)
    }

    pub fn client_token(id: Uuid) -> String {
        token(id, Role::Client)
    }

    /// Sends one request through `app`; the body is decoded as JSON (`Null` when empty).
    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = match body {
            Some(json) => req
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }
}
