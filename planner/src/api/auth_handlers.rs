use axum::{extract::State, http::StatusCode, response::Json};

use crate::auth::AuthError;
use crate::forms::{LoginForm, RegistrationForm};
use crate::rules::users;

use super::{
    ApiErr, ApiState,
    dto::{LoginResponse, UserResponse},
    jwt::{AuthClaims, Claims, encode_jwt},
};

pub async fn register(
    State(state): State<ApiState>,
    Json(body): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<UserResponse>), ApiErr> {
    let user = users::register_user(&state.db, &body).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn login(
    State(state): State<ApiState>,
    Json(body): Json<LoginForm>,
) -> Result<Json<LoginResponse>, ApiErr> {
    body.validate()?;

    let user = state
        .auth
        .authenticate(body.username.trim(), &body.password)
        .await
        .map_err(|e| match e {
            AuthError::NotFound | AuthError::InvalidPassword => {
                tracing::info!(username = %body.username, "login failed");
                ApiErr::new(StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
            AuthError::Inactive => ApiErr::new(
                StatusCode::FORBIDDEN,
                "Your account has been deactivated. Contact the administrator.",
            ),
            other => ApiErr::internal(other),
        })?;

    let claims = Claims::for_user(&user, state.session_hours);
    let token = encode_jwt(&claims, &state.jwt_secret).map_err(ApiErr::internal)?;

    tracing::info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

pub async fn me(
    AuthClaims(claims): AuthClaims,
    State(state): State<ApiState>,
) -> Result<Json<UserResponse>, ApiErr> {
    let user = users::find_user(&state.db, claims.sub).await?;
    Ok(Json(UserResponse::from(user)))
}
