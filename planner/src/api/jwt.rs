use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::app_user::{self, Role};
use crate::rules::Actor;

use super::ApiState;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id (UUID, stored as string in JWT)
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    /// Unix timestamp expiry
    pub exp: u64,
}

impl Claims {
    /// Session claims for `user`, valid for `hours`.
    pub fn for_user(user: &app_user::Model, hours: u64) -> Self {
        Self {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            exp: (Utc::now().timestamp() as u64).saturating_add(hours.saturating_mul(3600)),
        }
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.sub, self.role)
    }
}

pub fn encode_jwt(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

fn extract_bearer(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

fn claims_from_parts(parts: &Parts, secret: &str) -> Result<Claims, (StatusCode, &'static str)> {
    let token = extract_bearer(parts).ok_or((
        StatusCode::UNAUTHORIZED,
        "Missing or invalid Authorization header",
    ))?;

    decode_jwt(token, secret).map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid or expired token"))
}

/// Decodes the token and reloads its account. Deleted or deactivated accounts
/// are rejected, and role and username come from the stored row.
async fn session_claims(
    parts: &Parts,
    state: &ApiState,
) -> Result<Claims, (StatusCode, &'static str)> {
    let mut claims = claims_from_parts(parts, &state.jwt_secret)?;

    let user = app_user::Entity::find_by_id(claims.sub)
        .one(&state.db)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "session lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        })?
        .ok_or((StatusCode::UNAUTHORIZED, "Session is no longer valid"))?;

    if !user.is_active {
        return Err((StatusCode::UNAUTHORIZED, "Account is deactivated"));
    }

    claims.role = user.role;
    claims.username = user.username;
    Ok(claims)
}

/// Extractor: validates Bearer token, requires the admin role.
pub struct AdminClaims(pub Claims);

impl<S> FromRequestParts<S> for AdminClaims
where
    S: Send + Sync,
    ApiState: FromRef<S>,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = ApiState::from_ref(state);
        let claims = session_claims(parts, &state).await?;

        if claims.role != Role::Admin {
            return Err((StatusCode::FORBIDDEN, "Admin access required"));
        }

        Ok(AdminClaims(claims))
    }
}

/// Extractor: validates Bearer token (any active user).
pub struct AuthClaims(pub Claims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
    ApiState: FromRef<S>,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = ApiState::from_ref(state);
        let claims = session_claims(parts, &state).await?;
        Ok(AuthClaims(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-jwt-secret-key-32-chars-pad";

    fn claims(role: Role, exp: u64) -> Claims {
        Claims {
            sub: Uuid::now_v7(),
            username: "ana".into(),
            role,
            exp,
        }
    }

    #[test]
    fn round_trip_keeps_role() {
        let exp = (Utc::now().timestamp() as u64) + 3600;
        let token = encode_jwt(&claims(Role::Client, exp), SECRET).unwrap();
        let decoded = decode_jwt(&token, SECRET).unwrap();
        assert_eq!(decoded.role, Role::Client);
        assert_eq!(decoded.actor().role, Role::Client);
    }

    #[test]
    fn session_length_saturates() {
        let now = Utc::now().naive_utc();
        let user = app_user::Model {
            id: Uuid::now_v7(),
            username: "ana".into(),
            email: "ana@example.com".into(),
            password_hash: String::new(),
            role: Role::Client,
            full_name: None,
            phone: None,
            is_active: true,
            last_login_at: None,
            registered_at: now,
            updated_at: now,
        };
        assert_eq!(Claims::for_user(&user, u64::MAX).exp, u64::MAX);
    }

    #[test]
    fn expired_token_rejected() {
        let token = encode_jwt(&claims(Role::Admin, 1_000), SECRET).unwrap();
        assert!(decode_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_secret_rejected() {
        let exp = (Utc::now().timestamp() as u64) + 3600;
        let token = encode_jwt(&claims(Role::Admin, exp), SECRET).unwrap();
        assert!(decode_jwt(&token, "another-secret").is_err());
    }
}
