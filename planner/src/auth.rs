use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use password_hash::SaltString;
use rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use thiserror::Error;
use uuid::Uuid;

use crate::entity::app_user::{self, Role};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found")]
    NotFound,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("User is inactive")]
    Inactive,
    #[error("Database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("Hash error: {0}")]
    Hash(String),
}

/// Parameters for creating an account outside self-service registration
/// (CLI and first-run seeding).
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: Option<&'a str>,
    pub role: Role,
}

pub struct Auth {
    db: DatabaseConnection,
}

impl Auth {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Verify username/password and stamp `last_login_at` on success.
    ///
    /// Deactivated accounts are reported as [`AuthError::Inactive`] only after
    /// the password checks out, so the distinction never leaks to a guesser.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<app_user::Model, AuthError> {
        let user = app_user::Entity::find()
            .filter(app_user::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or(AuthError::NotFound)?;

        let hash =
            PasswordHash::new(&user.password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .map_err(|_| AuthError::InvalidPassword)?;

        if !user.is_active {
            return Err(AuthError::Inactive);
        }

        let mut active: app_user::ActiveModel = user.into();
        active.last_login_at = Set(Some(Utc::now().naive_utc()));
        let user = active.update(&self.db).await?;

        Ok(user)
    }

    /// Create an account with an Argon2-hashed password.
    pub async fn create_user(&self, new: NewUser<'_>) -> Result<app_user::Model, AuthError> {
        let password_hash = Self::hash_password(new.password)?;
        let now = Utc::now().naive_utc();
        let user = app_user::ActiveModel {
            id: Set(Uuid::now_v7()),
            username: Set(new.username.to_owned()),
            email: Set(new.email.to_owned()),
            password_hash: Set(password_hash),
            role: Set(new.role),
            full_name: Set(new.full_name.map(str::to_owned)),
            phone: Set(None),
            is_active: Set(true),
            last_login_at: Set(None),
            registered_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;
        Ok(user)
    }

    pub async fn count_users(&self) -> Result<u64, AuthError> {
        Ok(app_user::Entity::find().count(&self.db).await?)
    }

    /// Hash a plaintext password with Argon2id + a random salt.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }
}
