use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::auth::Auth;
use crate::entity::{
    app_user::{self, Role},
    event, event_service,
};
use crate::forms::RegistrationForm;

use super::{Actor, RuleError, ensure_admin};

pub async fn find_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<app_user::Model, RuleError> {
    app_user::Entity::find_by_id(user_id)
        .one(conn)
        .await?
        .ok_or_else(|| RuleError::not_found("User"))
}

/// Self-service sign-up. New accounts are always clients.
pub async fn register_user<C: ConnectionTrait>(
    conn: &C,
    form: &RegistrationForm,
) -> Result<app_user::Model, RuleError> {
    let reg = form.validate()?;

    let taken = app_user::Entity::find()
        .filter(app_user::Column::Username.eq(reg.username.as_str()))
        .count(conn)
        .await?;
    if taken > 0 {
        return Err(RuleError::Duplicate(
            "Username is already taken. Please choose another.".into(),
        ));
    }
    let taken = app_user::Entity::find()
        .filter(app_user::Column::Email.eq(reg.email.as_str()))
        .count(conn)
        .await?;
    if taken > 0 {
        return Err(RuleError::Duplicate("Email is already registered.".into()));
    }

    let password_hash =
        Auth::hash_password(&form.password).map_err(|e| RuleError::Internal(e.to_string()))?;

    let now = Utc::now().naive_utc();
    let user = app_user::ActiveModel {
        id: Set(Uuid::now_v7()),
        username: Set(reg.username),
        email: Set(reg.email),
        password_hash: Set(password_hash),
        role: Set(Role::Client),
        full_name: Set(Some(reg.full_name)),
        phone: Set(reg.phone),
        is_active: Set(true),
        last_login_at: Set(None),
        registered_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| RuleError::from_insert(e, "Username or email already registered"))?;

    tracing::info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Flips a user's active flag. Admins cannot deactivate themselves.
pub async fn toggle_user_active<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    target_id: Uuid,
) -> Result<app_user::Model, RuleError> {
    ensure_admin(actor)?;
    if actor.id == target_id {
        return Err(RuleError::SelfAction(
            "You cannot deactivate your own account".into(),
        ));
    }

    let user = find_user(conn, target_id).await?;
    let now_active = !user.is_active;

    let mut active: app_user::ActiveModel = user.into();
    active.is_active = Set(now_active);
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = active.update(conn).await?;

    tracing::info!(user_id = %target_id, is_active = now_active, actor = %actor.id, "user toggled");
    Ok(updated)
}

/// Deletes a user together with their events and the events' service rows.
pub async fn delete_user<C: ConnectionTrait>(
    conn: &C,
    actor: &Actor,
    target_id: Uuid,
) -> Result<(), RuleError> {
    ensure_admin(actor)?;
    if actor.id == target_id {
        return Err(RuleError::SelfAction("You cannot delete your own account".into()));
    }
    let user = find_user(conn, target_id).await?;

    let event_ids: Vec<Uuid> = event::Entity::find()
        .filter(event::Column::UserId.eq(user.id))
        .all(conn)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();

    if !event_ids.is_empty() {
        event_service::Entity::delete_many()
            .filter(event_service::Column::EventId.is_in(event_ids.clone()))
            .exec(conn)
            .await?;
        event::Entity::delete_many()
            .filter(event::Column::UserId.eq(user.id))
            .exec(conn)
            .await?;
    }
    app_user::Entity::delete_by_id(user.id).exec(conn).await?;

    tracing::info!(user_id = %target_id, events = event_ids.len(), actor = %actor.id, "user deleted");
    Ok(())
}
