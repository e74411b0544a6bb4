//! Business rules: event/service associations, derived totals, permission
//! checks, and cascading deletes.
//!
//! Functions are generic over [`ConnectionTrait`](sea_orm::ConnectionTrait) so
//! callers can run them on the pool or inside a single request transaction.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

use crate::entity::{app_user::Role, event};
use crate::validation::ValidationError;

pub mod catalog;
pub mod events;
pub mod stats;
pub mod users;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Cannot delete {entity} \"{name}\": it is in use by {count} event(s)")]
    InUse {
        entity: &'static str,
        name: String,
        count: u64,
    },
    #[error("{0}")]
    SelfAction(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

impl RuleError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{entity} not found"))
    }

    /// Maps a unique-constraint violation to [`RuleError::Duplicate`], anything else to `Db`.
    pub(crate) fn from_insert(err: DbErr, duplicate_msg: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate(duplicate_msg.to_owned()),
            _ => Self::Db(err),
        }
    }
}

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub fn ensure_admin(actor: &Actor) -> Result<(), RuleError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(RuleError::Forbidden("Admin access required".into()))
    }
}

/// Owners may modify their own events; admins may modify any event.
pub fn can_modify_event(actor: &Actor, event: &event::Model) -> bool {
    event.user_id == actor.id || actor.is_admin()
}

pub fn ensure_can_modify_event(actor: &Actor, event: &event::Model) -> Result<(), RuleError> {
    if can_modify_event(actor, event) {
        Ok(())
    } else {
        Err(RuleError::Forbidden(
            "You do not have permission to modify this event".into(),
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event_owned_by(owner: Uuid) -> event::Model {
        let now = Utc::now().naive_utc();
        event::Model {
            id: Uuid::now_v7(),
            user_id: owner,
            title: "Boda".into(),
            description: None,
            event_date: now,
            venue: None,
            guest_count: None,
            budget_cents: None,
            status: event::Status::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_can_modify() {
        let owner = Actor::new(Uuid::now_v7(), Role::Client);
        assert!(can_modify_event(&owner, &event_owned_by(owner.id)));
    }

    #[test]
    fn admin_can_modify_any_event() {
        let admin = Actor::new(Uuid::now_v7(), Role::Admin);
        assert!(can_modify_event(&admin, &event_owned_by(Uuid::now_v7())));
    }

    #[test]
    fn other_client_cannot_modify() {
        let stranger = Actor::new(Uuid::now_v7(), Role::Client);
        let event = event_owned_by(Uuid::now_v7());
        assert!(!can_modify_event(&stranger, &event));
        assert!(matches!(
            ensure_can_modify_event(&stranger, &event),
            Err(RuleError::Forbidden(_))
        ));
    }

    #[test]
    fn client_rejected_from_admin_action() {
        let client = Actor::new(Uuid::now_v7(), Role::Client);
        assert!(matches!(ensure_admin(&client), Err(RuleError::Forbidden(_))));
        assert!(ensure_admin(&Actor::new(Uuid::now_v7(), Role::Admin)).is_ok());
    }
}
