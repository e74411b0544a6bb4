//! Wedding Planner - event booking backend
//!
//! Clients plan events and book catalog services at agreed prices; admins
//! curate the catalog, vendors and users. Exposed as a JSON API (see [`api`]).

pub mod api;
pub mod auth;
pub mod config;
pub mod entity;
pub mod forms;
pub mod money;
pub mod rules;
pub mod validation;
