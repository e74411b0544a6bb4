pub mod app_user;
pub mod client;
pub mod event;
pub mod event_service;
pub mod service;
pub mod vendor;
