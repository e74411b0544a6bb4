use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{
    app_user::{self, Role},
    client,
    event::{self, Status},
    event_service,
    service::{self, Category},
    vendor,
};
use crate::rules::{events::EventDetail, stats::DashboardStats};

// ---------- shared ----------

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
}

impl ListQuery {
    /// 1-based page and a page size capped at 100.
    pub fn page_and_size(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self.page_size.unwrap_or(20).clamp(1, 100);
        (page, page_size)
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

// ---------- users ----------

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<NaiveDateTime>,
    pub registered_at: NaiveDateTime,
}

impl From<app_user::Model> for UserResponse {
    fn from(m: app_user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            role: m.role,
            full_name: m.full_name,
            phone: m.phone,
            is_active: m.is_active,
            last_login_at: m.last_login_at,
            registered_at: m.registered_at,
        }
    }
}

// ---------- events ----------

#[derive(Debug, Serialize, Clone)]
pub struct EventResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDateTime,
    pub venue: Option<String>,
    pub guest_count: Option<i32>,
    pub estimated_budget: Option<Decimal>,
    pub status: Status,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<event::Model> for EventResponse {
    fn from(m: event::Model) -> Self {
        Self {
            estimated_budget: m.budget(),
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            description: m.description,
            event_date: m.event_date,
            venue: m.venue,
            guest_count: m.guest_count,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventServiceResponse {
    pub service_id: Uuid,
    pub name: String,
    pub category: Category,
    pub base_price: Decimal,
    pub agreed_price: Decimal,
    pub notes: Option<String>,
    pub added_at: NaiveDateTime,
}

impl From<(event_service::Model, service::Model)> for EventServiceResponse {
    fn from((row, svc): (event_service::Model, service::Model)) -> Self {
        Self {
            service_id: svc.id,
            base_price: svc.base_price(),
            agreed_price: row.agreed_price(),
            name: svc.name,
            category: svc.category,
            notes: row.notes,
            added_at: row.added_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    pub services: Vec<EventServiceResponse>,
    pub total: Decimal,
}

impl From<EventDetail> for EventDetailResponse {
    fn from(d: EventDetail) -> Self {
        Self {
            event: d.event.into(),
            services: d.services.into_iter().map(EventServiceResponse::from).collect(),
            total: d.total,
        }
    }
}

// ---------- catalog ----------

#[derive(Debug, Serialize, Clone)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub category: Category,
    pub is_available: bool,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<service::Model> for ServiceResponse {
    fn from(m: service::Model) -> Self {
        Self {
            base_price: m.base_price(),
            id: m.id,
            name: m.name,
            description: m.description,
            category: m.category,
            is_available: m.is_available,
            image_url: m.image_url,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct VendorResponse {
    pub id: Uuid,
    pub name: String,
    pub service_type: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub rating: Option<Decimal>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<vendor::Model> for VendorResponse {
    fn from(m: vendor::Model) -> Self {
        Self {
            rating: m.rating(),
            id: m.id,
            name: m.name,
            service_type: m.service_type,
            contact_name: m.contact_name,
            phone: m.phone,
            email: m.email,
            notes: m.notes,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ClientResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<client::Model> for ClientResponse {
    fn from(m: client::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            address: m.address,
            created_at: m.created_at,
        }
    }
}

// ---------- dashboard ----------

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_users: u64,
    pub total_events: u64,
    pub total_services: u64,
    pub pending_events: u64,
    pub recent_events: Vec<EventResponse>,
}

impl From<DashboardStats> for DashboardResponse {
    fn from(s: DashboardStats) -> Self {
        Self {
            total_users: s.total_users,
            total_events: s.total_events,
            total_services: s.total_services,
            pending_events: s.pending_events,
            recent_events: s.recent_events.into_iter().map(EventResponse::from).collect(),
        }
    }
}
