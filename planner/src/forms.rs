//! Request bodies accepted by the API, each with its own validation.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::entity::{event::Status, service::Category};
use crate::validation::{self, ValidationError};

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::length("Username", &self.username, 3, 80)?;
        if self.password.is_empty() {
            return Err(ValidationError::new("Password is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct RegistrationForm {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

/// Normalized registration data.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<Registration, ValidationError> {
        let username = validation::length("Username", &self.username, 3, 80)?;
        let full_name = validation::length("Full name", &self.full_name, 3, 120)?;
        let email = validation::email("Email", &self.email)?;
        let phone = validation::phone(self.phone.as_deref())?;
        validation::password(&self.password, &self.confirm_password)?;
        Ok(Registration {
            username,
            full_name,
            email,
            phone,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EventForm {
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DDTHH:MM`
    pub event_date: String,
    pub venue: Option<String>,
    pub guest_count: Option<i32>,
    pub estimated_budget: Option<Decimal>,
    /// Honoured only when the caller is an admin.
    pub status: Option<Status>,
}

#[derive(Debug, Clone)]
pub struct EventFields {
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDateTime,
    pub venue: Option<String>,
    pub guest_count: Option<i32>,
    pub budget_cents: Option<i64>,
}

impl EventForm {
    pub fn validate(&self) -> Result<EventFields, ValidationError> {
        let title = validation::length("Title", &self.title, 3, 100)?;
        let description = validation::optional_max("Description", self.description.as_deref(), 500)?;
        let event_date = validation::event_date(&self.event_date)?;
        let venue = validation::optional_max("Venue", self.venue.as_deref(), 150)?;
        let guest_count = validation::optional_range("Guest count", self.guest_count, 1, 10_000)?;
        let budget_cents = self
            .estimated_budget
            .map(|b| validation::non_negative_amount("Budget", b))
            .transpose()?;
        Ok(EventFields {
            title,
            description,
            event_date,
            venue,
            guest_count,
            budget_cents,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ServiceForm {
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub category: Category,
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Debug, Clone)]
pub struct ServiceFields {
    pub name: String,
    pub description: Option<String>,
    pub base_price_cents: i64,
    pub category: Category,
    pub image_url: Option<String>,
    pub is_available: bool,
}

impl ServiceForm {
    pub fn validate(&self) -> Result<ServiceFields, ValidationError> {
        Ok(ServiceFields {
            name: validation::length("Service name", &self.name, 3, 100)?,
            description: validation::optional_max("Description", self.description.as_deref(), 500)?,
            base_price_cents: validation::non_negative_amount("Base price", self.base_price)?,
            category: self.category,
            image_url: validation::optional_max("Image URL", self.image_url.as_deref(), 255)?,
            is_available: self.is_available,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct VendorForm {
    pub name: String,
    pub service_type: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub rating: Option<Decimal>,
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct VendorFields {
    pub name: String,
    pub service_type: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub rating_hundredths: Option<i32>,
    pub notes: Option<String>,
    pub is_active: bool,
}

impl VendorForm {
    pub fn validate(&self) -> Result<VendorFields, ValidationError> {
        Ok(VendorFields {
            name: validation::length("Vendor name", &self.name, 3, 150)?,
            service_type: validation::length("Service type", &self.service_type, 1, 100)?,
            contact_name: validation::optional_max("Contact name", self.contact_name.as_deref(), 100)?,
            phone: validation::phone(self.phone.as_deref())?,
            email: validation::optional_email("Email", self.email.as_deref())?,
            rating_hundredths: validation::rating(self.rating)?,
            notes: self
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_owned),
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AddServiceForm {
    pub service_id: Uuid,
    pub agreed_price: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClientFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ClientForm {
    pub fn validate(&self) -> Result<ClientFields, ValidationError> {
        Ok(ClientFields {
            name: validation::length("Name", &self.name, 3, 100)?,
            email: validation::email("Email", &self.email)?,
            phone: validation::phone(self.phone.as_deref())?,
            address: validation::optional_max("Address", self.address.as_deref(), 200)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationForm {
        RegistrationForm {
            username: "lucia".into(),
            full_name: "Lucía Fernández".into(),
            email: "lucia@example.com".into(),
            phone: Some(String::new()),
            password: "s3cret!".into(),
            confirm_password: "s3cret!".into(),
        }
    }

    #[test]
    fn registration_normalizes_blank_phone() {
        let reg = registration().validate().unwrap();
        assert_eq!(reg.phone, None);
        assert_eq!(reg.username, "lucia");
    }

    #[test]
    fn registration_rejects_mismatched_passwords() {
        let mut form = registration();
        form.confirm_password = "other".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn event_form_parses_date_and_budget() {
        let form: EventForm = serde_json::from_value(serde_json::json!({
            "title": "Boda Ana y Luis",
            "event_date": "2026-05-02T18:00",
            "guest_count": 120,
            "estimated_budget": "1000.50"
        }))
        .unwrap();
        let fields = form.validate().unwrap();
        assert_eq!(fields.budget_cents, Some(100_050));
        assert_eq!(fields.guest_count, Some(120));
        assert_eq!(fields.venue, None);
    }

    #[test]
    fn event_form_rejects_bad_date() {
        let form: EventForm = serde_json::from_value(serde_json::json!({
            "title": "Boda",
            "event_date": "02/05/2026"
        }))
        .unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn service_form_defaults_available_and_checks_category() {
        let form: ServiceForm = serde_json::from_value(serde_json::json!({
            "name": "Banquete",
            "base_price": 2500,
            "category": "catering"
        }))
        .unwrap();
        let fields = form.validate().unwrap();
        assert!(fields.is_available);
        assert_eq!(fields.base_price_cents, 250_000);

        let unknown = serde_json::from_value::<ServiceForm>(serde_json::json!({
            "name": "Banquete",
            "base_price": 2500,
            "category": "fireworks"
        }));
        assert!(unknown.is_err());
    }

    #[test]
    fn vendor_form_rating_out_of_range() {
        let form: VendorForm = serde_json::from_value(serde_json::json!({
            "name": "Flores Lupita",
            "service_type": "Florist",
            "rating": 7
        }))
        .unwrap();
        assert!(form.validate().is_err());
    }
}
