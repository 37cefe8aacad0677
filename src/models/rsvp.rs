use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Rsvp {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub attending: bool,
    pub guests: i32,
    pub dietary_restrictions: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw submission payload. Form-encoded values all arrive as strings;
/// `validate` applies the parsing rules and the required-field check.
#[derive(Debug, Default, Deserialize)]
pub struct RsvpForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub attending: Option<String>,
    pub guests: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub message: Option<String>,
}

/// A validated submission, ready to insert.
#[derive(Debug, PartialEq)]
pub struct NewRsvp {
    pub name: String,
    pub email: String,
    pub attending: bool,
    pub guests: i32,
    pub dietary_restrictions: Option<String>,
    pub message: Option<String>,
}

impl RsvpForm {
    /// Name and email must be non-empty. `attending` is true only for the
    /// literal "true". `guests` falls back to 1 when missing or unparseable.
    /// Empty optional fields are stored as NULL.
    pub fn validate(self) -> Result<NewRsvp, AppError> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();

        if name.is_empty() || email.is_empty() {
            return Err(AppError::BadRequest("Name and email are required".into()));
        }

        let attending = self.attending.as_deref() == Some("true");
        let guests = self
            .guests
            .as_deref()
            .and_then(|g| g.trim().parse().ok())
            .unwrap_or(1);

        Ok(NewRsvp {
            name,
            email,
            attending,
            guests,
            dietary_restrictions: none_if_empty(self.dietary_restrictions),
            message: none_if_empty(self.message),
        })
    }
}

fn none_if_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct RsvpStats {
    pub total: i64,
    pub attending: i64,
    pub total_guests: i64,
}
