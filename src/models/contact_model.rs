//! models/contact_model.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub phone: String,
    pub tags: Vec<String>,
    pub status: String, // "active", "inactive"
    pub created_at: DateTime<Utc>,
}

impl Contact {
    pub fn has_any_tag<'a, I>(&self, wanted: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        wanted.into_iter().any(|tag| self.tags.contains(tag))
    }
}

/// Fila tal cual vive en SQLite (tags como JSON).
#[derive(Debug, sqlx::FromRow)]
pub struct ContactRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub phone: String,
    pub tags: Json<Vec<String>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            phone: row.phone,
            tags: row.tags.0,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactQuery {
    pub search: Option<String>,
}

/// Deja solo los dígitos del teléfono ("+55 (11) 9999-0000" -> "551199990000").
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}
