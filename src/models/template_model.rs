//! models/template_model.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub content: String,
    /// Placeholders encontrados en `content`. Solo metadata.
    pub variables: Vec<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct TemplateRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub content: String,
    pub variables: Json<Vec<String>>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TemplateRow> for Template {
    fn from(row: TemplateRow) -> Self {
        Template {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            content: row.content,
            variables: row.variables.0,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Request para crear o editar un template
#[derive(Debug, Clone, Deserialize)]
pub struct SaveTemplateRequest {
    pub name: String,
    pub content: String,
    pub category: Option<String>,
}
