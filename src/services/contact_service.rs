//! services/contact_service.rs

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{types::Json, Pool, Sqlite};
use uuid::Uuid;

use crate::error::SaveError;
use crate::models::contact_model::{normalize_phone, Contact, ContactRow, CreateContactRequest};

#[derive(Clone, Debug)]
pub struct ContactService {
    db_pool: Pool<Sqlite>,
}

impl ContactService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        ContactService { db_pool }
    }

    /// Alta manual de un contacto. Nombre y teléfono son obligatorios.
    pub async fn create_contact(
        &self,
        user_id: &str,
        req: CreateContactRequest,
    ) -> Result<Contact, SaveError> {
        let name = req.name.trim().to_string();
        let phone = normalize_phone(&req.phone);
        if name.is_empty() || phone.is_empty() {
            return Err(SaveError::Validation(
                "Contact name and phone are required".to_string(),
            ));
        }

        let mut tags: Vec<String> = Vec::new();
        for tag in req.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if !tags.iter().any(|existing| existing == tag) {
                tags.push(tag.to_string());
            }
        }

        let contact = Contact {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name,
            phone,
            tags,
            status: "active".to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO contacts (id, user_id, name, phone, tags, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&contact.id)
        .bind(&contact.user_id)
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(Json(contact.tags.clone()))
        .bind(&contact.status)
        .bind(contact.created_at)
        .execute(&self.db_pool)
        .await
        .context("Failed to insert contact")?;

        log::info!(
            "(create_contact) Contacto {} creado para user_id={}",
            contact.id,
            user_id
        );
        Ok(contact)
    }

    /// Lista para la pantalla de contactos: más recientes primero,
    /// con búsqueda opcional por nombre o teléfono.
    pub async fn list_contacts(&self, user_id: &str, search: Option<&str>) -> Result<Vec<Contact>> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, phone, tags, status, created_at
            FROM contacts
            WHERE user_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await
        .context("Failed to list contacts")?;

        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        Ok(rows
            .into_iter()
            .map(Contact::from)
            .filter(|c| match &needle {
                Some(n) => c.name.to_lowercase().contains(n) || c.phone.contains(n.as_str()),
                None => true,
            })
            .collect())
    }

    /// Todos los contactos del usuario en orden de alta.
    pub async fn list_for_audience(&self, user_id: &str) -> Result<Vec<Contact>> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, phone, tags, status, created_at
            FROM contacts
            WHERE user_id = ?1
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await
        .context("Failed to load audience contacts")?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    /// Devuelve false si el contacto no existía.
    pub async fn delete_contact(&self, user_id: &str, contact_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?1 AND user_id = ?2")
            .bind(contact_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .context("Failed to delete contact")?;

        Ok(result.rows_affected() > 0)
    }

    /// Tags distintos usados por el usuario, ordenados.
    pub async fn list_tags(&self, user_id: &str) -> Result<Vec<String>> {
        let mut tags: Vec<String> = self
            .list_for_audience(user_id)
            .await?
            .into_iter()
            .flat_map(|c| c.tags)
            .collect();
        tags.sort();
        tags.dedup();
        Ok(tags)
    }

    pub async fn count_contacts(&self, user_id: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts WHERE user_id = ?1")
            .bind(user_id)
            .fetch_one(&self.db_pool)
            .await
            .context("Failed to count contacts")?;
        Ok(count)
    }
}
