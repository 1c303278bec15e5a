//! services/template_service.rs

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{types::Json, Pool, Sqlite};
use uuid::Uuid;

use crate::error::SaveError;
use crate::models::template_model::{SaveTemplateRequest, Template, TemplateRow};
use crate::services::render_service::extract_variables;

/// Pie de opt-out que se agrega si el contenido no menciona "stop".
pub const OPT_OUT_FOOTER: &str = "\n\nResponda STOP para cancelar";
const DEFAULT_CATEGORY: &str = "marketing";

/// Normaliza el contenido antes de guardarlo y extrae sus variables.
pub fn prepare_content(content: &str) -> (String, Vec<String>) {
    let variables = extract_variables(content);
    let mut final_content = content.to_string();
    if !final_content.to_lowercase().contains("stop") {
        final_content.push_str(OPT_OUT_FOOTER);
    }
    (final_content, variables)
}

#[derive(Clone, Debug)]
pub struct TemplateService {
    db_pool: Pool<Sqlite>,
}

impl TemplateService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        TemplateService { db_pool }
    }

    pub async fn create_template(
        &self,
        user_id: &str,
        req: SaveTemplateRequest,
    ) -> Result<Template, SaveError> {
        let (name, content, variables, category) = Self::validate(req)?;
        let now = Utc::now();
        let template = Template {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name,
            content,
            variables,
            category,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO templates (
                id, user_id, name, content, variables, category, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            "#,
        )
        .bind(&template.id)
        .bind(&template.user_id)
        .bind(&template.name)
        .bind(&template.content)
        .bind(Json(template.variables.clone()))
        .bind(&template.category)
        .bind(now)
        .execute(&self.db_pool)
        .await
        .context("Failed to insert template")?;

        Ok(template)
    }

    /// Devuelve None si el template no existe para ese usuario.
    pub async fn update_template(
        &self,
        user_id: &str,
        template_id: &str,
        req: SaveTemplateRequest,
    ) -> Result<Option<Template>, SaveError> {
        let (name, content, variables, category) = Self::validate(req)?;

        let result = sqlx::query(
            r#"
            UPDATE templates
            SET name = ?1, content = ?2, variables = ?3, category = ?4, updated_at = ?5
            WHERE id = ?6 AND user_id = ?7
            "#,
        )
        .bind(name)
        .bind(content)
        .bind(Json(variables))
        .bind(category)
        .bind(Utc::now())
        .bind(template_id)
        .bind(user_id)
        .execute(&self.db_pool)
        .await
        .context("Failed to update template")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(self.get_template(user_id, template_id).await?)
    }

    pub async fn get_template(&self, user_id: &str, template_id: &str) -> Result<Option<Template>> {
        let row: Option<TemplateRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, content, variables, category, created_at, updated_at
            FROM templates
            WHERE id = ?1 AND user_id = ?2
            "#,
        )
        .bind(template_id)
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await
        .context("Failed to load template")?;

        Ok(row.map(Template::from))
    }

    pub async fn list_templates(&self, user_id: &str) -> Result<Vec<Template>> {
        let rows: Vec<TemplateRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, content, variables, category, created_at, updated_at
            FROM templates
            WHERE user_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await
        .context("Failed to list templates")?;

        Ok(rows.into_iter().map(Template::from).collect())
    }

    pub async fn delete_template(&self, user_id: &str, template_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM templates WHERE id = ?1 AND user_id = ?2")
            .bind(template_id)
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .context("Failed to delete template")?;

        Ok(result.rows_affected() > 0)
    }

    fn validate(req: SaveTemplateRequest) -> Result<(String, String, Vec<String>, String), SaveError> {
        let name = req.name.trim().to_string();
        if name.is_empty() || req.content.trim().is_empty() {
            return Err(SaveError::Validation(
                "Template name and content are required".to_string(),
            ));
        }
        let (content, variables) = prepare_content(&req.content);
        let category = req
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        Ok((name, content, variables, category))
    }
}
