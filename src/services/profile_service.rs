//! services/profile_service.rs

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::models::profile_model::{GatewayCredentials, Profile, UpdateProfileRequest};

#[derive(Clone, Debug)]
pub struct ProfileService {
    db_pool: Pool<Sqlite>,
}

impl ProfileService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        ProfileService { db_pool }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>> {
        let profile: Option<Profile> = sqlx::query_as(
            r#"
            SELECT id, gateway_api_key, gateway_instance_id, webhook_url, updated_at
            FROM profiles
            WHERE id = ?1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await
        .context("Failed to load profile")?;

        Ok(profile)
    }

    /// Crea o reemplaza la configuración del usuario.
    pub async fn save_profile(&self, user_id: &str, req: UpdateProfileRequest) -> Result<Profile> {
        fn clean(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }

        let profile = Profile {
            id: user_id.to_string(),
            gateway_api_key: clean(req.gateway_api_key),
            gateway_instance_id: clean(req.gateway_instance_id),
            webhook_url: clean(req.webhook_url),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO profiles (id, gateway_api_key, gateway_instance_id, webhook_url, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (id) DO UPDATE SET
                gateway_api_key = excluded.gateway_api_key,
                gateway_instance_id = excluded.gateway_instance_id,
                webhook_url = excluded.webhook_url,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.gateway_api_key)
        .bind(&profile.gateway_instance_id)
        .bind(&profile.webhook_url)
        .bind(profile.updated_at)
        .execute(&self.db_pool)
        .await
        .context("Failed to save profile")?;

        log::info!("(save_profile) Configuración guardada para user_id={}", user_id);
        Ok(profile)
    }

    pub async fn get_credentials(&self, user_id: &str) -> Result<Option<GatewayCredentials>> {
        Ok(self
            .get_profile(user_id)
            .await?
            .and_then(|p| p.credentials()))
    }
}
