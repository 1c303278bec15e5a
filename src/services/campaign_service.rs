//! services/campaign_service.rs

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::models::campaign_draft::ValidatedCampaign;
use crate::models::campaign_model::{Campaign, CampaignStatus};

#[derive(Clone, Debug)]
pub struct CampaignService {
    db_pool: Pool<Sqlite>,
}

impl CampaignService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        CampaignService { db_pool }
    }

    /// Inserta la campaña ya en "processing", con sent_count = 0.
    pub async fn create_campaign(
        &self,
        user_id: &str,
        draft: &ValidatedCampaign,
        total_count: usize,
    ) -> Result<Campaign> {
        let now = Utc::now();
        let campaign = Campaign {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: draft.name.clone(),
            template_id: draft.template_id.clone(),
            status: CampaignStatus::Processing,
            scheduled_at: Some(now),
            sent_count: 0,
            total_count: total_count as i64,
            created_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO campaigns (
                id, user_id, name, template_id, status,
                scheduled_at, sent_count, total_count, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8)
            "#,
        )
        .bind(&campaign.id)
        .bind(&campaign.user_id)
        .bind(&campaign.name)
        .bind(&campaign.template_id)
        .bind(campaign.status)
        .bind(campaign.scheduled_at)
        .bind(campaign.total_count)
        .bind(campaign.created_at)
        .execute(&self.db_pool)
        .await
        .context("Failed to insert campaign")?;

        Ok(campaign)
    }

    pub async fn get_campaign(&self, user_id: &str, campaign_id: &str) -> Result<Option<Campaign>> {
        let campaign: Option<Campaign> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, template_id, status,
                   scheduled_at, sent_count, total_count, created_at
            FROM campaigns
            WHERE id = ?1 AND user_id = ?2
            "#,
        )
        .bind(campaign_id)
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await
        .context("Failed to load campaign")?;

        Ok(campaign)
    }

    /// Más recientes primero; `limit` opcional (el dashboard pide 5).
    pub async fn list_campaigns(&self, user_id: &str, limit: Option<u32>) -> Result<Vec<Campaign>> {
        let limit = limit.map(i64::from).unwrap_or(-1);
        let campaigns: Vec<Campaign> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, template_id, status,
                   scheduled_at, sent_count, total_count, created_at
            FROM campaigns
            WHERE user_id = ?1
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await
        .context("Failed to list campaigns")?;

        Ok(campaigns)
    }

    pub async fn count_by_status(&self, user_id: &str, status: CampaignStatus) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM campaigns WHERE user_id = ?1 AND status = ?2")
                .bind(user_id)
                .bind(status)
                .fetch_one(&self.db_pool)
                .await
                .context("Failed to count campaigns")?;
        Ok(count)
    }
}
