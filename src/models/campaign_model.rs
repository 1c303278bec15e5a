//! models/campaign_model.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::message_model::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CampaignStatus {
    Pending,
    Processing,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Campaign {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub template_id: String,
    pub status: CampaignStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub sent_count: i64,
    pub total_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    All,
    Tags,
}

/// Lo que envía el wizard al iniciar una campaña.
#[derive(Debug, Clone, Deserialize)]
pub struct StartCampaignRequest {
    pub name: String,
    pub template_id: String,
    pub target_type: TargetType,
    #[serde(default)]
    pub selected_tags: Vec<String>,
    /// Segundos entre mensajes (2..=60). Si no viene, 5.
    pub delay_seconds: Option<u64>,
    /// Si es true, el endpoint espera a que termine el loop de envío.
    #[serde(default)]
    pub wait_for_completion: bool,
}

/// Resumen en memoria de un loop de envío terminado.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub campaign_id: String,
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartCampaignResponse {
    pub success: bool,
    pub campaign_id: String,
    pub total_count: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DispatchSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignDetail {
    pub campaign: Campaign,
    pub messages: Vec<Message>,
}
