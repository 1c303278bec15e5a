//! services/dashboard_service.rs

use anyhow::Result;
use chrono::{Timelike, Utc};

use crate::models::campaign_model::CampaignStatus;
use crate::models::dashboard_model::DashboardStats;
use crate::models::message_model::MessageStatus;
use crate::services::{
    campaign_service::CampaignService, contact_service::ContactService,
    message_service::MessageService,
};

const DELIVERY_SAMPLE: u32 = 1000;
const RECENT_CAMPAIGNS: u32 = 5;

/// "100%" si no hay mensajes; si no, porcentaje con un decimal.
pub fn delivery_rate(statuses: &[MessageStatus]) -> String {
    if statuses.is_empty() {
        return "100%".to_string();
    }
    let sent = statuses.iter().filter(|s| **s == MessageStatus::Sent).count();
    format!("{:.1}%", sent as f64 / statuses.len() as f64 * 100.0)
}

#[derive(Clone, Debug)]
pub struct DashboardService {
    contact_service: ContactService,
    campaign_service: CampaignService,
    message_service: MessageService,
}

impl DashboardService {
    pub fn new(
        contact_service: ContactService,
        campaign_service: CampaignService,
        message_service: MessageService,
    ) -> Self {
        Self {
            contact_service,
            campaign_service,
            message_service,
        }
    }

    pub async fn stats(&self, user_id: &str) -> Result<DashboardStats> {
        let now = Utc::now();
        let midnight = now
            .with_hour(0)
            .and_then(|t| t.with_minute(0))
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);

        let total_contacts = self.contact_service.count_contacts(user_id).await?;
        let active_campaigns = self
            .campaign_service
            .count_by_status(user_id, CampaignStatus::Processing)
            .await?;
        let sent_today = self
            .message_service
            .count_sent_since(user_id, midnight)
            .await?;
        let statuses = self
            .message_service
            .recent_statuses(user_id, DELIVERY_SAMPLE)
            .await?;
        let recent_campaigns = self
            .campaign_service
            .list_campaigns(user_id, Some(RECENT_CAMPAIGNS))
            .await?;

        Ok(DashboardStats {
            total_contacts,
            active_campaigns,
            delivery_rate: delivery_rate(&statuses),
            sent_today,
            recent_campaigns,
        })
    }
}
