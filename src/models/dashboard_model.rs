//! models/dashboard_model.rs

use serde::Serialize;

use crate::models::campaign_model::Campaign;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_contacts: i64,
    pub active_campaigns: i64,
    pub delivery_rate: String,
    pub sent_today: i64,
    pub recent_campaigns: Vec<Campaign>,
}
