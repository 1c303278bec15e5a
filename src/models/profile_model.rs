//! models/profile_model.rs
//! Credenciales del gateway por usuario.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: String,
    pub gateway_api_key: Option<String>,
    pub gateway_instance_id: Option<String>,
    pub webhook_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Solo devuelve credenciales si ambas están presentes y no vacías.
    pub fn credentials(&self) -> Option<GatewayCredentials> {
        let api_key = self.gateway_api_key.as_deref().map(str::trim)?;
        let instance_id = self.gateway_instance_id.as_deref().map(str::trim)?;
        if api_key.is_empty() || instance_id.is_empty() {
            return None;
        }
        Some(GatewayCredentials {
            api_key: api_key.to_string(),
            instance_id: instance_id.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCredentials {
    pub api_key: String,
    pub instance_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub gateway_api_key: Option<String>,
    pub gateway_instance_id: Option<String>,
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestMessageRequest {
    pub number: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionTestResponse {
    pub success: bool,
    pub message: String,
}
