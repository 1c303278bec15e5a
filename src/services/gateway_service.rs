//! services/gateway_service.rs
//! Cliente del gateway de WhatsApp (Evolution API).

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::models::contact_model::normalize_phone;
use crate::models::profile_model::GatewayCredentials;

/// Retardo (ms) que el gateway aplica simulando "escribiendo...".
const PRESENCE_DELAY_MS: u32 = 1200;

#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Envía un texto. Cualquier respuesta fuera de 2xx es error.
    async fn send_text(&self, creds: &GatewayCredentials, number: &str, text: &str) -> Result<()>;

    /// Nombres de las instancias visibles con esa api key.
    async fn fetch_instance_names(&self, api_key: &str) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SendTextOptions {
    pub delay: u32,
    pub presence: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SendTextPayload {
    pub number: String,
    pub text: String,
    pub options: SendTextOptions,
}

impl SendTextPayload {
    pub fn new(phone: &str, text: &str) -> Self {
        SendTextPayload {
            number: normalize_phone(phone),
            text: text.to_string(),
            options: SendTextOptions {
                delay: PRESENCE_DELAY_MS,
                presence: "composing".to_string(),
            },
        }
    }
}

#[derive(Clone)]
pub struct EvolutionGateway {
    base_url: String,
    http_client: Client,
}

impl EvolutionGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: Client::new(),
        }
    }

    pub fn send_text_url(&self, instance_id: &str) -> String {
        format!("{}/message/sendText/{}", self.base_url, instance_id)
    }

    pub fn instances_url(&self) -> String {
        format!("{}/instance/fetchInstances", self.base_url)
    }
}

#[async_trait]
impl MessageGateway for EvolutionGateway {
    async fn send_text(&self, creds: &GatewayCredentials, number: &str, text: &str) -> Result<()> {
        let payload = SendTextPayload::new(number, text);
        let url = self.send_text_url(&creds.instance_id);
        log::debug!("(send_text) POST {} -> number={}", url, payload.number);

        let resp = self
            .http_client
            .post(&url)
            .header("apikey", &creds.api_key)
            .json(&payload)
            .send()
            .await
            .context("(send_text) Fallo al hacer POST sendText")?;

        let status = resp.status();
        if !status.is_success() {
            let body_txt = resp.text().await.unwrap_or_default();
            log::error!(
                "(send_text) Gateway respondió {} para number={}: '{}'",
                status,
                payload.number,
                body_txt
            );
            return Err(anyhow!("Gateway returned {}: {}", status, body_txt));
        }
        Ok(())
    }

    async fn fetch_instance_names(&self, api_key: &str) -> Result<Vec<String>> {
        let resp = self
            .http_client
            .get(self.instances_url())
            .header("apikey", api_key)
            .send()
            .await
            .context("(fetch_instance_names) Fallo al hacer GET fetchInstances")?;

        let status = resp.status();
        if !status.is_success() {
            let body_txt = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Gateway returned {}: {}", status, body_txt));
        }

        let json_val = resp.json::<serde_json::Value>().await?;
        Ok(instance_names(&json_val))
    }
}

/// Extrae el campo `name` de cada instancia del listado.
pub fn instance_names(json_val: &serde_json::Value) -> Vec<String> {
    json_val
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.get("name").and_then(|v| v.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
