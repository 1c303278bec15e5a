//! tests/mod.rs
//! Utilidades compartidas por las pruebas: SQLite en memoria y un
//! gateway falso que registra lo que se le envía.

mod dashboard_tests;
mod handler_tests;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::models::contact_model::{Contact, CreateContactRequest};
use crate::models::profile_model::{GatewayCredentials, UpdateProfileRequest};
use crate::services::{
    audience_service::AudienceService, campaign_service::CampaignService,
    contact_service::ContactService, dispatch_service::CampaignDispatcher,
    gateway_service::MessageGateway, message_service::MessageService,
    profile_service::ProfileService, template_service::TemplateService,
};

pub const USER: &str = "user-1";

/// Una sola conexión: cada conexión en memoria es otra base.
pub async fn setup_test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

#[derive(Default)]
pub struct FakeGateway {
    pub sent: Mutex<Vec<(String, String)>>,
    pub failing_numbers: HashSet<String>,
    pub instances: Vec<String>,
}

impl FakeGateway {
    pub fn failing(numbers: &[&str]) -> Self {
        FakeGateway {
            failing_numbers: numbers.iter().map(|n| n.to_string()).collect(),
            ..FakeGateway::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("poisoned").clone()
    }
}

#[async_trait]
impl MessageGateway for FakeGateway {
    async fn send_text(&self, _creds: &GatewayCredentials, number: &str, text: &str) -> Result<()> {
        let number = crate::models::contact_model::normalize_phone(number);
        if self.failing_numbers.contains(&number) {
            return Err(anyhow!("Gateway returned 500 Internal Server Error: boom"));
        }
        self.sent
            .lock()
            .expect("poisoned")
            .push((number, text.to_string()));
        Ok(())
    }

    async fn fetch_instance_names(&self, _api_key: &str) -> Result<Vec<String>> {
        Ok(self.instances.clone())
    }
}

/// Servicios armados sobre la misma base.
pub struct TestEnv {
    pub pool: Pool<Sqlite>,
    pub contacts: ContactService,
    pub templates: TemplateService,
    pub campaigns: CampaignService,
    pub messages: MessageService,
    pub profiles: ProfileService,
    pub gateway: Arc<FakeGateway>,
    pub dispatcher: CampaignDispatcher,
}

impl TestEnv {
    pub async fn new(gateway: FakeGateway) -> Self {
        let pool = setup_test_pool().await;
        let contacts = ContactService::new(pool.clone());
        let templates = TemplateService::new(pool.clone());
        let campaigns = CampaignService::new(pool.clone());
        let messages = MessageService::new(pool.clone());
        let profiles = ProfileService::new(pool.clone());
        let gateway = Arc::new(gateway);
        let dispatcher = CampaignDispatcher::new(
            campaigns.clone(),
            messages.clone(),
            templates.clone(),
            profiles.clone(),
            AudienceService::new(contacts.clone()),
            gateway.clone(),
        );
        TestEnv {
            pool,
            contacts,
            templates,
            campaigns,
            messages,
            profiles,
            gateway,
            dispatcher,
        }
    }

    pub async fn add_contact(&self, name: &str, phone: &str, tags: &[&str]) -> Contact {
        self.contacts
            .create_contact(
                USER,
                CreateContactRequest {
                    name: name.to_string(),
                    phone: phone.to_string(),
                    tags: tags.iter().map(|t| t.to_string()).collect(),
                },
            )
            .await
            .expect("Failed to create contact")
    }

    pub async fn configure_credentials(&self) {
        self.profiles
            .save_profile(
                USER,
                UpdateProfileRequest {
                    gateway_api_key: Some("key-123".to_string()),
                    gateway_instance_id: Some("instance-a".to_string()),
                    webhook_url: None,
                },
            )
            .await
            .expect("Failed to save profile");
    }
}

pub fn contact(name: &str, tags: &[&str]) -> Contact {
    Contact {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: USER.to_string(),
        name: name.to_string(),
        phone: "5511999990000".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        status: "active".to_string(),
        created_at: chrono::Utc::now(),
    }
}
