use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::config::app_config::{log_filter, AppConfig};
use crate::logger::init_logger;
use crate::services::{
    audience_service::AudienceService,
    campaign_service::CampaignService,
    contact_service::ContactService,
    dashboard_service::DashboardService,
    dispatch_service::CampaignDispatcher,
    gateway_service::{EvolutionGateway, MessageGateway},
    message_service::MessageService,
    profile_service::ProfileService,
    template_service::TemplateService,
};

mod app;
mod config;
mod error;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

async fn setup_database(config: &AppConfig) -> anyhow::Result<Pool<Sqlite>> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = config.database_url();
    log::info!("Conectando a SQLite en {}", db_url);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;
    Ok(db_pool)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger(&log_filter(|key| std::env::var(key).ok()));

    let config = AppConfig::from_env();

    let db_pool = match setup_database(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("No se pudo preparar la base de datos: {:#}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let contact_service = ContactService::new(db_pool.clone());
    let template_service = TemplateService::new(db_pool.clone());
    let campaign_service = CampaignService::new(db_pool.clone());
    let message_service = MessageService::new(db_pool.clone());
    let profile_service = ProfileService::new(db_pool.clone());
    let audience_service = AudienceService::new(contact_service.clone());

    let gateway: Arc<dyn MessageGateway> =
        Arc::new(EvolutionGateway::new(&config.gateway_base_url));

    let dispatcher = CampaignDispatcher::new(
        campaign_service.clone(),
        message_service.clone(),
        template_service.clone(),
        profile_service.clone(),
        audience_service,
        gateway.clone(),
    );

    let dashboard_service = DashboardService::new(
        contact_service.clone(),
        campaign_service.clone(),
        message_service.clone(),
    );

    log::info!(
        "Levantando servidor en {}:{} (gateway={})",
        config.host,
        config.port,
        config.gateway_base_url
    );
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(contact_service.clone()))
            .app_data(web::Data::new(template_service.clone()))
            .app_data(web::Data::new(campaign_service.clone()))
            .app_data(web::Data::new(message_service.clone()))
            .app_data(web::Data::new(profile_service.clone()))
            .app_data(web::Data::new(dispatcher.clone()))
            .app_data(web::Data::new(dashboard_service.clone()))
            .app_data(web::Data::from(gateway.clone()))
            .configure(app::init_app)
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
