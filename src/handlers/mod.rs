//! handlers/mod.rs
pub mod campaign_handler;
pub mod contact_handler;
pub mod dashboard_handler;
pub mod settings_handler;
pub mod template_handler;
pub mod user;
