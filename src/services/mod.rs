//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod audience_service;
pub mod campaign_service;
pub mod contact_service;
pub mod dashboard_service;
pub mod dispatch_service;
pub mod gateway_service;
pub mod message_service;
pub mod profile_service;
pub mod render_service;
pub mod template_service;
