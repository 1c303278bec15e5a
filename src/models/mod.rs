//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod campaign_draft;
pub mod campaign_model;
pub mod contact_model;
pub mod dashboard_model;
pub mod message_model;
pub mod profile_model;
pub mod template_model;
