//! error.rs
//! Errores al iniciar una campaña. Los errores de envío por mensaje
//! no pasan por aquí: quedan registrados en la tabla `messages`.

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Gateway credentials are not configured for this user")]
    MissingCredentials,

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("No contacts found for the selected audience")]
    EmptyAudience,

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

/// Errores al guardar contactos y templates.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}
