//! services/audience_service.rs

use crate::error::CampaignError;
use crate::models::campaign_draft::AudienceTarget;
use crate::models::contact_model::Contact;
use crate::services::contact_service::ContactService;

/// OR lógico entre tags: basta con que el contacto tenga uno.
pub fn filter_audience(contacts: Vec<Contact>, target: &AudienceTarget) -> Vec<Contact> {
    match target {
        AudienceTarget::All => contacts,
        AudienceTarget::Tags(chosen) => contacts
            .into_iter()
            .filter(|c| c.has_any_tag(chosen))
            .collect(),
    }
}

#[derive(Clone, Debug)]
pub struct AudienceService {
    contact_service: ContactService,
}

impl AudienceService {
    pub fn new(contact_service: ContactService) -> Self {
        AudienceService { contact_service }
    }

    /// Contactos del usuario para la campaña. Un resultado vacío se
    /// reporta como `EmptyAudience`.
    pub async fn resolve(
        &self,
        user_id: &str,
        target: &AudienceTarget,
    ) -> Result<Vec<Contact>, CampaignError> {
        let contacts = self.contact_service.list_for_audience(user_id).await?;
        let audience = filter_audience(contacts, target);

        log::info!(
            "(resolve) user_id={} target={:?} -> {} contactos",
            user_id,
            target,
            audience.len()
        );

        if audience.is_empty() {
            return Err(CampaignError::EmptyAudience);
        }
        Ok(audience)
    }
}
