//! services/dispatch_service.rs
//! Inicio de campañas y loop de envío secuencial.

use std::sync::Arc;
use std::time::Duration;

use crate::error::CampaignError;
use crate::models::campaign_draft::ValidatedCampaign;
use crate::models::campaign_model::{Campaign, DispatchSummary};
use crate::models::contact_model::Contact;
use crate::models::message_model::MessageOutcome;
use crate::models::profile_model::GatewayCredentials;
use crate::services::{
    audience_service::AudienceService, campaign_service::CampaignService,
    gateway_service::MessageGateway, message_service::MessageService,
    profile_service::ProfileService, render_service::render_content,
    template_service::TemplateService,
};

/// Todo lo que el loop necesita, resuelto antes del primer envío.
#[derive(Debug, Clone)]
pub struct DispatchJob {
    pub campaign: Campaign,
    pub template_body: String,
    pub contacts: Vec<Contact>,
    pub credentials: GatewayCredentials,
    pub delay: Duration,
}

#[derive(Clone)]
pub struct CampaignDispatcher {
    campaign_service: CampaignService,
    message_service: MessageService,
    template_service: TemplateService,
    profile_service: ProfileService,
    audience_service: AudienceService,
    gateway: Arc<dyn MessageGateway>,
}

impl CampaignDispatcher {
    pub fn new(
        campaign_service: CampaignService,
        message_service: MessageService,
        template_service: TemplateService,
        profile_service: ProfileService,
        audience_service: AudienceService,
        gateway: Arc<dyn MessageGateway>,
    ) -> Self {
        Self {
            campaign_service,
            message_service,
            template_service,
            profile_service,
            audience_service,
            gateway,
        }
    }

    /// Fase de preparación. Cualquier error aquí aborta antes de enviar
    /// nada; la campaña solo se inserta al final, si todo lo demás salió bien.
    pub async fn start(
        &self,
        user_id: &str,
        draft: ValidatedCampaign,
    ) -> Result<DispatchJob, CampaignError> {
        log::info!(
            "(start) Preparando campaña '{}' para user_id={}",
            draft.name,
            user_id
        );

        // 1) Credenciales
        let credentials = self
            .profile_service
            .get_credentials(user_id)
            .await?
            .ok_or(CampaignError::MissingCredentials)?;

        // 2) Template
        let template = self
            .template_service
            .get_template(user_id, &draft.template_id)
            .await?
            .ok_or_else(|| CampaignError::TemplateNotFound(draft.template_id.clone()))?;

        // 3) Audiencia
        let contacts = self.audience_service.resolve(user_id, &draft.audience).await?;

        // 4) Campaña en "processing"
        let campaign = self
            .campaign_service
            .create_campaign(user_id, &draft, contacts.len())
            .await?;

        log::info!(
            "(start) Campaña {} creada con {} contactos, delay={:?}",
            campaign.id,
            contacts.len(),
            draft.delay
        );

        Ok(DispatchJob {
            campaign,
            template_body: template.content,
            contacts,
            credentials,
            delay: draft.delay,
        })
    }

    /// Loop de envío: un contacto a la vez, con `delay` entre envíos.
    /// Un fallo individual nunca corta el loop y no hay reintentos.
    /// Al terminar no se escribe estado final en la campaña.
    pub async fn run(&self, job: DispatchJob) -> DispatchSummary {
        let campaign_id = job.campaign.id.as_str();
        let total = job.contacts.len();
        let mut summary = DispatchSummary {
            campaign_id: campaign_id.to_string(),
            total,
            ..DispatchSummary::default()
        };

        for (idx, contact) in job.contacts.iter().enumerate() {
            let content = render_content(&job.template_body, contact);

            let outcome = match self
                .gateway
                .send_text(&job.credentials, &contact.phone, &content)
                .await
            {
                Ok(()) => MessageOutcome::Sent,
                Err(e) => {
                    log::warn!(
                        "(run) Fallo al enviar a contacto {} ({}/{}) en campaña {}: {:#}",
                        contact.id,
                        idx + 1,
                        total,
                        campaign_id,
                        e
                    );
                    MessageOutcome::Failed(format!("{:#}", e))
                }
            };

            match outcome {
                MessageOutcome::Sent => summary.sent += 1,
                MessageOutcome::Failed(_) => summary.failed += 1,
            }

            // Mensaje y contador van juntos; si falla, no avanza ninguno.
            if let Err(e) = self
                .message_service
                .record_message(campaign_id, &contact.id, &content, &outcome)
                .await
            {
                log::error!(
                    "(run) No se pudo registrar el mensaje de contacto {} en campaña {}: {:#}",
                    contact.id,
                    campaign_id,
                    e
                );
            }

            if idx + 1 < total && !job.delay.is_zero() {
                tokio::time::sleep(job.delay).await;
            }
        }

        log::info!(
            "(run) Campaña {} drenada: {} enviados, {} fallidos de {}",
            campaign_id,
            summary.sent,
            summary.failed,
            total
        );
        summary
    }
}
