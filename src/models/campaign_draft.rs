//! models/campaign_draft.rs
//! Borrador de campaña construido paso a paso. Cada paso valida
//! solo sus campos; `build` entrega un `ValidatedCampaign` inmutable.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::error::CampaignError;
use crate::models::campaign_model::{StartCampaignRequest, TargetType};

pub const MIN_DELAY_SECS: u64 = 2;
pub const MAX_DELAY_SECS: u64 = 60;
pub const DEFAULT_DELAY_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudienceTarget {
    All,
    /// Nunca vacío.
    Tags(BTreeSet<String>),
}

impl AudienceTarget {
    pub fn from_selection(target_type: TargetType, tags: &[String]) -> Result<Self, CampaignError> {
        match target_type {
            TargetType::All => Ok(AudienceTarget::All),
            TargetType::Tags => {
                let chosen: BTreeSet<String> = tags
                    .iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                if chosen.is_empty() {
                    return Err(CampaignError::Validation(
                        "select at least one tag for a tag-targeted campaign".to_string(),
                    ));
                }
                Ok(AudienceTarget::Tags(chosen))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CampaignDraft {
    name: String,
    template_id: String,
    audience: Option<AudienceTarget>,
    delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCampaign {
    pub name: String,
    pub template_id: String,
    pub audience: AudienceTarget,
    pub delay: Duration,
}

impl CampaignDraft {
    /// Paso 1: nombre y template.
    pub fn new(name: &str, template_id: &str) -> Result<Self, CampaignError> {
        let name = name.trim();
        let template_id = template_id.trim();
        if name.is_empty() {
            return Err(CampaignError::Validation("campaign name is required".to_string()));
        }
        if template_id.is_empty() {
            return Err(CampaignError::Validation("a template must be selected".to_string()));
        }
        Ok(CampaignDraft {
            name: name.to_string(),
            template_id: template_id.to_string(),
            audience: None,
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
        })
    }

    /// Paso 2: audiencia.
    pub fn with_audience(self, audience: AudienceTarget) -> Result<Self, CampaignError> {
        if let AudienceTarget::Tags(tags) = &audience {
            if tags.is_empty() {
                return Err(CampaignError::Validation(
                    "select at least one tag for a tag-targeted campaign".to_string(),
                ));
            }
        }
        Ok(CampaignDraft {
            audience: Some(audience),
            ..self
        })
    }

    /// Paso 3: intervalo entre mensajes.
    pub fn with_delay_secs(self, seconds: u64) -> Result<Self, CampaignError> {
        if !(MIN_DELAY_SECS..=MAX_DELAY_SECS).contains(&seconds) {
            return Err(CampaignError::Validation(format!(
                "delay must be between {} and {} seconds, got {}",
                MIN_DELAY_SECS, MAX_DELAY_SECS, seconds
            )));
        }
        Ok(CampaignDraft {
            delay: Duration::from_secs(seconds),
            ..self
        })
    }

    pub fn build(self) -> Result<ValidatedCampaign, CampaignError> {
        let audience = self
            .audience
            .ok_or_else(|| CampaignError::Validation("an audience must be selected".to_string()))?;
        Ok(ValidatedCampaign {
            name: self.name,
            template_id: self.template_id,
            audience,
            delay: self.delay,
        })
    }
}

impl TryFrom<&StartCampaignRequest> for ValidatedCampaign {
    type Error = CampaignError;

    fn try_from(req: &StartCampaignRequest) -> Result<Self, Self::Error> {
        let audience = AudienceTarget::from_selection(req.target_type, &req.selected_tags)?;
        CampaignDraft::new(&req.name, &req.template_id)?
            .with_audience(audience)?
            .with_delay_secs(req.delay_seconds.unwrap_or(DEFAULT_DELAY_SECS))?
            .build()
    }
}
