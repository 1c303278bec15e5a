//! models/message_model.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Failed,
}

/// Registro de un intento de envío a un contacto dentro de una campaña.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: String,
    pub campaign_id: String,
    pub contact_id: String,
    pub content: String,
    pub status: MessageStatus,
    pub error_message: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Resultado de un envío, antes de persistirlo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    Sent,
    Failed(String),
}

impl MessageOutcome {
    pub fn status(&self) -> MessageStatus {
        match self {
            MessageOutcome::Sent => MessageStatus::Sent,
            MessageOutcome::Failed(_) => MessageStatus::Failed,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MessageOutcome::Sent => None,
            MessageOutcome::Failed(note) => Some(note.as_str()),
        }
    }
}
