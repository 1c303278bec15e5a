//! services/message_service.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::models::message_model::{Message, MessageOutcome, MessageStatus};

#[derive(Clone, Debug)]
pub struct MessageService {
    db_pool: Pool<Sqlite>,
}

impl MessageService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        MessageService { db_pool }
    }

    /// Un registro por intento, junto con `sent_count + 1` de la campaña.
    /// Ambos van en la misma transacción: o quedan los dos o ninguno.
    /// `sent_at` solo se llena si el envío salió bien.
    pub async fn record_message(
        &self,
        campaign_id: &str,
        contact_id: &str,
        content: &str,
        outcome: &MessageOutcome,
    ) -> Result<Message> {
        let now = Utc::now();
        let message = Message {
            id: Uuid::new_v4().to_string(),
            campaign_id: campaign_id.to_string(),
            contact_id: contact_id.to_string(),
            content: content.to_string(),
            status: outcome.status(),
            error_message: outcome.error().map(str::to_string),
            sent_at: match outcome {
                MessageOutcome::Sent => Some(now),
                MessageOutcome::Failed(_) => None,
            },
            created_at: now,
        };

        let mut tx = self
            .db_pool
            .begin()
            .await
            .context("Failed to open message transaction")?;

        sqlx::query(
            r#"
            INSERT INTO messages (
                id, campaign_id, contact_id, content, status,
                error_message, sent_at, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&message.id)
        .bind(&message.campaign_id)
        .bind(&message.contact_id)
        .bind(&message.content)
        .bind(message.status)
        .bind(&message.error_message)
        .bind(message.sent_at)
        .bind(message.created_at)
        .execute(&mut *tx)
        .await
        .context("Failed to insert message")?;

        sqlx::query("UPDATE campaigns SET sent_count = sent_count + 1 WHERE id = ?1")
            .bind(campaign_id)
            .execute(&mut *tx)
            .await
            .context("Failed to increment campaign sent_count")?;

        tx.commit()
            .await
            .context("Failed to commit message transaction")?;

        Ok(message)
    }

    pub async fn list_for_campaign(&self, campaign_id: &str) -> Result<Vec<Message>> {
        let messages: Vec<Message> = sqlx::query_as(
            r#"
            SELECT id, campaign_id, contact_id, content, status,
                   error_message, sent_at, created_at
            FROM messages
            WHERE campaign_id = ?1
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(campaign_id)
        .fetch_all(&self.db_pool)
        .await
        .context("Failed to list campaign messages")?;

        Ok(messages)
    }

    /// Mensajes enviados con éxito desde `since`, para las campañas del usuario.
    pub async fn count_sent_since(&self, user_id: &str, since: DateTime<Utc>) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM messages m
            INNER JOIN campaigns c ON c.id = m.campaign_id
            WHERE c.user_id = ?1 AND m.status = ?2 AND m.sent_at >= ?3
            "#,
        )
        .bind(user_id)
        .bind(MessageStatus::Sent)
        .bind(since)
        .fetch_one(&self.db_pool)
        .await
        .context("Failed to count sent messages")?;
        Ok(count)
    }

    /// Estados de los últimos `limit` mensajes del usuario.
    pub async fn recent_statuses(&self, user_id: &str, limit: u32) -> Result<Vec<MessageStatus>> {
        let statuses: Vec<MessageStatus> = sqlx::query_scalar(
            r#"
            SELECT m.status
            FROM messages m
            INNER JOIN campaigns c ON c.id = m.campaign_id
            WHERE c.user_id = ?1
            ORDER BY m.created_at DESC, m.rowid DESC
            LIMIT ?2
            "#,
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.db_pool)
        .await
        .context("Failed to load recent message statuses")?;
        Ok(statuses)
    }
}
