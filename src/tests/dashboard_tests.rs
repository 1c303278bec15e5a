//! tests/dashboard_tests.rs

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::models::campaign_draft::{AudienceTarget, ValidatedCampaign};
    use crate::models::message_model::MessageStatus;
    use crate::models::template_model::SaveTemplateRequest;
    use crate::services::dashboard_service::{delivery_rate, DashboardService};
    use crate::tests::{FakeGateway, TestEnv, USER};

    #[test]
    fn test_delivery_rate_formatting() {
        assert_eq!(delivery_rate(&[]), "100%");
        assert_eq!(
            delivery_rate(&[MessageStatus::Sent, MessageStatus::Sent, MessageStatus::Failed]),
            "66.7%"
        );
        assert_eq!(delivery_rate(&[MessageStatus::Failed]), "0.0%");
    }

    #[actix_rt::test]
    async fn test_dashboard_counts() {
        let env = TestEnv::new(FakeGateway::failing(&["2222222222"])).await;
        env.configure_credentials().await;
        env.add_contact("Ana", "11 1111-1111", &[]).await;
        env.add_contact("Bia", "22 2222-2222", &[]).await;
        let tpl = env
            .templates
            .create_template(
                USER,
                SaveTemplateRequest {
                    name: "promo".to_string(),
                    content: "Oi {{nome}}".to_string(),
                    category: None,
                },
            )
            .await
            .unwrap();

        let mut job = env
            .dispatcher
            .start(
                USER,
                ValidatedCampaign {
                    name: "Natal".to_string(),
                    template_id: tpl.id,
                    audience: AudienceTarget::All,
                    delay: Duration::ZERO,
                },
            )
            .await
            .unwrap();
        job.delay = Duration::ZERO;
        env.dispatcher.run(job).await;

        let dashboard = DashboardService::new(
            env.contacts.clone(),
            env.campaigns.clone(),
            env.messages.clone(),
        );
        let stats = dashboard.stats(USER).await.unwrap();
        assert_eq!(stats.total_contacts, 2);
        assert_eq!(stats.active_campaigns, 1);
        assert_eq!(stats.sent_today, 1);
        assert_eq!(stats.delivery_rate, "50.0%");
        assert_eq!(stats.recent_campaigns.len(), 1);

        let empty = dashboard.stats("nobody").await.unwrap();
        assert_eq!(empty.total_contacts, 0);
        assert_eq!(empty.delivery_rate, "100%");
    }
}
