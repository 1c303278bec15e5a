//! tests/handler_tests.rs
//! Pruebas de los endpoints con `actix_web::test`.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};

    use crate::app::init_app;
    use crate::services::gateway_service::MessageGateway;
    use crate::tests::{FakeGateway, TestEnv, USER};

    macro_rules! app_for {
        ($env:expr) => {{
            let gateway: Arc<dyn MessageGateway> = $env.gateway.clone();
            test::init_service(
                App::new()
                    .app_data(web::Data::new($env.contacts.clone()))
                    .app_data(web::Data::new($env.templates.clone()))
                    .app_data(web::Data::new($env.campaigns.clone()))
                    .app_data(web::Data::new($env.messages.clone()))
                    .app_data(web::Data::new($env.profiles.clone()))
                    .app_data(web::Data::new($env.dispatcher.clone()))
                    .app_data(web::Data::from(gateway))
                    .configure(init_app),
            )
            .await
        }};
    }

    #[actix_rt::test]
    async fn test_missing_user_header_is_unauthorized() {
        let env = TestEnv::new(FakeGateway::default()).await;
        let app = app_for!(env);

        let req = test::TestRequest::get().uri("/api/contacts").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_contact_endpoints() {
        let env = TestEnv::new(FakeGateway::default()).await;
        let app = app_for!(env);

        let req = test::TestRequest::post()
            .uri("/api/contacts")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({ "name": "Ana", "phone": "+55 11 1111-1111", "tags": ["vip", " vip "] }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["phone"], "551111111111");
        assert_eq!(created["tags"], json!(["vip"]));

        let req = test::TestRequest::post()
            .uri("/api/contacts")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({ "name": "", "phone": "123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/contacts/tags")
            .insert_header(("X-User-Id", USER))
            .to_request();
        let tags: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(tags, json!(["vip"]));

        let req = test::TestRequest::get()
            .uri("/api/contacts?search=an")
            .insert_header(("X-User-Id", USER))
            .to_request();
        let found: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(found.as_array().map(|a| a.len()), Some(1));
    }

    #[actix_rt::test]
    async fn test_start_campaign_validation_and_empty_audience() {
        let env = TestEnv::new(FakeGateway::default()).await;
        env.configure_credentials().await;
        let app = app_for!(env);

        let req = test::TestRequest::post()
            .uri("/api/campaigns")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({ "name": "", "template_id": "x", "target_type": "all" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/templates")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({ "name": "promo", "content": "Oi {{nome}}" }))
            .to_request();
        let tpl: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/campaigns")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({
                "name": "Natal",
                "template_id": tpl["id"],
                "target_type": "tags",
                "selected_tags": ["vip"]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_rt::test]
    async fn test_start_campaign_waiting_for_completion() {
        let env = TestEnv::new(FakeGateway::default()).await;
        env.configure_credentials().await;
        env.add_contact("Ana", "11 1111-1111", &["vip"]).await;
        let app = app_for!(env);

        let req = test::TestRequest::post()
            .uri("/api/templates")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({ "name": "promo", "content": "Hello {{nome}}!" }))
            .to_request();
        let tpl: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/campaigns")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({
                "name": "Natal",
                "template_id": tpl["id"],
                "target_type": "all",
                "delay_seconds": 2,
                "wait_for_completion": true
            }))
            .to_request();
        let started: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(started["success"], true);
        assert_eq!(started["total_count"], 1);
        assert_eq!(started["summary"]["sent"], 1);

        let campaign_id = started["campaign_id"].as_str().unwrap().to_string();
        let req = test::TestRequest::get()
            .uri(&format!("/api/campaigns/{}", campaign_id))
            .insert_header(("X-User-Id", USER))
            .to_request();
        let detail: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(detail["campaign"]["status"], "processing");
        assert_eq!(detail["campaign"]["sent_count"], 1);
        assert_eq!(detail["messages"][0]["status"], "sent");
        assert!(detail["messages"][0]["content"]
            .as_str()
            .unwrap()
            .starts_with("Hello Ana!"));

        // Otro usuario no ve la campaña
        let req = test::TestRequest::get()
            .uri(&format!("/api/campaigns/{}", campaign_id))
            .insert_header(("X-User-Id", "intruder"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_save_errors_map_to_status() {
        let env = TestEnv::new(FakeGateway::default()).await;
        let app = app_for!(env);

        let req = test::TestRequest::post()
            .uri("/api/templates")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({ "name": "promo", "content": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put()
            .uri("/api/templates/unknown")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({ "name": "promo", "content": "Oi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // Un mensaje de la base que mencione "required" sigue siendo 500
        sqlx::query(
            "CREATE TRIGGER reject_contacts BEFORE INSERT ON contacts \
             BEGIN SELECT RAISE(ABORT, 'NOT NULL constraint required'); END",
        )
        .execute(&env.pool)
        .await
        .unwrap();
        let req = test::TestRequest::post()
            .uri("/api/contacts")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({ "name": "Ana", "phone": "11 1111-1111" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_rt::test]
    async fn test_start_campaign_in_background() {
        let env = TestEnv::new(FakeGateway::default()).await;
        env.configure_credentials().await;
        env.add_contact("Ana", "11 1111-1111", &[]).await;
        let app = app_for!(env);

        let req = test::TestRequest::post()
            .uri("/api/templates")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({ "name": "promo", "content": "Hello {{nome}}!" }))
            .to_request();
        let tpl: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/campaigns")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({
                "name": "Natal",
                "template_id": tpl["id"],
                "target_type": "all",
                "delay_seconds": 2
            }))
            .to_request();
        let started: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(started["success"], true);
        assert_eq!(started["total_count"], 1);
        assert_eq!(started["message"], "Campaign queued for dispatch");
        assert!(started.get("summary").is_none());

        // El loop corre en una tarea aparte; se consulta hasta que drene.
        let uri = format!("/api/campaigns/{}", started["campaign_id"].as_str().unwrap());
        let mut detail = Value::Null;
        for _ in 0..200 {
            let req = test::TestRequest::get()
                .uri(&uri)
                .insert_header(("X-User-Id", USER))
                .to_request();
            detail = test::call_and_read_body_json(&app, req).await;
            if detail["campaign"]["sent_count"] == detail["campaign"]["total_count"] {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        assert_eq!(detail["campaign"]["sent_count"], 1);
        assert_eq!(detail["campaign"]["total_count"], 1);
        assert_eq!(detail["campaign"]["status"], "processing");
        assert_eq!(detail["messages"].as_array().unwrap().len(), 1);
        assert_eq!(detail["messages"][0]["status"], "sent");
        assert_eq!(env.gateway.sent().len(), 1);
    }

    #[actix_rt::test]
    async fn test_start_campaign_without_credentials() {
        let env = TestEnv::new(FakeGateway::default()).await;
        env.add_contact("Ana", "11 1111-1111", &[]).await;
        let app = app_for!(env);

        let req = test::TestRequest::post()
            .uri("/api/campaigns")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({ "name": "Natal", "template_id": "tpl", "target_type": "all" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
    }

    #[actix_rt::test]
    async fn test_settings_connection_check() {
        let env = TestEnv::new(FakeGateway {
            instances: vec!["instance-a".to_string()],
            ..FakeGateway::default()
        })
        .await;
        let app = app_for!(env);

        let req = test::TestRequest::post()
            .uri("/api/settings/test-connection")
            .insert_header(("X-User-Id", USER))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);

        let req = test::TestRequest::put()
            .uri("/api/settings")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({
                "gateway_api_key": "key-123",
                "gateway_instance_id": "instance-a",
                "webhook_url": ""
            }))
            .to_request();
        let saved: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(saved["webhook_url"], Value::Null);

        let req = test::TestRequest::post()
            .uri("/api/settings/test-connection")
            .insert_header(("X-User-Id", USER))
            .to_request();
        let result: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(result["success"], true);

        let req = test::TestRequest::post()
            .uri("/api/settings/test-message")
            .insert_header(("X-User-Id", USER))
            .set_json(json!({ "number": "+55 11 1111-1111", "text": "ping" }))
            .to_request();
        let result: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(result["success"], true);
        assert_eq!(
            env.gateway.sent(),
            vec![("551111111111".to_string(), "ping".to_string())]
        );
    }
}
