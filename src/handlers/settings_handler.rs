//! handlers/settings_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::handlers::user::UserId;
use crate::models::profile_model::{ConnectionTestResponse, TestMessageRequest, UpdateProfileRequest};
use crate::services::{gateway_service::MessageGateway, profile_service::ProfileService};

fn missing_credentials() -> HttpResponse {
    HttpResponse::PreconditionFailed().json(ConnectionTestResponse {
        success: false,
        message: "Configure the gateway API key and instance id first".to_string(),
    })
}

/// GET /api/settings
pub async fn get_settings_endpoint(
    user: UserId,
    profile_service: web::Data<ProfileService>,
) -> HttpResponse {
    match profile_service.get_profile(&user.0).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(profile),
        Ok(None) => HttpResponse::Ok().json(json!({
            "id": user.0,
            "gateway_api_key": null,
            "gateway_instance_id": null,
            "webhook_url": null
        })),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "error": e.to_string()
        })),
    }
}

/// PUT /api/settings
pub async fn save_settings_endpoint(
    user: UserId,
    profile_service: web::Data<ProfileService>,
    body: web::Json<UpdateProfileRequest>,
) -> HttpResponse {
    match profile_service.save_profile(&user.0, body.into_inner()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => {
            log::error!("Save settings error: {:?}", e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}

/// POST /api/settings/test-connection
pub async fn test_connection_endpoint(
    user: UserId,
    profile_service: web::Data<ProfileService>,
    gateway: web::Data<dyn MessageGateway>,
) -> HttpResponse {
    let creds = match profile_service.get_credentials(&user.0).await {
        Ok(Some(creds)) => creds,
        Ok(None) => return missing_credentials(),
        Err(e) => {
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    };

    match gateway.fetch_instance_names(&creds.api_key).await {
        Ok(names) if names.iter().any(|n| n == &creds.instance_id) => {
            HttpResponse::Ok().json(ConnectionTestResponse {
                success: true,
                message: format!("Connected. Instance \"{}\" found.", creds.instance_id),
            })
        }
        Ok(_) => HttpResponse::Ok().json(ConnectionTestResponse {
            success: false,
            message: "API key is valid but the instance was not found".to_string(),
        }),
        Err(e) => HttpResponse::BadGateway().json(ConnectionTestResponse {
            success: false,
            message: format!("Connection error: {:#}", e),
        }),
    }
}

/// POST /api/settings/test-message
pub async fn test_message_endpoint(
    user: UserId,
    profile_service: web::Data<ProfileService>,
    gateway: web::Data<dyn MessageGateway>,
    body: web::Json<TestMessageRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    if req.number.trim().is_empty() || req.text.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": "number and text are required"
        }));
    }

    let creds = match profile_service.get_credentials(&user.0).await {
        Ok(Some(creds)) => creds,
        Ok(None) => return missing_credentials(),
        Err(e) => {
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    };

    match gateway.send_text(&creds, &req.number, &req.text).await {
        Ok(()) => HttpResponse::Ok().json(ConnectionTestResponse {
            success: true,
            message: "Test message sent".to_string(),
        }),
        Err(e) => HttpResponse::BadGateway().json(ConnectionTestResponse {
            success: false,
            message: format!("Send failed: {:#}", e),
        }),
    }
}
