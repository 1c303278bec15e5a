//! handlers/template_handler.rs
use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::json;

use crate::error::SaveError;
use crate::handlers::user::UserId;
use crate::models::template_model::SaveTemplateRequest;
use crate::services::template_service::TemplateService;

fn save_error(e: SaveError) -> HttpResponse {
    let status_code = match &e {
        SaveError::Validation(_) => StatusCode::BAD_REQUEST,
        SaveError::Storage(_) => {
            log::error!("(save_error) {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    HttpResponse::build(status_code).json(json!({
        "success": false,
        "error": e.to_string()
    }))
}

/// GET /api/templates
pub async fn list_templates_endpoint(
    user: UserId,
    template_service: web::Data<TemplateService>,
) -> HttpResponse {
    match template_service.list_templates(&user.0).await {
        Ok(templates) => HttpResponse::Ok().json(templates),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "error": e.to_string()
        })),
    }
}

/// POST /api/templates
pub async fn create_template_endpoint(
    user: UserId,
    template_service: web::Data<TemplateService>,
    body: web::Json<SaveTemplateRequest>,
) -> HttpResponse {
    match template_service
        .create_template(&user.0, body.into_inner())
        .await
    {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => save_error(e),
    }
}

/// PUT /api/templates/{id}
pub async fn update_template_endpoint(
    user: UserId,
    template_service: web::Data<TemplateService>,
    path: web::Path<String>,
    body: web::Json<SaveTemplateRequest>,
) -> HttpResponse {
    let template_id = path.into_inner();

    match template_service
        .update_template(&user.0, &template_id, body.into_inner())
        .await
    {
        Ok(Some(template)) => HttpResponse::Ok().json(template),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "success": false,
            "error": "Template not found"
        })),
        Err(e) => save_error(e),
    }
}

/// DELETE /api/templates/{id}
pub async fn delete_template_endpoint(
    user: UserId,
    template_service: web::Data<TemplateService>,
    path: web::Path<String>,
) -> HttpResponse {
    let template_id = path.into_inner();

    match template_service.delete_template(&user.0, &template_id).await {
        Ok(true) => HttpResponse::Ok().json(json!({ "success": true })),
        Ok(false) => HttpResponse::NotFound().json(json!({
            "success": false,
            "error": "Template not found"
        })),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "error": e.to_string()
        })),
    }
}
