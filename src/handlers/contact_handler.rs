//! handlers/contact_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::SaveError;
use crate::handlers::user::UserId;
use crate::models::contact_model::{ContactQuery, CreateContactRequest};
use crate::services::contact_service::ContactService;

/// GET /api/contacts?search=
pub async fn list_contacts_endpoint(
    user: UserId,
    contact_service: web::Data<ContactService>,
    query: web::Query<ContactQuery>,
) -> HttpResponse {
    match contact_service
        .list_contacts(&user.0, query.search.as_deref())
        .await
    {
        Ok(contacts) => HttpResponse::Ok().json(contacts),
        Err(e) => {
            log::error!("List contacts error: {:?}", e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}

/// POST /api/contacts
pub async fn create_contact_endpoint(
    user: UserId,
    contact_service: web::Data<ContactService>,
    body: web::Json<CreateContactRequest>,
) -> HttpResponse {
    match contact_service.create_contact(&user.0, body.into_inner()).await {
        Ok(contact) => HttpResponse::Ok().json(contact),
        Err(SaveError::Validation(msg)) => HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": msg
        })),
        Err(e) => {
            log::error!("(create_contact_endpoint) {}", e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}

/// DELETE /api/contacts/{id}
pub async fn delete_contact_endpoint(
    user: UserId,
    contact_service: web::Data<ContactService>,
    path: web::Path<String>,
) -> HttpResponse {
    let contact_id = path.into_inner();

    match contact_service.delete_contact(&user.0, &contact_id).await {
        Ok(true) => HttpResponse::Ok().json(json!({ "success": true })),
        Ok(false) => HttpResponse::NotFound().json(json!({
            "success": false,
            "error": "Contact not found"
        })),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "error": e.to_string()
        })),
    }
}

/// GET /api/contacts/tags
pub async fn list_tags_endpoint(
    user: UserId,
    contact_service: web::Data<ContactService>,
) -> HttpResponse {
    match contact_service.list_tags(&user.0).await {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "error": e.to_string()
        })),
    }
}
