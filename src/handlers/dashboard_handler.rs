//! handlers/dashboard_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::handlers::user::UserId;
use crate::services::dashboard_service::DashboardService;

/// GET /api/dashboard
pub async fn dashboard_endpoint(
    user: UserId,
    dashboard_service: web::Data<DashboardService>,
) -> HttpResponse {
    match dashboard_service.stats(&user.0).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            log::error!("Dashboard error: {:?}", e);
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    }
}
