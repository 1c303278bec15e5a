//! handlers/campaign_handler.rs
use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::json;

use crate::error::CampaignError;
use crate::handlers::user::UserId;
use crate::models::campaign_draft::ValidatedCampaign;
use crate::models::campaign_model::{CampaignDetail, StartCampaignRequest, StartCampaignResponse};
use crate::services::{
    campaign_service::CampaignService, dispatch_service::CampaignDispatcher,
    message_service::MessageService,
};

fn campaign_error_response(e: &CampaignError) -> HttpResponse {
    let status_code = match e {
        CampaignError::Validation(_) => StatusCode::BAD_REQUEST,
        CampaignError::MissingCredentials => StatusCode::PRECONDITION_FAILED,
        CampaignError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
        CampaignError::EmptyAudience => StatusCode::UNPROCESSABLE_ENTITY,
        CampaignError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    HttpResponse::build(status_code).json(json!({
        "success": false,
        "error": e.to_string()
    }))
}

/// POST /api/campaigns
pub async fn start_campaign_endpoint(
    user: UserId,
    dispatcher: web::Data<CampaignDispatcher>,
    body: web::Json<StartCampaignRequest>,
) -> HttpResponse {
    let req = body.into_inner();

    let draft = match ValidatedCampaign::try_from(&req) {
        Ok(draft) => draft,
        Err(e) => return campaign_error_response(&e),
    };

    let job = match dispatcher.start(&user.0, draft).await {
        Ok(job) => job,
        Err(e) => {
            log::error!("(start_campaign_endpoint) {}", e);
            return campaign_error_response(&e);
        }
    };

    let campaign_id = job.campaign.id.clone();
    let total_count = job.contacts.len();

    if req.wait_for_completion {
        let summary = dispatcher.run(job).await;
        HttpResponse::Ok().json(StartCampaignResponse {
            success: true,
            campaign_id,
            total_count,
            message: "Campaign dispatched".to_string(),
            summary: Some(summary),
        })
    } else {
        // El loop vive solo en memoria: si el proceso muere, la campaña
        // queda en "processing".
        let dispatcher = dispatcher.get_ref().clone();
        tokio::spawn(async move {
            dispatcher.run(job).await;
        });

        HttpResponse::Ok().json(StartCampaignResponse {
            success: true,
            campaign_id,
            total_count,
            message: "Campaign queued for dispatch".to_string(),
            summary: None,
        })
    }
}

/// GET /api/campaigns
pub async fn list_campaigns_endpoint(
    user: UserId,
    campaign_service: web::Data<CampaignService>,
) -> HttpResponse {
    match campaign_service.list_campaigns(&user.0, None).await {
        Ok(campaigns) => HttpResponse::Ok().json(campaigns),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "error": e.to_string()
        })),
    }
}

/// GET /api/campaigns/{id}
pub async fn get_campaign_endpoint(
    user: UserId,
    campaign_service: web::Data<CampaignService>,
    message_service: web::Data<MessageService>,
    path: web::Path<String>,
) -> HttpResponse {
    let campaign_id = path.into_inner();

    let campaign = match campaign_service.get_campaign(&user.0, &campaign_id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return HttpResponse::NotFound().json(json!({
                "success": false,
                "error": "Campaign not found"
            }))
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": e.to_string()
            }))
        }
    };

    match message_service.list_for_campaign(&campaign.id).await {
        Ok(messages) => HttpResponse::Ok().json(CampaignDetail { campaign, messages }),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "error": e.to_string()
        })),
    }
}
