//! app.rs
use crate::handlers::{
    campaign_handler, contact_handler, dashboard_handler, settings_handler, template_handler,
};
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/contacts")
                    .route("", web::get().to(contact_handler::list_contacts_endpoint))
                    .route("", web::post().to(contact_handler::create_contact_endpoint))
                    .route("/tags", web::get().to(contact_handler::list_tags_endpoint))
                    .route(
                        "/{id}",
                        web::delete().to(contact_handler::delete_contact_endpoint),
                    ),
            )
            .service(
                web::scope("/templates")
                    .route("", web::get().to(template_handler::list_templates_endpoint))
                    .route("", web::post().to(template_handler::create_template_endpoint))
                    .route(
                        "/{id}",
                        web::put().to(template_handler::update_template_endpoint),
                    )
                    .route(
                        "/{id}",
                        web::delete().to(template_handler::delete_template_endpoint),
                    ),
            )
            .service(
                web::scope("/campaigns")
                    .route("", web::get().to(campaign_handler::list_campaigns_endpoint))
                    .route("", web::post().to(campaign_handler::start_campaign_endpoint))
                    .route(
                        "/{id}",
                        web::get().to(campaign_handler::get_campaign_endpoint),
                    ),
            )
            .service(
                web::scope("/settings")
                    .route("", web::get().to(settings_handler::get_settings_endpoint))
                    .route("", web::put().to(settings_handler::save_settings_endpoint))
                    .route(
                        "/test-connection",
                        web::post().to(settings_handler::test_connection_endpoint),
                    )
                    .route(
                        "/test-message",
                        web::post().to(settings_handler::test_message_endpoint),
                    ),
            )
            .route(
                "/dashboard",
                web::get().to(dashboard_handler::dashboard_endpoint),
            ),
    );
}
