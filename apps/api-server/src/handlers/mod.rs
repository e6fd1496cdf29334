//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpResponse, web};
use masterblog_shared::ErrorResponse;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected request body");
        AppError::BadRequest(ErrorResponse::invalid_json().error).into()
    }))
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Unmatched path parameter");
        AppError::NotFound(ErrorResponse::not_found().error).into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    // Registered before `/{id}` so it is not taken for an id
                    .route("/search", web::get().to(posts::search))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}", web::post().to(posts::attach)),
            ),
    )
    .default_service(web::to(not_found));
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::not_found())
}
