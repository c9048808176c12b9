//! Health handler

use actix_web::{web, HttpResponse};

use crate::handlers::resource;
use crate::services::{HealthService, HealthStatus};
use crate::AppState;

/// GET /health
///
/// 200 when the store answers, 503 otherwise.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let health = HealthService::new(state.store.clone()).check_health().await;

    match health.status {
        HealthStatus::Healthy => HttpResponse::Ok().json(health),
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(health),
    }
}

/// Configure health routes
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/health").route(web::get().to(health_check)));
}
