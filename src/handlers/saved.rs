//! Saved-agent handlers

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::resource;
use crate::models::{SaveAgentRequest, SavedQuery};
use crate::services::SavedAgentService;
use crate::AppState;

/// GET /api/agents/{id}/save?user_id=
pub async fn get_saved(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<SavedQuery>,
) -> Result<HttpResponse, AppError> {
    let service = SavedAgentService::new(state.store.clone());
    let status = service
        .is_saved(path.into_inner(), query.user_id.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(status))
}

/// POST /api/agents/{id}/save
///
/// Toggles the bookmark and returns the new state.
pub async fn toggle_saved(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SaveAgentRequest>,
) -> Result<HttpResponse, AppError> {
    let service = SavedAgentService::new(state.store.clone());
    let status = service
        .toggle(path.into_inner(), body.user_id.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(status))
}

/// Configure saved-agent routes
pub fn configure_saved_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        resource("/agents/{id}/save")
            .route(web::get().to(get_saved))
            .route(web::post().to(toggle_saved)),
    );
}
