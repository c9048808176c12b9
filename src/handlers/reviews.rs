//! Review handlers

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::resource;
use crate::models::CreateReviewRequest;
use crate::services::ReviewService;
use crate::AppState;

/// GET /api/agents/{id}/reviews
///
/// Reviews for the agent, newest first.
pub async fn list_reviews(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let service = ReviewService::new(state.store.clone());
    let reviews = service.list_for_agent(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(reviews))
}

/// POST /api/agents/{id}/reviews
///
/// Body: `{user_id, user_name, rating, content}`. The agent's aggregate rating
/// is refreshed after the insert; a failed refresh does not fail the request.
pub async fn create_review(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let service = ReviewService::new(state.store.clone());
    let review = service.create(path.into_inner(), body.into_inner()).await?;

    Ok(HttpResponse::Created().json(review))
}

/// Configure review routes
pub fn configure_review_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        resource("/agents/{id}/reviews")
            .route(web::get().to(list_reviews))
            .route(web::post().to(create_review)),
    );
}
