//! Agent handlers
//!
//! HTTP handlers for listing, fetching, submitting and voting on agents.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::resource;
use crate::models::{AgentResponse, CreateAgentRequest, ListAgentsQuery, VoteRequest};
use crate::services::AgentCatalogService;
use crate::AppState;

/// GET /api/agents?category=
///
/// All agents newest first, optionally filtered by category.
pub async fn list_agents(
    state: web::Data<AppState>,
    query: web::Query<ListAgentsQuery>,
) -> Result<HttpResponse, AppError> {
    let catalog = AgentCatalogService::new(state.store.clone());

    let agents: Vec<AgentResponse> = catalog
        .list(query.category.as_deref())
        .await?
        .into_iter()
        .map(AgentResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(agents))
}

/// POST /api/agents
///
/// Submit a new agent. Returns 201 with the stored row.
pub async fn create_agent(
    state: web::Data<AppState>,
    body: web::Json<CreateAgentRequest>,
) -> Result<HttpResponse, AppError> {
    let catalog = AgentCatalogService::new(state.store.clone());
    let agent = catalog.create(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(AgentResponse::from(agent)))
}

/// GET /api/agents/{id}
pub async fn get_agent(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let catalog = AgentCatalogService::new(state.store.clone());
    let agent = catalog.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AgentResponse::from(agent)))
}

/// POST /api/agents/{id}/vote
///
/// Body: `{"direction": "up" | "down"}`. Returns the updated agent.
pub async fn vote_agent(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<VoteRequest>,
) -> Result<HttpResponse, AppError> {
    let catalog = AgentCatalogService::new(state.store.clone());
    let agent = catalog.vote(path.into_inner(), body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AgentResponse::from(agent)))
}

/// Configure agent routes
pub fn configure_agent_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        resource("/agents")
            .route(web::get().to(list_agents))
            .route(web::post().to(create_agent)),
    )
    .service(resource("/agents/{id}").route(web::get().to(get_agent)))
    .service(resource("/agents/{id}/vote").route(web::post().to(vote_agent)));
}
