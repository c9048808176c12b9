pub mod agents;
pub mod health;
pub mod reviews;
pub mod saved;

#[cfg(test)]
mod agents_http_tests;



use actix_web::{web, Resource};

use crate::error::AppError;

pub use agents::configure_agent_routes;
pub use health::configure_health_routes;
pub use reviews::configure_review_routes;
pub use saved::configure_saved_routes;

/// Configure every `/api` route
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_agent_routes)
        .configure(configure_review_routes)
        .configure(configure_saved_routes);
}

/// Resource with the shared extractor error handling and a 405 fallback for
/// verbs it does not register
pub(crate) fn resource(path: &str) -> Resource {
    web::resource(path)
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            AppError::bad_request(format!("Invalid JSON body: {err}")).into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            AppError::bad_request(format!("Invalid query string: {err}")).into()
        }))
        .app_data(web::PathConfig::default().error_handler(|_err, req| {
            AppError::NotFound(format!("No agent at {}", req.path())).into()
        }))
        .default_service(web::to(method_not_allowed))
}

async fn method_not_allowed() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}
