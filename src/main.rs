use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_directory::{handlers, AppState, Config, PgDirectoryStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agent_directory=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fail fast on missing connection settings
    let config = Config::from_env().map_err(std::io::Error::other)?;

    info!("Starting agent directory on {}:{}", config.host, config.port);

    let store = PgDirectoryStore::connect(&config)
        .await
        .map_err(std::io::Error::other)?;

    store.migrate().await.map_err(std::io::Error::other)?;

    let server_addr = format!("{}:{}", config.host, config.port);

    let app_state = web::Data::new(AppState {
        store: Arc::new(store),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(handlers::configure_health_routes)
            .service(web::scope("/api").configure(handlers::configure_api_routes))
    })
    .bind(&server_addr)?
    .run()
    .await
}
