//! Agent Directory - a community directory for AI agents
//!
//! Users browse, submit, vote on, review and bookmark listed agents. This crate
//! provides the HTTP API, the services behind it and the store they run on.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::{Config, ConfigError};
pub use error::AppError;

pub use models::{
    Agent, AgentResponse, Category, CreateAgentRequest, CreateReviewRequest, NewAgent, NewReview,
    Review, SavedStatus, VoteDirection,
};

pub use services::{
    AgentCatalogService, AggregationService, DirectoryStore, HealthService,
    MemoryDirectoryStore, PgDirectoryStore, RatingAggregate, ReviewService, SavedAgentService,
    StoreError, score,
};

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<dyn DirectoryStore>,
}
