//! Directory store contract
//!
//! All persistence goes through [`DirectoryStore`]. Implementations must make
//! each method atomic on its own; cross-method sequences (insert a review, then
//! refresh the aggregate) are not transactional and callers must tolerate a
//! failure between steps.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Agent, Category, NewAgent, NewReview, Review, VoteDirection};
use crate::services::aggregation::RatingAggregate;

/// Errors raised by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A relational constraint (foreign key, check) rejected the write
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// All agents, newest first, optionally restricted to one category
    async fn list_agents(&self, category: Option<Category>) -> Result<Vec<Agent>, StoreError>;

    async fn get_agent(&self, id: Uuid) -> Result<Option<Agent>, StoreError>;

    /// Insert with zeroed counters, null average and `created_at = now()`
    async fn insert_agent(&self, agent: NewAgent) -> Result<Agent, StoreError>;

    /// Atomically add one vote. `None` if the agent does not exist.
    async fn increment_vote(
        &self,
        id: Uuid,
        direction: VoteDirection,
    ) -> Result<Option<Agent>, StoreError>;

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError>;

    /// Reviews for one agent, newest first
    async fn list_reviews(&self, agent_id: Uuid) -> Result<Vec<Review>, StoreError>;

    /// Recompute `avg_rating` / `total_reviews` from every stored review of the
    /// agent and write them back. Concurrent refreshes of the same agent must
    /// serialize so the last writer sees all committed reviews.
    async fn refresh_rating_aggregate(
        &self,
        agent_id: Uuid,
    ) -> Result<Option<RatingAggregate>, StoreError>;

    async fn is_saved(&self, agent_id: Uuid, user_id: &str) -> Result<bool, StoreError>;

    /// Idempotently set the saved state of `(agent_id, user_id)`
    async fn set_saved(&self, agent_id: Uuid, user_id: &str, saved: bool)
        -> Result<(), StoreError>;

    /// Cheap connectivity check
    async fn ping(&self) -> Result<(), StoreError>;
}
