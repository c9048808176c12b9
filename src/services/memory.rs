//! In-process directory store
//!
//! Test support: same contract as the Postgres store, backed by a single
//! `RwLock`. The service and HTTP tests run against it and downstream crates
//! can use it as a test double; the server binary always runs on
//! [`PgDirectoryStore`](crate::services::PgDirectoryStore).
//!
//! Every method takes the lock once, so each call is atomic with respect to
//! the others.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Agent, Category, NewAgent, NewReview, Review, VoteDirection};
use crate::services::aggregation::RatingAggregate;
use crate::services::store::{DirectoryStore, StoreError};

#[derive(Clone, Default)]
pub struct MemoryDirectoryStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    /// Insertion order
    agents: Vec<Agent>,
    /// Insertion order
    reviews: Vec<Review>,
    saved: HashSet<(Uuid, String)>,
}

impl Tables {
    fn agent_mut(&mut self, id: Uuid) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == id)
    }
}

/// Newest first; later inserts win ties on `created_at`
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

impl MemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn list_agents(&self, category: Option<Category>) -> Result<Vec<Agent>, StoreError> {
        let tables = self.inner.read().await;
        let matching: Vec<Agent> = tables
            .agents
            .iter()
            .filter(|a| category.map_or(true, |c| a.category == c))
            .cloned()
            .collect();
        Ok(newest_first(&matching, |a| a.created_at))
    }

    async fn get_agent(&self, id: Uuid) -> Result<Option<Agent>, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables.agents.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_agent(&self, agent: NewAgent) -> Result<Agent, StoreError> {
        let row = Agent {
            id: Uuid::new_v4(),
            name: agent.name,
            description: agent.description,
            category: agent.category,
            github_url: agent.github_url,
            mcp_endpoint: agent.mcp_endpoint,
            user_id: agent.user_id,
            upvotes: 0,
            downvotes: 0,
            avg_rating: None,
            total_reviews: 0,
            created_at: Utc::now(),
        };
        self.inner.write().await.agents.push(row.clone());
        Ok(row)
    }

    async fn increment_vote(
        &self,
        id: Uuid,
        direction: VoteDirection,
    ) -> Result<Option<Agent>, StoreError> {
        let mut tables = self.inner.write().await;
        let Some(agent) = tables.agent_mut(id) else {
            return Ok(None);
        };
        match direction {
            VoteDirection::Up => agent.upvotes += 1,
            VoteDirection::Down => agent.downvotes += 1,
        }
        Ok(Some(agent.clone()))
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let mut tables = self.inner.write().await;
        if !tables.agents.iter().any(|a| a.id == review.agent_id) {
            return Err(StoreError::Constraint(format!(
                "review references unknown agent {}",
                review.agent_id
            )));
        }
        let row = Review {
            id: Uuid::new_v4(),
            agent_id: review.agent_id,
            user_id: review.user_id,
            user_name: review.user_name,
            rating: review.rating,
            content: review.content,
            created_at: Utc::now(),
        };
        tables.reviews.push(row.clone());
        Ok(row)
    }

    async fn list_reviews(&self, agent_id: Uuid) -> Result<Vec<Review>, StoreError> {
        let tables = self.inner.read().await;
        let matching: Vec<Review> = tables
            .reviews
            .iter()
            .filter(|r| r.agent_id == agent_id)
            .cloned()
            .collect();
        Ok(newest_first(&matching, |r| r.created_at))
    }

    async fn refresh_rating_aggregate(
        &self,
        agent_id: Uuid,
    ) -> Result<Option<RatingAggregate>, StoreError> {
        let mut tables = self.inner.write().await;
        let ratings: Vec<i32> = tables
            .reviews
            .iter()
            .filter(|r| r.agent_id == agent_id)
            .map(|r| r.rating)
            .collect();
        let Some(agent) = tables.agent_mut(agent_id) else {
            return Ok(None);
        };
        let aggregate = RatingAggregate::from_ratings(&ratings);
        agent.avg_rating = aggregate.avg_rating;
        agent.total_reviews = aggregate.total_reviews;
        Ok(Some(aggregate))
    }

    async fn is_saved(&self, agent_id: Uuid, user_id: &str) -> Result<bool, StoreError> {
        let tables = self.inner.read().await;
        Ok(tables.saved.contains(&(agent_id, user_id.to_string())))
    }

    async fn set_saved(
        &self,
        agent_id: Uuid,
        user_id: &str,
        saved: bool,
    ) -> Result<(), StoreError> {
        let mut tables = self.inner.write().await;
        if saved {
            if !tables.agents.iter().any(|a| a.id == agent_id) {
                return Err(StoreError::Constraint(format!(
                    "saved agent references unknown agent {agent_id}"
                )));
            }
            tables.saved.insert((agent_id, user_id.to_string()));
        } else {
            tables.saved.remove(&(agent_id, user_id.to_string()));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
