//! Review Service
//!
//! Review submission and listing. Every successful insert is followed by a
//! best-effort refresh of the agent's rating aggregate.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{CreateReviewRequest, MAX_RATING, MIN_RATING, NewReview, Review};
use crate::services::aggregation::AggregationService;
use crate::services::store::{DirectoryStore, StoreError};
use crate::services::validation::{self, FieldErrors};

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Agent not found: {0}")]
    AgentNotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn DirectoryStore>,
    aggregation: AggregationService,
}

impl ReviewService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self {
            aggregation: AggregationService::new(store.clone()),
            store,
        }
    }

    /// Reviews for an agent, newest first. An unknown agent has no reviews.
    pub async fn list_for_agent(&self, agent_id: Uuid) -> Result<Vec<Review>, ReviewError> {
        Ok(self.store.list_reviews(agent_id).await?)
    }

    /// Validate and store a review, then refresh the agent's aggregate.
    ///
    /// The review is durable once inserted; a failed aggregate refresh is only
    /// logged and the stale aggregate is repaired by the next refresh.
    pub async fn create(
        &self,
        agent_id: Uuid,
        request: CreateReviewRequest,
    ) -> Result<Review, ReviewError> {
        let new_review = validate_review(agent_id, &request).map_err(ReviewError::Validation)?;

        if self.store.get_agent(agent_id).await?.is_none() {
            return Err(ReviewError::AgentNotFound(agent_id));
        }

        let review = self.store.insert_review(new_review).await?;

        info!(
            review_id = %review.id,
            %agent_id,
            rating = review.rating,
            "Review created"
        );

        match self.aggregation.recompute(agent_id).await {
            Ok(Some(_)) => {}
            Ok(None) => warn!(
                %agent_id,
                review_id = %review.id,
                "Agent disappeared before its rating aggregate could be refreshed"
            ),
            Err(e) => warn!(
                %agent_id,
                review_id = %review.id,
                error = %e,
                "Failed to refresh rating aggregate; it stays stale until the next review"
            ),
        }

        Ok(review)
    }
}

/// Check a review body against the submission rules
pub fn validate_review(
    agent_id: Uuid,
    request: &CreateReviewRequest,
) -> Result<NewReview, FieldErrors> {
    let mut errors = FieldErrors::new();

    let user_id = validation::required_text(&mut errors, "user_id", request.user_id.as_deref(), None);
    let user_name =
        validation::required_text(&mut errors, "user_name", request.user_name.as_deref(), None);
    let content = validation::required_text(&mut errors, "content", request.content.as_deref(), None);

    let rating = match request.rating {
        None => {
            errors.add("rating", "rating is required");
            None
        }
        Some(r) if !(MIN_RATING..=MAX_RATING).contains(&r) => {
            errors.add(
                "rating",
                format!("rating must be between {MIN_RATING} and {MAX_RATING}"),
            );
            None
        }
        Some(r) => i32::try_from(r).ok(),
    };

    match (user_id, user_name, content, rating) {
        (Some(user_id), Some(user_name), Some(content), Some(rating)) if errors.is_empty() => {
            Ok(NewReview {
                agent_id,
                user_id,
                user_name,
                rating,
                content,
            })
        }
        _ => Err(errors),
    }
}
