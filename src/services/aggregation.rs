//! Rating Aggregation Service
//!
//! Keeps the denormalized `avg_rating` / `total_reviews` columns of an agent in
//! step with its reviews. The aggregate is always recomputed from the full set
//! of reviews, never adjusted incrementally, so a later successful recompute
//! repairs any earlier failed one.

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::services::scoring::round_ratio_to_tenth;
use crate::services::store::{DirectoryStore, StoreError};

/// Review aggregate for one agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingAggregate {
    /// `None` iff `total_reviews == 0`
    pub avg_rating: Option<f64>,
    pub total_reviews: i32,
}

impl RatingAggregate {
    pub const EMPTY: RatingAggregate = RatingAggregate {
        avg_rating: None,
        total_reviews: 0,
    };

    /// Aggregate over individual ratings
    pub fn from_ratings(ratings: &[i32]) -> Self {
        let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
        Self::from_totals(ratings.len() as i64, sum)
    }

    /// Aggregate from a review count and the sum of their ratings
    pub fn from_totals(count: i64, sum: i64) -> Self {
        if count <= 0 {
            return Self::EMPTY;
        }
        Self {
            avg_rating: Some(round_ratio_to_tenth(sum, count)),
            total_reviews: i32::try_from(count).unwrap_or(i32::MAX),
        }
    }
}

/// Recomputes agent aggregates through the directory store
#[derive(Clone)]
pub struct AggregationService {
    store: Arc<dyn DirectoryStore>,
}

impl AggregationService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Recompute and persist the aggregate for `agent_id`.
    ///
    /// Returns `Ok(None)` if the agent no longer exists.
    pub async fn recompute(&self, agent_id: Uuid) -> Result<Option<RatingAggregate>, StoreError> {
        let aggregate = self.store.refresh_rating_aggregate(agent_id).await?;
        if let Some(ref agg) = aggregate {
            debug!(
                %agent_id,
                avg_rating = ?agg.avg_rating,
                total_reviews = agg.total_reviews,
                "Rating aggregate refreshed"
            );
        }
        Ok(aggregate)
    }
}
