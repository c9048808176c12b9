//! Review model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lowest accepted star rating
pub const MIN_RATING: i64 = 1;

/// Highest accepted star rating
pub const MAX_RATING: i64 = 5;

/// A user's rating and comment for one agent. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub agent_id: Uuid,
    /// Author identity
    pub user_id: String,
    pub user_name: String,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Raw body for `POST /agents/{id}/reviews`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReviewRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Validated review ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub agent_id: Uuid,
    pub user_id: String,
    pub user_name: String,
    pub rating: i32,
    pub content: String,
}
