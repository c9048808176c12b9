//! Agent model and related types
//!
//! A listed AI agent, the submission payload, and vote directions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::services::scoring;

/// Category value that disables filtering when listing agents
pub const ALL_CATEGORIES: &str = "All";

/// Fixed set of directory categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "agent_category")]
pub enum Category {
    Development,
    Coding,
    Analytics,
    Research,
    #[serde(rename = "Customer Service")]
    #[sqlx(rename = "Customer Service")]
    CustomerService,
    Marketing,
    Productivity,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Development,
        Self::Coding,
        Self::Analytics,
        Self::Research,
        Self::CustomerService,
        Self::Marketing,
        Self::Productivity,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "Development",
            Self::Coding => "Coding",
            Self::Analytics => "Analytics",
            Self::Research => "Research",
            Self::CustomerService => "Customer Service",
            Self::Marketing => "Marketing",
            Self::Productivity => "Productivity",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(Category::as_str).collect();
                format!("Invalid category: {s}. Valid values are: {}", valid.join(", "))
            })
    }
}

/// Agent row as stored in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub github_url: Option<String>,
    pub mcp_endpoint: Option<String>,
    /// Submitting user, absent for anonymous submissions
    pub user_id: Option<String>,
    pub upvotes: i32,
    pub downvotes: i32,
    /// Mean review rating rounded to one decimal; null until the first review
    pub avg_rating: Option<f64>,
    pub total_reviews: i32,
    pub created_at: DateTime<Utc>,
}

/// Raw submission body for `POST /agents`
///
/// Every field is optional so that validation can report all problems at once.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAgentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub mcp_endpoint: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Validated agent ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub github_url: Option<String>,
    pub mcp_endpoint: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

impl FromStr for VoteDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err("direction must be 'up' or 'down'".to_string()),
        }
    }
}

/// Request body for `POST /agents/{id}/vote`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub direction: Option<String>,
}

/// Query parameters for `GET /agents`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAgentsQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Agent document returned by the API, with its derived display score
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    #[serde(flatten)]
    pub agent: Agent,
    pub score: f64,
}

impl From<Agent> for AgentResponse {
    fn from(agent: Agent) -> Self {
        let score = scoring::score(&agent);
        Self { agent, score }
    }
}
