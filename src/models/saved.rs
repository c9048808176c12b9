//! Saved-agent (bookmark) types

use serde::{Deserialize, Serialize};

/// Body for `POST /agents/{id}/save`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveAgentRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Query parameters for `GET /agents/{id}/save`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Saved state of an agent for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedStatus {
    pub saved: bool,
}
