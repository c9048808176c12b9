//! Agent Catalog Service
//!
//! Listing, lookup, submission and voting for directory agents.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    ALL_CATEGORIES, Agent, Category, CreateAgentRequest, NewAgent, VoteDirection, VoteRequest,
};
use crate::services::store::{DirectoryStore, StoreError};
use crate::services::validation::{self, FieldErrors};

/// Maximum agent name length, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum agent description length, in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Agent not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct AgentCatalogService {
    store: Arc<dyn DirectoryStore>,
}

impl AgentCatalogService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// List agents newest first.
    ///
    /// `None` or `"All"` lists everything. A category outside the fixed set
    /// matches nothing.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Agent>, AgentError> {
        let filter = match category.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => None,
            Some(raw) => match raw.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    debug!(category = raw, "Unknown category filter, returning no agents");
                    return Ok(Vec::new());
                }
            },
        };

        Ok(self.store.list_agents(filter).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Agent, AgentError> {
        self.store
            .get_agent(id)
            .await?
            .ok_or(AgentError::NotFound(id))
    }

    /// Validate and store a new submission
    pub async fn create(&self, request: CreateAgentRequest) -> Result<Agent, AgentError> {
        let new_agent = validate_submission(&request).map_err(AgentError::Validation)?;
        let agent = self.store.insert_agent(new_agent).await?;

        info!(
            agent_id = %agent.id,
            name = %agent.name,
            category = %agent.category,
            "Agent submitted"
        );

        Ok(agent)
    }

    /// Record one up or down vote. Votes are anonymous and unbounded.
    pub async fn vote(&self, id: Uuid, request: VoteRequest) -> Result<Agent, AgentError> {
        let direction = request
            .direction
            .as_deref()
            .unwrap_or_default()
            .parse::<VoteDirection>()
            .map_err(|msg| AgentError::Validation(FieldErrors::single("direction", msg)))?;

        let agent = self
            .store
            .increment_vote(id, direction)
            .await?
            .ok_or(AgentError::NotFound(id))?;

        debug!(
            agent_id = %id,
            %direction,
            upvotes = agent.upvotes,
            downvotes = agent.downvotes,
            "Vote recorded"
        );

        Ok(agent)
    }
}

/// Check a submission against the agent creation rules
pub fn validate_submission(request: &CreateAgentRequest) -> Result<NewAgent, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = validation::required_text(
        &mut errors,
        "name",
        request.name.as_deref(),
        Some(MAX_NAME_LENGTH),
    );
    let description = validation::required_text(
        &mut errors,
        "description",
        request.description.as_deref(),
        Some(MAX_DESCRIPTION_LENGTH),
    );

    let category = match request.category.as_deref().map(str::trim) {
        None | Some("") => {
            errors.add("category", "category is required");
            None
        }
        Some(raw) => match raw.parse::<Category>() {
            Ok(category) => Some(category),
            Err(msg) => {
                errors.add("category", msg);
                None
            }
        },
    };

    let github_url = validation::optional_url(&mut errors, "github_url", request.github_url.as_deref());
    let mcp_endpoint =
        validation::optional_url(&mut errors, "mcp_endpoint", request.mcp_endpoint.as_deref());
    let user_id = validation::optional_text(request.user_id.as_deref());

    match (name, description, category) {
        (Some(name), Some(description), Some(category)) if errors.is_empty() => Ok(NewAgent {
            name,
            description,
            category,
            github_url,
            mcp_endpoint,
            user_id,
        }),
        _ => Err(errors),
    }
}
