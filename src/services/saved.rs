//! Saved Agent Service
//!
//! Per-user bookmarks. The store only knows an idempotent "set saved state";
//! the toggle is built on top of it.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::SavedStatus;
use crate::services::store::{DirectoryStore, StoreError};
use crate::services::validation::{self, FieldErrors};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Agent not found: {0}")]
    AgentNotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct SavedAgentService {
    store: Arc<dyn DirectoryStore>,
}

impl SavedAgentService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    pub async fn is_saved(
        &self,
        agent_id: Uuid,
        user_id: Option<&str>,
    ) -> Result<SavedStatus, SaveError> {
        let user_id = require_user_id(user_id)?;
        let saved = self.store.is_saved(agent_id, &user_id).await?;
        Ok(SavedStatus { saved })
    }

    /// Idempotently set the saved state
    pub async fn set_saved(
        &self,
        agent_id: Uuid,
        user_id: Option<&str>,
        saved: bool,
    ) -> Result<SavedStatus, SaveError> {
        let user_id = require_user_id(user_id)?;
        self.ensure_agent(agent_id).await?;
        self.store.set_saved(agent_id, &user_id, saved).await?;
        Ok(SavedStatus { saved })
    }

    /// Flip the saved state and return the new one.
    ///
    /// Two toggles racing for the same pair may both read the same state; the
    /// unique `(agent_id, user_id)` pair keeps the outcome a single row or none.
    pub async fn toggle(
        &self,
        agent_id: Uuid,
        user_id: Option<&str>,
    ) -> Result<SavedStatus, SaveError> {
        let user_id = require_user_id(user_id)?;
        self.ensure_agent(agent_id).await?;

        let saved = !self.store.is_saved(agent_id, &user_id).await?;
        self.store.set_saved(agent_id, &user_id, saved).await?;

        info!(%agent_id, user_id = %user_id, saved, "Saved state toggled");

        Ok(SavedStatus { saved })
    }

    async fn ensure_agent(&self, agent_id: Uuid) -> Result<(), SaveError> {
        match self.store.get_agent(agent_id).await? {
            Some(_) => Ok(()),
            None => Err(SaveError::AgentNotFound(agent_id)),
        }
    }
}

fn require_user_id(user_id: Option<&str>) -> Result<String, SaveError> {
    let mut errors = FieldErrors::new();
    match validation::required_text(&mut errors, "user_id", user_id, None) {
        Some(user_id) => Ok(user_id),
        None => Err(SaveError::Validation(errors)),
    }
}
