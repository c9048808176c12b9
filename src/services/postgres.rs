//! PostgreSQL directory store
//!
//! Production implementation of [`DirectoryStore`] over a sqlx connection pool.
//! Counter updates are single `UPDATE ... RETURNING` statements; aggregate
//! refreshes lock the agent row for the duration of the recompute.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{Agent, Category, NewAgent, NewReview, Review, VoteDirection};
use crate::services::aggregation::RatingAggregate;
use crate::services::store::{DirectoryStore, StoreError};

const AGENT_COLUMNS: &str = "id, name, description, category, github_url, mcp_endpoint, \
     user_id, upvotes, downvotes, avg_rating, total_reviews, created_at";

#[derive(Debug, Clone)]
pub struct PgDirectoryStore {
    pool: PgPool,
}

impl PgDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool using the database settings in `config`
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(config.database_acquire_timeout_secs))
            .connect(&config.database_url)
            .await?;

        info!(
            max_connections = config.database_max_connections,
            "Database connection pool established"
        );

        Ok(Self::new(pool))
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DirectoryStore for PgDirectoryStore {
    async fn list_agents(&self, category: Option<Category>) -> Result<Vec<Agent>, StoreError> {
        let sql = format!(
            "SELECT {AGENT_COLUMNS} FROM agents \
             WHERE ($1::agent_category IS NULL OR category = $1) \
             ORDER BY created_at DESC"
        );
        let agents = sqlx::query_as::<_, Agent>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;
        Ok(agents)
    }

    async fn get_agent(&self, id: Uuid) -> Result<Option<Agent>, StoreError> {
        let sql = format!("SELECT {AGENT_COLUMNS} FROM agents WHERE id = $1");
        let agent = sqlx::query_as::<_, Agent>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(agent)
    }

    async fn insert_agent(&self, agent: NewAgent) -> Result<Agent, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO agents (id, name, description, category, github_url, mcp_endpoint, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {AGENT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Agent>(&sql)
            .bind(Uuid::new_v4())
            .bind(&agent.name)
            .bind(&agent.description)
            .bind(agent.category)
            .bind(&agent.github_url)
            .bind(&agent.mcp_endpoint)
            .bind(&agent.user_id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn increment_vote(
        &self,
        id: Uuid,
        direction: VoteDirection,
    ) -> Result<Option<Agent>, StoreError> {
        // The increment happens inside the statement; no read-modify-write.
        let counter = match direction {
            VoteDirection::Up => "upvotes",
            VoteDirection::Down => "downvotes",
        };
        let sql = format!(
            "UPDATE agents SET {counter} = {counter} + 1 WHERE id = $1 RETURNING {AGENT_COLUMNS}"
        );
        let agent = sqlx::query_as::<_, Agent>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(agent)
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let row = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, agent_id, user_id, user_name, rating, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, agent_id, user_id, user_name, rating, content, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(review.agent_id)
        .bind(&review.user_id)
        .bind(&review.user_name)
        .bind(review.rating)
        .bind(&review.content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;
        Ok(row)
    }

    async fn list_reviews(&self, agent_id: Uuid) -> Result<Vec<Review>, StoreError> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, agent_id, user_id, user_name, rating, content, created_at
            FROM reviews
            WHERE agent_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    async fn refresh_rating_aggregate(
        &self,
        agent_id: Uuid,
    ) -> Result<Option<RatingAggregate>, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Serialize concurrent refreshes of this agent. Under READ COMMITTED the
        // next statement takes a fresh snapshot after the lock is granted, so it
        // sees every review committed before this point.
        let locked: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM agents WHERE id = $1 FOR UPDATE")
                .bind(agent_id)
                .fetch_optional(&mut *tx)
                .await?;

        if locked.is_none() {
            return Ok(None);
        }

        let (count, sum): (i64, Option<i64>) = sqlx::query_as(
            "SELECT COUNT(*), SUM(rating)::BIGINT FROM reviews WHERE agent_id = $1",
        )
        .bind(agent_id)
        .fetch_one(&mut *tx)
        .await?;

        let aggregate = RatingAggregate::from_totals(count, sum.unwrap_or(0));

        sqlx::query("UPDATE agents SET avg_rating = $2, total_reviews = $3 WHERE id = $1")
            .bind(agent_id)
            .bind(aggregate.avg_rating)
            .bind(aggregate.total_reviews)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(aggregate))
    }

    async fn is_saved(&self, agent_id: Uuid, user_id: &str) -> Result<bool, StoreError> {
        let saved: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM saved_agents WHERE agent_id = $1 AND user_id = $2)",
        )
        .bind(agent_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn set_saved(
        &self,
        agent_id: Uuid,
        user_id: &str,
        saved: bool,
    ) -> Result<(), StoreError> {
        if saved {
            sqlx::query(
                r#"
                INSERT INTO saved_agents (agent_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT (agent_id, user_id) DO NOTHING
                "#,
            )
            .bind(agent_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_constraint_error)?;
        } else {
            sqlx::query("DELETE FROM saved_agents WHERE agent_id = $1 AND user_id = $2")
                .bind(agent_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

/// Surface foreign-key and check violations as [`StoreError::Constraint`]
fn map_constraint_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db)
            if db.is_foreign_key_violation() || db.is_check_violation() =>
        {
            StoreError::Constraint(db.message().to_string())
        }
        _ => StoreError::Database(err),
    }
}
