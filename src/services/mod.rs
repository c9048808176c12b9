pub mod agent_catalog;
pub mod aggregation;
pub mod health;
pub mod memory;
pub mod postgres;
pub mod review;
pub mod saved;
pub mod scoring;
pub mod store;
pub mod validation;

pub use agent_catalog::{AgentCatalogService, AgentError};
pub use aggregation::{AggregationService, RatingAggregate};
pub use health::{DatabaseHealth, HealthService, HealthStatus, SystemHealth};
pub use memory::MemoryDirectoryStore;
pub use postgres::PgDirectoryStore;
pub use review::{ReviewError, ReviewService};
pub use saved::{SaveError, SavedAgentService};
pub use scoring::score;
pub use store::{DirectoryStore, StoreError};
pub use validation::FieldErrors;
