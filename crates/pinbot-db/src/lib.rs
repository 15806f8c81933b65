//! # pinbot-db
//!
//! Storage layer implementing the preference repository traits.
//!
//! ## Overview
//!
//! - PostgreSQL connection pool and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Entity <-> model mappers
//! - PostgreSQL repository implementations
//! - In-memory repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pinbot_db::{create_pool, run_migrations, DatabaseConfig, PgPreferenceRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("postgres://localhost/pinbot")).await?;
//!     run_migrations(&pool).await?;
//!     let preferences = PgPreferenceRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryAutoThreadRepository, MemoryPreferenceRepository};
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgAutoThreadRepository, PgPreferenceRepository};
