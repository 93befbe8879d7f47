//! # lms-db
//!
//! Storage layer implementing the repository traits of `lms-core`.
//!
//! ## Overview
//!
//! Two backends share the same trait surface:
//!
//! - PostgreSQL via SQLx (`repositories`), with models, mappers and the
//!   bundled schema applied by [`run_migrations`]
//! - A process-local [`MemoryStore`] (`memory`) backed by `DashMap`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lms_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use lms_db::repositories::PgProgressRepository;
//!
//! async fn example(settings: &lms_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from(settings)).await?;
//!     run_migrations(&pool).await?;
//!     let progress_repo = PgProgressRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{
    MemoryCertificateRepository, MemoryCourseRepository, MemoryEnrollmentRepository,
    MemoryNotificationRepository, MemoryProgressRepository, MemoryStore, MemoryUserRepository,
};
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCertificateRepository, PgCourseRepository, PgEnrollmentRepository,
    PgNotificationRepository, PgProgressRepository, PgUserRepository,
};
