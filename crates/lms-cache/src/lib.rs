//! # lms-cache
//!
//! Redis layer used to fan notifications out to connected clients.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Pub/Sub**: Workflow events published to per-user channels
//!
//! ## Example
//!
//! ```ignore
//! use lms_cache::{Publisher, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let publisher = Publisher::new(pool);
//!
//! // Fan a workflow event out to the learner's channel
//! publisher.publish_domain_event(&event).await?;
//! ```

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export pubsub types
pub use pubsub::{PubSubChannel, PubSubEvent, Publisher};
