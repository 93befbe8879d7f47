//! Pub/Sub channel definitions.
//!
//! Every learner has one channel that all of their sessions subscribe to.

use lms_core::Snowflake;

/// Channel prefix for user-specific events
const USER_CHANNEL_PREFIX: &str = "lms:user:";

/// Channel carrying the events of one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PubSubChannel {
    user_id: Snowflake,
}

impl PubSubChannel {
    /// Create a user channel
    #[must_use]
    pub fn user(user_id: Snowflake) -> Self {
        Self { user_id }
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        format!("{USER_CHANNEL_PREFIX}{}", self.user_id)
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
