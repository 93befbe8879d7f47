//! Redis Pub/Sub publisher.
//!
//! Publishes workflow events so that connected clients learn about new
//! notifications without polling.

use chrono::{DateTime, Utc};
use lms_core::DomainEvent;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "COURSE_COMPLETED")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl PubSubEvent {
    /// Wrap a domain event together with the notification it produces
    pub fn from_domain(event: &DomainEvent) -> Result<Self, serde_json::Error> {
        let draft = event.notification();
        let data = serde_json::json!({
            "event": serde_json::to_value(event)?,
            "notification": {
                "title": draft.title,
                "message": draft.message,
                "type": draft.notification_type,
                "priority": draft.priority,
            },
        });

        Ok(Self {
            event_type: event.event_type().to_string(),
            data,
            timestamp: event.timestamp(),
        })
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher").field("pool", &self.pool).finish()
    }
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish a domain event to the channel of the user it concerns
    pub async fn publish_domain_event(&self, event: &DomainEvent) -> RedisResult<u32> {
        let payload = PubSubEvent::from_domain(event)?;
        self.publish(&PubSubChannel::user(event.user_id()), &payload)
            .await
    }
}
