//! Notification sink backed by the notification store
//!
//! Each delivered event becomes a stored in-app notification and, when a
//! Redis pool is configured, a pub/sub message on the user's channel.

use std::sync::Arc;

use async_trait::async_trait;
use lms_cache::Publisher;
use lms_core::traits::{NotificationRepository, NotificationSink, RepoResult};
use lms_core::{DomainEvent, Notification, SnowflakeGenerator};
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;

/// Sink that persists a notification row per event
pub struct StoreNotificationSink {
    repo: Arc<dyn NotificationRepository>,
    ids: Arc<SnowflakeGenerator>,
    publisher: Option<Publisher>,
}

impl StoreNotificationSink {
    pub fn new(
        repo: Arc<dyn NotificationRepository>,
        ids: Arc<SnowflakeGenerator>,
        publisher: Option<Publisher>,
    ) -> Self {
        Self {
            repo,
            ids,
            publisher,
        }
    }
}

#[async_trait]
impl NotificationSink for StoreNotificationSink {
    #[instrument(skip(self, event), fields(event_type = event.event_type(), user_id = %event.user_id()))]
    async fn deliver(&self, event: &DomainEvent) -> RepoResult<()> {
        let notification = Notification::from_draft(self.ids.generate(), event.notification());
        self.repo.create(&notification).await?;

        debug!(notification_id = %notification.id, "Notification stored");

        // Real-time fan-out is a bonus on top of the stored row
        if let Some(publisher) = &self.publisher {
            if let Err(e) = publisher.publish_domain_event(event).await {
                warn!(error = %e, "Failed to publish notification event");
            }
        }

        Ok(())
    }
}

/// Hand an event to the configured sink, logging instead of failing
pub(crate) async fn notify(ctx: &ServiceContext, event: DomainEvent) {
    if let Err(e) = ctx.notification_sink().deliver(&event).await {
        warn!(
            error = %e,
            event_type = event.event_type(),
            user_id = %event.user_id(),
            "Notification delivery failed"
        );
    }
}
