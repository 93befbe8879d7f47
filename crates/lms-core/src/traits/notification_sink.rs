//! Notification sink - where workflow events are delivered

use async_trait::async_trait;

use crate::events::DomainEvent;
use crate::traits::RepoResult;

/// Receives "enrolled", "completed", and "certificate issued" events
///
/// Delivery is best-effort: callers log a returned error and carry on, the
/// state change that produced the event has already been committed.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, event: &DomainEvent) -> RepoResult<()>;
}
