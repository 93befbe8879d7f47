//! Redis Pub/Sub module.
//!
//! Publishes workflow events for real-time delivery to learners.

mod channels;
mod publisher;

pub use channels::PubSubChannel;
pub use publisher::{PubSubEvent, Publisher};
