//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod certificates;
pub mod enrollments;
pub mod health;
pub mod notifications;
pub mod progress;
