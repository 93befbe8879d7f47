//! In-memory storage backend
//!
//! Implements every repository trait over a shared [`MemoryStore`]. Used when
//! `LMS_STORE=memory` and by the service and API test suites.

mod repositories;
mod store;

pub use repositories::{
    MemoryCertificateRepository, MemoryCourseRepository, MemoryEnrollmentRepository,
    MemoryNotificationRepository, MemoryProgressRepository, MemoryUserRepository,
};
pub use store::MemoryStore;
