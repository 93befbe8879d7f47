//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod access;
pub mod certificate;
pub mod context;
pub mod enrollment;
pub mod error;
pub mod notification;
pub mod progress;
pub mod sink;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use access::{require_roles, require_self_or_staff, require_staff, Caller};
pub use certificate::{CertificateService, IssueCertificate};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use enrollment::EnrollmentService;
pub use error::{ServiceError, ServiceResult};
pub use notification::NotificationService;
pub use progress::{ProgressService, MARK_COMPLETED_MESSAGE};
pub use sink::StoreNotificationSink;
