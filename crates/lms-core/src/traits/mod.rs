//! Ports implemented by the infrastructure crates

mod notification_sink;
mod repositories;

pub use notification_sink::NotificationSink;
pub use repositories::{
    CertificateRepository, CourseRepository, EnrollmentRepository, EnrollmentStats,
    NotificationRepository, ProgressRepository, ProgressStats, RepoResult, UserRepository,
};
