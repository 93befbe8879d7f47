//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in lms-core.
//! Each repository handles database operations for a specific domain entity.

mod certificate;
mod course;
mod enrollment;
mod error;
mod notification;
mod progress;
mod user;

pub use certificate::PgCertificateRepository;
pub use course::PgCourseRepository;
pub use enrollment::PgEnrollmentRepository;
pub use notification::PgNotificationRepository;
pub use progress::PgProgressRepository;
pub use user::PgUserRepository;
