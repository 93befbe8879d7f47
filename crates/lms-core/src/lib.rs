//! # lms-core
//!
//! Domain layer for the learning platform: entities, the progress and
//! enrollment transition rules, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod rules;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    generate_certificate_number, Certificate, CertificateStatus, Course, CourseCategory,
    CourseType, Enrollment, EnrollmentStatus, EnrollmentType, Notification, NotificationDraft,
    NotificationPriority, NotificationStatus, NotificationType, Progress, ProgressReport,
    ProgressStatus, ProgressTransition, Role, User,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    CertificateRepository, CourseRepository, EnrollmentRepository, EnrollmentStats,
    NotificationRepository, NotificationSink, ProgressRepository, ProgressStats, RepoResult,
    UserRepository,
};
pub use value_objects::{
    ParseEnumError, Percentage, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
