//! Domain entities - core business objects

mod certificate;
mod course;
mod enrollment;
mod notification;
mod progress;
mod user;

pub use certificate::{
    generate_certificate_number, Certificate, CertificateStatus, CERTIFICATE_PREFIX,
};
pub use course::{Course, CourseCategory, CourseType};
pub use enrollment::{Enrollment, EnrollmentStatus, EnrollmentType};
pub use notification::{
    Notification, NotificationDraft, NotificationPriority, NotificationStatus, NotificationType,
};
pub use progress::{Progress, ProgressReport, ProgressStatus, ProgressTransition};
pub use user::{Role, User};
