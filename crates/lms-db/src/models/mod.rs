//! Database models - SQLx-compatible structs for PostgreSQL tables

mod certificate;
mod course;
mod enrollment;
mod notification;
mod progress;
mod user;

pub use certificate::CertificateModel;
pub use course::CourseModel;
pub use enrollment::{EnrollmentModel, EnrollmentStatsModel};
pub use notification::NotificationModel;
pub use progress::{ProgressModel, ProgressStatsModel};
pub use user::UserModel;
