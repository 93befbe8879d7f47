//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{certificates, enrollments, health, notifications, progress};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(progress_routes())
        .merge(enrollment_routes())
        .merge(certificate_routes())
        .merge(notification_routes())
}

fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/progress", post(progress::report_progress))
        .route("/progress/mark-completed", post(progress::mark_completed))
        .route("/progress/users/:user_id", get(progress::list_user_progress))
        .route(
            "/progress/users/:user_id/courses/:course_id",
            get(progress::get_progress),
        )
        .route("/progress/users/:user_id/stats", get(progress::get_user_stats))
        .route("/progress/courses/:course_id", get(progress::list_course_progress))
}

fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/enrollments", post(enrollments::enroll))
        .route("/enrollments/stats", get(enrollments::enrollment_stats))
        .route(
            "/enrollments/:id",
            get(enrollments::get_enrollment).delete(enrollments::delete_enrollment),
        )
        .route(
            "/enrollments/:id/status",
            put(enrollments::update_enrollment_status),
        )
        .route(
            "/enrollments/users/:user_id",
            get(enrollments::list_user_enrollments),
        )
        .route(
            "/enrollments/courses/:course_id",
            get(enrollments::list_course_enrollments),
        )
}

fn certificate_routes() -> Router<AppState> {
    Router::new()
        .route("/certificates", post(certificates::issue_certificate))
        .route("/certificates/:id", get(certificates::get_certificate))
        .route(
            "/certificates/verify/:number",
            get(certificates::verify_certificate),
        )
        .route(
            "/certificates/users/:user_id",
            get(certificates::list_user_certificates),
        )
        .route(
            "/certificates/:id/status",
            put(certificates::update_certificate_status),
        )
        .route(
            "/certificates/generate-from-enrollments",
            post(certificates::generate_from_enrollments),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/unread", get(notifications::list_unread))
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route("/notifications/read-all", patch(notifications::mark_all_read))
        .route("/notifications/:id/read", patch(notifications::mark_read))
}
