//! API Integration Tests
//!
//! Each test spawns a server over its own in-memory store, so no external
//! services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, fixtures::*, TestServer, TestUser};
use lms_core::Role;
use reqwest::StatusCode;

async fn server() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

/// Learner enrolled in a fresh ten hour course
async fn enrolled_learner(server: &TestServer) -> (TestUser, String) {
    let learner = server.seed_user(Role::Employee).await.unwrap();
    let course = server.seed_course(Some(10), None).await.unwrap().to_string();

    let response = server
        .post_auth("/api/v1/enrollments", &learner.token, &EnrollRequest::course(&course))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    (learner, course)
}

async fn report(server: &TestServer, user: &TestUser, body: &ReportProgressRequest) -> ProgressResponse {
    let response = server
        .post_auth("/api/v1/progress", &user.token, body)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn certificates_of(server: &TestServer, user: &TestUser) -> Vec<CertificateResponse> {
    let path = format!("/api/v1/certificates/users/{}", user.id);
    let response = server.get_auth(&path, &user.token).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn enrollments_of(server: &TestServer, user: &TestUser) -> Vec<EnrollmentResponse> {
    let path = format!("/api/v1/enrollments/users/{}", user.id);
    let response = server.get_auth(&path, &user.token).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn notifications_of(server: &TestServer, user: &TestUser) -> Vec<NotificationResponse> {
    let response = server
        .get_auth("/api/v1/notifications", &user.token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = server().await;
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_without_redis() {
    let server = server().await;
    let response = server.get("/health/ready").await.expect("Request failed");
    let ready: ReadinessResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(ready.status, "ready");
    assert_eq!(ready.checks.store, "healthy");
    assert_eq!(ready.checks.redis, "disabled");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let server = server().await;
    let response = server.get("/api/v1/notifications").await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let server = server().await;
    let response = server
        .get_auth("/api/v1/notifications", "not-a-jwt")
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_malformed_path_id() {
    let server = server().await;
    let user = server.seed_user(Role::Employee).await.unwrap();
    let response = server
        .get_auth("/api/v1/enrollments/not-a-number", &user.token)
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Enrollment Tests
// ============================================================================

#[tokio::test]
async fn test_self_enrollment() {
    let server = server().await;
    let learner = server.seed_user(Role::Employee).await.unwrap();
    let course = server.seed_course(Some(4), None).await.unwrap().to_string();

    let response = server
        .post_auth("/api/v1/enrollments", &learner.token, &EnrollRequest::course(&course))
        .await
        .unwrap();
    let enrollment: EnrollmentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(enrollment.user_id, learner.id_str());
    assert_eq!(enrollment.course_id, course);
    assert_eq!(enrollment.status, "ENROLLED");
    assert_eq!(enrollment.enrollment_type, "SELF_ENROLLED");
    assert!(!enrollment.certificate_earned);

    let path = format!("/api/v1/enrollments/{}", enrollment.id);
    let response = server.get_auth(&path, &learner.token).await.unwrap();
    let fetched: EnrollmentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, enrollment.id);

    let notifications = notifications_of(&server, &learner).await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].notification_type, "COURSE_ASSIGNMENT");
}

#[tokio::test]
async fn test_duplicate_enrollment_conflicts() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;

    let response = server
        .post_auth("/api/v1/enrollments", &learner.token, &EnrollRequest::course(&course))
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "ALREADY_ENROLLED");
}

#[tokio::test]
async fn test_full_course_rejects_enrollment() {
    let server = server().await;
    let course = server.seed_course(Some(2), Some(1)).await.unwrap().to_string();
    let first = server.seed_user(Role::Employee).await.unwrap();
    let second = server.seed_user(Role::Employee).await.unwrap();

    let response = server
        .post_auth("/api/v1/enrollments", &first.token, &EnrollRequest::course(&course))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth("/api/v1/enrollments", &second.token, &EnrollRequest::course(&course))
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "COURSE_FULL");
}

#[tokio::test]
async fn test_enroll_unknown_course() {
    let server = server().await;
    let learner = server.seed_user(Role::Employee).await.unwrap();

    let response = server
        .post_auth("/api/v1/enrollments", &learner.token, &EnrollRequest::course("999"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_manager_assigns_enrollment() {
    let server = server().await;
    let manager = server.seed_user(Role::Manager).await.unwrap();
    let learner = server.seed_user(Role::Employee).await.unwrap();
    let course = server.seed_course(None, None).await.unwrap().to_string();

    let request = EnrollRequest::course(&course).for_user(&learner.id_str());
    let response = server
        .post_auth("/api/v1/enrollments", &manager.token, &request)
        .await
        .unwrap();
    let enrollment: EnrollmentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(enrollment.user_id, learner.id_str());
    assert_eq!(enrollment.enrollment_type, "MANAGER_ASSIGNED");

    // A learner cannot enroll someone else
    let other = server.seed_user(Role::Employee).await.unwrap();
    let request = EnrollRequest::course(&course).for_user(&other.id_str());
    let response = server
        .post_auth("/api/v1/enrollments", &learner.token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Course roster is staff only
    let path = format!("/api/v1/enrollments/courses/{course}");
    let response = server.get_auth(&path, &manager.token).await.unwrap();
    let roster: Vec<EnrollmentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(roster.len(), 1);
    let response = server.get_auth(&path, &learner.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_completing_enrollment_issues_certificate() {
    let server = server().await;
    let (learner, _course) = enrolled_learner(&server).await;
    let admin = server.seed_user(Role::Admin).await.unwrap();
    let enrollment_id = enrollments_of(&server, &learner).await[0].id.clone();
    let path = format!("/api/v1/enrollments/{enrollment_id}/status");

    // Learners may not move their own enrollment
    let response = server
        .put_auth(&path, &learner.token, &StatusRequest::new("COMPLETED"))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(&path, &admin.token, &StatusRequest::new("COMPLETED"))
        .await
        .unwrap();
    let enrollment: EnrollmentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(enrollment.status, "COMPLETED");
    assert!(enrollment.completed_at.is_some());
    assert!(enrollment.certificate_earned);

    let certificates = certificates_of(&server, &learner).await;
    assert_eq!(certificates.len(), 1);
    assert_eq!(enrollment.certificate_id.as_deref(), Some(certificates[0].id.as_str()));

    let response = server
        .put_auth(&path, &admin.token, &StatusRequest::new("GRADUATED"))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_completed_enrollment_cannot_be_downgraded() {
    let server = server().await;
    let (learner, _course) = enrolled_learner(&server).await;
    let admin = server.seed_user(Role::Admin).await.unwrap();
    let enrollment_id = enrollments_of(&server, &learner).await[0].id.clone();
    let path = format!("/api/v1/enrollments/{enrollment_id}/status");

    let response = server
        .put_auth(&path, &admin.token, &StatusRequest::new("COMPLETED"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .put_auth(&path, &admin.token, &StatusRequest::new("IN_PROGRESS"))
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "ENROLLMENT_ALREADY_COMPLETED");

    let enrollment = enrollments_of(&server, &learner).await.remove(0);
    assert_eq!(enrollment.status, "COMPLETED");
    assert_eq!(enrollment.completion_percentage, 100.0);
    assert!(enrollment.completed_at.is_some());
}

#[tokio::test]
async fn test_delete_enrollment() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;
    let enrollment_id = enrollments_of(&server, &learner).await[0].id.clone();
    let path = format!("/api/v1/enrollments/{enrollment_id}");

    let trainer = server.seed_user(Role::Trainer).await.unwrap();
    let response = server.delete_auth(&path, &trainer.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let manager = server.seed_user(Role::Manager).await.unwrap();
    let response = server.delete_auth(&path, &manager.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&path, &manager.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    let response = server.delete_auth(&path, &manager.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // The learner may enroll again
    let response = server
        .post_auth("/api/v1/enrollments", &learner.token, &EnrollRequest::course(&course))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_enrollment_stats() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;
    report(&server, &learner, &ReportProgressRequest::percent(&course, 100.0)).await;
    let (other, other_course) = enrolled_learner(&server).await;
    report(&server, &other, &ReportProgressRequest::percent(&other_course, 25.0)).await;
    enrolled_learner(&server).await;

    let response = server
        .get_auth("/api/v1/enrollments/stats", &learner.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let admin = server.seed_user(Role::Admin).await.unwrap();
    let response = server
        .get_auth("/api/v1/enrollments/stats", &admin.token)
        .await
        .unwrap();
    let stats: EnrollmentStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.total_enrollments, 3);
    assert_eq!(stats.completed_enrollments, 1);
    assert_eq!(stats.in_progress_enrollments, 1);
}

// ============================================================================
// Progress Tests
// ============================================================================

#[tokio::test]
async fn test_partial_progress_mirrors_enrollment() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;

    let progress = report(&server, &learner, &ReportProgressRequest::percent(&course, 45.0)).await;
    assert_eq!(progress.status, "IN_PROGRESS");
    assert!((progress.completion_percentage - 45.0).abs() < f64::EPSILON);
    assert_eq!(progress.time_spent_minutes, 270);
    assert!(progress.completed_at.is_none());

    let enrollment = &enrollments_of(&server, &learner).await[0];
    assert_eq!(enrollment.status, "IN_PROGRESS");
    assert!((enrollment.completion_percentage - 45.0).abs() < f64::EPSILON);
    assert!(certificates_of(&server, &learner).await.is_empty());

    let path = format!("/api/v1/progress/users/{}/courses/{course}", learner.id);
    let response = server.get_auth(&path, &learner.token).await.unwrap();
    let fetched: ProgressResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, progress.id);
}

#[tokio::test]
async fn test_full_progress_completes_and_certifies() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;

    let progress = report(&server, &learner, &ReportProgressRequest::percent(&course, 100.0)).await;
    assert_eq!(progress.status, "COMPLETED");
    assert!(progress.completed_at.is_some());

    let enrollment = &enrollments_of(&server, &learner).await[0];
    assert_eq!(enrollment.status, "COMPLETED");
    assert!(enrollment.certificate_earned);
    assert_eq!(enrollment.grade.as_deref(), Some("A"));

    let certificates = certificates_of(&server, &learner).await;
    assert_eq!(certificates.len(), 1);
    let certificate = &certificates[0];
    assert!((certificate.score - 95.0).abs() < f64::EPSILON);
    assert_eq!(certificate.grade, "A");
    assert_eq!(certificate.status, "ISSUED");
    assert!(certificate.is_valid);
    assert!(certificate.certificate_number.starts_with("CERT-"));

    // Reporting 100% again changes nothing
    report(&server, &learner, &ReportProgressRequest::percent(&course, 100.0)).await;
    assert_eq!(certificates_of(&server, &learner).await.len(), 1);

    let kinds: Vec<String> = notifications_of(&server, &learner)
        .await
        .into_iter()
        .map(|n| n.notification_type)
        .collect();
    assert_eq!(kinds.iter().filter(|k| *k == "COURSE_COMPLETION").count(), 1);
    assert_eq!(kinds.iter().filter(|k| *k == "CERTIFICATE_ISSUED").count(), 1);
}

#[tokio::test]
async fn test_quiz_score_sets_grade() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;

    report(
        &server,
        &learner,
        &ReportProgressRequest::percent(&course, 100.0).with_quiz(17.0, 20.0),
    )
    .await;

    let certificate = &certificates_of(&server, &learner).await[0];
    assert!((certificate.score - 85.0).abs() < 1e-9);
    assert!((certificate.max_score - 100.0).abs() < f64::EPSILON);
    assert_eq!(certificate.grade, "B");
}

#[tokio::test]
async fn test_out_of_range_percentage() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;

    let response = server
        .post_auth(
            "/api/v1/progress",
            &learner.token,
            &ReportProgressRequest::percent(&course, 150.0),
        )
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
    assert!(body.error.details.is_some());

    let path = format!("/api/v1/progress/users/{}", learner.id);
    let response = server.get_auth(&path, &learner.token).await.unwrap();
    let progress: Vec<ProgressResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(progress.is_empty());
}

#[tokio::test]
async fn test_progress_for_unknown_course() {
    let server = server().await;
    let learner = server.seed_user(Role::Employee).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/progress",
            &learner.token,
            &ReportProgressRequest::percent("424242", 10.0),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_reporting_for_another_learner() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;
    let peer = server.seed_user(Role::Employee).await.unwrap();
    let trainer = server.seed_user(Role::Trainer).await.unwrap();
    let body = ReportProgressRequest::percent(&course, 30.0).for_user(&learner.id_str());

    let response = server
        .post_auth("/api/v1/progress", &peer.token, &body)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "FORBIDDEN");

    let progress = report(&server, &trainer, &body).await;
    assert_eq!(progress.user_id, learner.id_str());
}

#[tokio::test]
async fn test_mark_completed() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;
    let request = MarkCompletedRequest {
        user_id: None,
        course_id: course.clone(),
    };

    // Nothing to complete before the first report
    let response = server
        .post_auth("/api/v1/progress/mark-completed", &learner.token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    report(&server, &learner, &ReportProgressRequest::percent(&course, 20.0)).await;

    let response = server
        .post_auth("/api/v1/progress/mark-completed", &learner.token, &request)
        .await
        .unwrap();
    let completed: MarkCompletedResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(completed.message, "Course marked as completed successfully");
    assert_eq!(completed.progress.status, "COMPLETED");
    assert_eq!(completed.progress.time_spent_minutes, 600);

    let certificates = certificates_of(&server, &learner).await;
    assert_eq!(certificates.len(), 1);
    assert_eq!(certificates[0].grade, "A");
}

#[tokio::test]
async fn test_user_stats_and_course_listing() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;
    let second = server.seed_course(Some(10), None).await.unwrap().to_string();
    let response = server
        .post_auth("/api/v1/enrollments", &learner.token, &EnrollRequest::course(&second))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    report(&server, &learner, &ReportProgressRequest::percent(&course, 100.0)).await;
    report(&server, &learner, &ReportProgressRequest::percent(&second, 50.0)).await;

    let path = format!("/api/v1/progress/users/{}/stats", learner.id);
    let response = server.get_auth(&path, &learner.token).await.unwrap();
    let stats: ProgressStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.user_id, learner.id_str());
    assert_eq!(stats.total_courses, 2);
    assert_eq!(stats.completed_courses, 1);
    assert!((stats.average_completion - 75.0).abs() < 1e-9);
    assert_eq!(stats.total_time_spent_minutes, 900);

    let path = format!("/api/v1/progress/courses/{course}");
    let response = server.get_auth(&path, &learner.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let trainer = server.seed_user(Role::Trainer).await.unwrap();
    let response = server.get_auth(&path, &trainer.token).await.unwrap();
    let roster: Vec<ProgressResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(roster.len(), 1);
}

// ============================================================================
// Certificate Tests
// ============================================================================

#[tokio::test]
async fn test_verify_and_revoke_certificate() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;
    report(&server, &learner, &ReportProgressRequest::percent(&course, 100.0)).await;
    let certificate = certificates_of(&server, &learner).await.remove(0);

    let verifier = server.seed_user(Role::Employee).await.unwrap();
    let path = format!("/api/v1/certificates/verify/{}", certificate.certificate_number);
    let response = server.get_auth(&path, &verifier.token).await.unwrap();
    let verified: CertificateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(verified.id, certificate.id);

    // Other learners cannot read it by id
    let path = format!("/api/v1/certificates/{}", certificate.id);
    let response = server.get_auth(&path, &verifier.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let status_path = format!("/api/v1/certificates/{}/status", certificate.id);
    let response = server
        .put_auth(&status_path, &learner.token, &StatusRequest::new("REVOKED"))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let admin = server.seed_user(Role::Admin).await.unwrap();
    let response = server
        .put_auth(&status_path, &admin.token, &StatusRequest::new("REVOKED"))
        .await
        .unwrap();
    let revoked: CertificateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(revoked.status, "REVOKED");
    assert!(!revoked.is_valid);

    let response = server
        .get_auth("/api/v1/certificates/verify/CERT-UNKNOWN", &verifier.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_staff_issues_certificate_once() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;
    let mut body = IssueCertificateRequest::pair(&learner.id_str(), &course);
    body.grade = Some("B".to_string());

    let response = server
        .post_auth("/api/v1/certificates", &learner.token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let trainer = server.seed_user(Role::Trainer).await.unwrap();
    let response = server
        .post_auth("/api/v1/certificates", &trainer.token, &body)
        .await
        .unwrap();
    let issued: CertificateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(issued.grade, "B");
    assert_eq!(issued.user_id, learner.id_str());
    let enrollment = enrollments_of(&server, &learner).await.remove(0);
    assert_eq!(enrollment.certificate_id.as_deref(), Some(issued.id.as_str()));

    // A second request for the pair returns the same certificate
    let mut again = IssueCertificateRequest::pair(&learner.id_str(), &course);
    again.score = Some(10.0);
    again.max_score = Some(20.0);
    let response = server
        .post_auth("/api/v1/certificates", &trainer.token, &again)
        .await
        .unwrap();
    let repeated: CertificateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(repeated.id, issued.id);
    assert_eq!(repeated.grade, "B");
    assert_eq!(certificates_of(&server, &learner).await.len(), 1);
}

#[tokio::test]
async fn test_staff_issue_for_unknown_user() {
    let server = server().await;
    let course = server.seed_course(None, None).await.unwrap().to_string();
    let admin = server.seed_user(Role::Admin).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/certificates",
            &admin.token,
            &IssueCertificateRequest::pair("987654321", &course),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_backfill_requires_staff() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;
    report(&server, &learner, &ReportProgressRequest::percent(&course, 100.0)).await;

    let response = server
        .post_empty_auth("/api/v1/certificates/generate-from-enrollments", &learner.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Completion already issued the only certificate
    let trainer = server.seed_user(Role::Trainer).await.unwrap();
    let response = server
        .post_empty_auth("/api/v1/certificates/generate-from-enrollments", &trainer.token)
        .await
        .unwrap();
    let result: BackfillResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.generated, 0);
    assert_eq!(result.skipped, 0);
    assert_eq!(certificates_of(&server, &learner).await.len(), 1);
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_notification_read_flow() {
    let server = server().await;
    let (learner, course) = enrolled_learner(&server).await;
    report(&server, &learner, &ReportProgressRequest::percent(&course, 100.0)).await;

    let response = server
        .get_auth("/api/v1/notifications/unread-count", &learner.token)
        .await
        .unwrap();
    let unread: UnreadCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.count, 3);

    let first = notifications_of(&server, &learner).await.remove(0);
    assert_eq!(first.user_id, learner.id_str());

    // Only the owner may mark it read
    let stranger = server.seed_user(Role::Admin).await.unwrap();
    let path = format!("/api/v1/notifications/{}/read", first.id);
    let response = server.patch_auth(&path, &stranger.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.patch_auth(&path, &learner.token).await.unwrap();
    let read: NotificationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(read.is_read);

    let response = server
        .get_auth("/api/v1/notifications/unread", &learner.token)
        .await
        .unwrap();
    let unread: Vec<NotificationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.len(), 2);

    let response = server
        .patch_auth("/api/v1/notifications/read-all", &learner.token)
        .await
        .unwrap();
    let marked: MarkAllReadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(marked.updated, 2);
}
