//! Enrollment handlers

use axum::{
    extract::{Path, State},
    Json,
};
use lms_service::dto::{EnrollRequest, EnrollmentResponse, UpdateEnrollmentStatusRequest};
use lms_core::EnrollmentStats;
use lms_service::EnrollmentService;

use crate::extractors::{AuthUser, CourseIdPath, IdPath, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Enroll a learner in a course
///
/// POST /enrollments
pub async fn enroll(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<EnrollRequest>,
) -> ApiResult<Created<Json<EnrollmentResponse>>> {
    let service = EnrollmentService::new(state.service_context());
    let response = service.enroll(&auth.caller(), request).await?;
    Ok(Created(Json(response)))
}

/// GET /enrollments/{id}
pub async fn get_enrollment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<EnrollmentResponse>> {
    let service = EnrollmentService::new(state.service_context());
    let response = service.get(&auth.caller(), path.id()?).await?;
    Ok(Json(response))
}

/// DELETE /enrollments/{id}
pub async fn delete_enrollment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<NoContent> {
    let service = EnrollmentService::new(state.service_context());
    service.remove(&auth.caller(), path.id()?).await?;
    Ok(NoContent)
}

/// Platform-wide enrollment counts
///
/// GET /enrollments/stats
pub async fn enrollment_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<EnrollmentStats>> {
    let service = EnrollmentService::new(state.service_context());
    let response = service.stats(&auth.caller()).await?;
    Ok(Json(response))
}

/// Move an enrollment to a new status
///
/// PUT /enrollments/{id}/status
pub async fn update_enrollment_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<UpdateEnrollmentStatusRequest>,
) -> ApiResult<Json<EnrollmentResponse>> {
    let service = EnrollmentService::new(state.service_context());
    let response = service
        .update_status(&auth.caller(), path.id()?, request)
        .await?;
    Ok(Json(response))
}

/// GET /enrollments/users/{user_id}
pub async fn list_user_enrollments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<EnrollmentResponse>>> {
    let service = EnrollmentService::new(state.service_context());
    let response = service.list_for_user(&auth.caller(), path.user_id()?).await?;
    Ok(Json(response))
}

/// GET /enrollments/courses/{course_id}
pub async fn list_course_enrollments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CourseIdPath>,
) -> ApiResult<Json<Vec<EnrollmentResponse>>> {
    let service = EnrollmentService::new(state.service_context());
    let response = service
        .list_for_course(&auth.caller(), path.course_id()?)
        .await?;
    Ok(Json(response))
}
