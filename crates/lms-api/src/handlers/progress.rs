//! Progress handlers
//!
//! Learner progress reports, forced completion, and progress queries.

use axum::{
    extract::{Path, State},
    Json,
};
use lms_service::dto::{
    MarkCompletedRequest, MarkCompletedResponse, ProgressResponse, ProgressStatsResponse,
    ReportProgressRequest,
};
use lms_service::ProgressService;

use crate::extractors::{AuthUser, CourseIdPath, UserCoursePath, UserIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Record a progress report
///
/// POST /progress
pub async fn report_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ReportProgressRequest>,
) -> ApiResult<Json<ProgressResponse>> {
    let service = ProgressService::new(state.service_context());
    let response = service.report_progress(&auth.caller(), request).await?;
    Ok(Json(response))
}

/// Force a course to completion
///
/// POST /progress/mark-completed
pub async fn mark_completed(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<MarkCompletedRequest>,
) -> ApiResult<Json<MarkCompletedResponse>> {
    let service = ProgressService::new(state.service_context());
    let response = service.mark_completed(&auth.caller(), request).await?;
    Ok(Json(response))
}

/// GET /progress/users/{user_id}
pub async fn list_user_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<ProgressResponse>>> {
    let service = ProgressService::new(state.service_context());
    let response = service.list_for_user(&auth.caller(), path.user_id()?).await?;
    Ok(Json(response))
}

/// GET /progress/users/{user_id}/courses/{course_id}
pub async fn get_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserCoursePath>,
) -> ApiResult<Json<ProgressResponse>> {
    let service = ProgressService::new(state.service_context());
    let response = service
        .get(&auth.caller(), path.user_id()?, path.course_id()?)
        .await?;
    Ok(Json(response))
}

/// Aggregate progress for one learner
///
/// GET /progress/users/{user_id}/stats
pub async fn get_user_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ProgressStatsResponse>> {
    let service = ProgressService::new(state.service_context());
    let response = service.stats(&auth.caller(), path.user_id()?).await?;
    Ok(Json(response))
}

/// Every learner's progress in a course (staff only)
///
/// GET /progress/courses/{course_id}
pub async fn list_course_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CourseIdPath>,
) -> ApiResult<Json<Vec<ProgressResponse>>> {
    let service = ProgressService::new(state.service_context());
    let response = service
        .list_for_course(&auth.caller(), path.course_id()?)
        .await?;
    Ok(Json(response))
}
