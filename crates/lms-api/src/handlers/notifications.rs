//! Notification handlers
//!
//! All endpoints act on the caller's own notifications.

use axum::{
    extract::{Path, State},
    Json,
};
use lms_service::dto::{MarkAllReadResponse, NotificationResponse, UnreadCountResponse};
use lms_service::NotificationService;

use crate::extractors::{AuthUser, IdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.list(&auth.caller()).await?))
}

/// GET /notifications/unread
pub async fn list_unread(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.unread(&auth.caller()).await?))
}

/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.unread_count(&auth.caller()).await?))
}

/// PATCH /notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<NotificationResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.mark_read(&auth.caller(), path.id()?).await?;
    Ok(Json(response))
}

/// PATCH /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MarkAllReadResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.mark_all_read(&auth.caller()).await?))
}
