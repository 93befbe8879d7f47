//! Certificate handlers
//!
//! Staff issuance, lookup, public verification by number, status changes,
//! and the enrollment backfill.

use axum::{
    extract::{Path, State},
    Json,
};
use lms_service::dto::{
    BackfillResponse, CertificateResponse, IssueCertificateRequest, UpdateCertificateStatusRequest,
};
use lms_service::CertificateService;

use crate::extractors::{AuthUser, IdPath, UserIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Issue a certificate for a pair, or return the one it already has
///
/// POST /certificates
pub async fn issue_certificate(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<IssueCertificateRequest>,
) -> ApiResult<Json<CertificateResponse>> {
    let service = CertificateService::new(state.service_context());
    let response = service.issue_for(&auth.caller(), request).await?;
    Ok(Json(response))
}

/// GET /certificates/{id}
pub async fn get_certificate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<CertificateResponse>> {
    let service = CertificateService::new(state.service_context());
    let response = service.get(&auth.caller(), path.id()?).await?;
    Ok(Json(response))
}

/// Look a certificate up by its printed number
///
/// GET /certificates/verify/{number}
pub async fn verify_certificate(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(number): Path<String>,
) -> ApiResult<Json<CertificateResponse>> {
    let service = CertificateService::new(state.service_context());
    let response = service.verify(&number).await?;
    Ok(Json(response))
}

/// GET /certificates/users/{user_id}
pub async fn list_user_certificates(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<CertificateResponse>>> {
    let service = CertificateService::new(state.service_context());
    let response = service.list_for_user(&auth.caller(), path.user_id()?).await?;
    Ok(Json(response))
}

/// PUT /certificates/{id}/status
pub async fn update_certificate_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<UpdateCertificateStatusRequest>,
) -> ApiResult<Json<CertificateResponse>> {
    let service = CertificateService::new(state.service_context());
    let response = service
        .update_status(&auth.caller(), path.id()?, request)
        .await?;
    Ok(Json(response))
}

/// Issue certificates for completed enrollments that lack one
///
/// POST /certificates/generate-from-enrollments
pub async fn generate_from_enrollments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<BackfillResponse>> {
    let service = CertificateService::new(state.service_context());
    let response = service.backfill_from_enrollments(&auth.caller()).await?;
    Ok(Json(response))
}
