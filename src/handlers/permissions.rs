// src/handlers/permissions.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermManagePermissions, RequirePermission},
    models::rbac::{CreateGrantPayload, PermissionGrant},
};

// GET /api/permissions/{user_id}
#[utoipa::path(
    get,
    path = "/api/permissions/{user_id}",
    tag = "RBAC",
    responses(
        (status = 200, description = "Concessões do usuário", body = [PermissionGrant])
    ),
    params(
        ("user_id" = Uuid, Path, description = "ID do usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_grants(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManagePermissions>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<PermissionGrant>>, AppError> {
    let grants = app_state.permission_service.grants_for(user_id).await?;
    Ok(Json(grants))
}

// POST /api/permissions
// Conceder duas vezes a mesma tripla (usuário, permissão, departamento)
// devolve a concessão existente, sem duplicar.
#[utoipa::path(
    post,
    path = "/api/permissions",
    tag = "RBAC",
    request_body = CreateGrantPayload,
    responses(
        (status = 201, description = "Concessão registrada", body = PermissionGrant),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_grant(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManagePermissions>,
    Json(payload): Json<CreateGrantPayload>,
) -> Result<impl IntoResponse, AppError> {
    let grant = app_state
        .permission_service
        .grant(payload.user_id, payload.permission, payload.department)
        .await?;
    Ok((StatusCode::CREATED, Json(grant)))
}

// DELETE /api/permissions/{grant_id}
#[utoipa::path(
    delete,
    path = "/api/permissions/{grant_id}",
    tag = "RBAC",
    responses(
        (status = 204, description = "Concessão revogada"),
        (status = 404, description = "Concessão não encontrada")
    ),
    params(
        ("grant_id" = Uuid, Path, description = "ID da concessão")
    ),
    security(("api_jwt" = []))
)]
pub async fn revoke_grant(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManagePermissions>,
    Path(grant_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.permission_service.revoke(grant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
