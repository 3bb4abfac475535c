// src/handlers/users.rs

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermEditUsers, PermViewUsers, RequirePermission},
    models::auth::{UpdateUserPayload, User},
};

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Lista de usuários", body = [User]),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermViewUsers>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = app_state.user_repo.list_all(&app_state.db_pool).await?;
    Ok(Json(users))
}

// PUT /api/users/{id}
// Papel, departamento e supervisor são os únicos campos editáveis.
#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    tag = "Users",
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Usuário atualizado", body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    params(
        ("user_id" = Uuid, Path, description = "ID do usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermEditUsers>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<User>, AppError> {
    let user = app_state
        .user_repo
        .update_role(
            &app_state.db_pool,
            user_id,
            payload.role,
            payload.department,
            payload.supervisor_id,
        )
        .await?;

    Ok(Json(user))
}
