// src/handlers/announcements.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::announcements::{Announcement, CreateAnnouncementPayload},
    models::auth::Role,
};

// GET /api/announcements
#[utoipa::path(
    get,
    path = "/api/announcements",
    tag = "Announcements",
    responses(
        (status = 200, description = "Comunicados vigentes", body = [Announcement])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_announcements(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, AppError> {
    let announcements = app_state.announcement_repo.list_current().await?;
    Ok(Json(announcements))
}

// POST /api/announcements
// Publicação é exclusiva de admin e supervisor.
#[utoipa::path(
    post,
    path = "/api/announcements",
    tag = "Announcements",
    request_body = CreateAnnouncementPayload,
    responses(
        (status = 201, description = "Comunicado publicado", body = Announcement),
        (status = 403, description = "Apenas admin e supervisor publicam")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_announcement(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateAnnouncementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if user.role == Role::Vendedor {
        return Err(AppError::Forbidden(
            "Apenas admin e supervisor publicam comunicados.".to_string(),
        ));
    }

    let announcement = app_state
        .announcement_repo
        .create(
            &payload.title,
            &payload.content,
            &payload.kind,
            user.id,
            payload.expires_at,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}
