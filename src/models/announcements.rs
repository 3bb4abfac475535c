// src/models/announcements.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Comunicado interno exibido nos painéis (ex.: mudança de preço, feriado).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,
    #[schema(example = "Inventário dia 30")]
    pub title: String,
    pub content: String,
    #[schema(example = "info")]
    pub kind: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementPayload {
    #[validate(length(min = 1, message = "required"))]
    pub title: String,
    #[validate(length(min = 1, message = "required"))]
    pub content: String,
    #[serde(default = "default_kind")]
    #[schema(example = "info")]
    pub kind: String,
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_kind() -> String {
    "info".to_string()
}
