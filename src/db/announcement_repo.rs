// src/db/announcement_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::announcements::Announcement};

#[derive(Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        title: &str,
        content: &str,
        kind: &str,
        created_by: Uuid,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Announcement, AppError> {
        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            INSERT INTO announcements (title, content, kind, created_by, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, content, kind, created_by, created_at, expires_at
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(kind)
        .bind(created_by)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Comunicados vigentes (sem validade ou ainda não expirados), mais
    /// recentes primeiro.
    pub async fn list_current(&self) -> Result<Vec<Announcement>, AppError> {
        let announcements = sqlx::query_as::<_, Announcement>(
            r#"
            SELECT id, title, content, kind, created_by, created_at, expires_at
            FROM announcements
            WHERE expires_at IS NULL OR expires_at > NOW()
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(announcements)
    }
}
