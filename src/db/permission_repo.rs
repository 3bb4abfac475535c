// src/db/permission_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::department::Department,
    models::rbac::{Permission, PermissionGrant},
};

#[derive(Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todas as concessões do usuário. O resolver avalia este conjunto em
    /// memória; não há cache entre requisições.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<PermissionGrant>, AppError> {
        let grants = sqlx::query_as::<_, PermissionGrant>(
            r#"
            SELECT id, user_id, permission, department, created_at
            FROM user_permissions
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(grants)
    }

    pub async fn grant(
        &self,
        user_id: Uuid,
        permission: Permission,
        department: Option<Department>,
    ) -> Result<PermissionGrant, AppError> {
        let grant = sqlx::query_as::<_, PermissionGrant>(
            r#"
            INSERT INTO user_permissions (user_id, permission, department)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, permission, department) DO UPDATE
                SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, permission, department, created_at
            "#,
        )
        .bind(user_id)
        .bind(permission)
        .bind(department)
        .fetch_one(&self.pool)
        .await?;

        Ok(grant)
    }

    pub async fn revoke(&self, grant_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM user_permissions WHERE id = $1")
            .bind(grant_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Concessão não encontrada.".into()));
        }
        Ok(())
    }
}
