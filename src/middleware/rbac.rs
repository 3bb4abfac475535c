// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::User,
    models::rbac::Permission,
};

/// 1. O Trait que define o que é uma Permissão exigida por uma rota
pub trait PermissionDef: Send + Sync + 'static {
    fn permission() -> Permission;
}

/// 2. O Extractor (Guardião). Verifica a permissão sem contexto de
/// departamento; rotas com recorte departamental fazem a verificação no
/// handler, onde o departamento é conhecido.
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        app_state
            .permission_service
            .require(&user, T::permission(), None)
            .await?;

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermViewUsers;
impl PermissionDef for PermViewUsers {
    fn permission() -> Permission {
        Permission::ViewUsers
    }
}

pub struct PermEditUsers;
impl PermissionDef for PermEditUsers {
    fn permission() -> Permission {
        Permission::EditUsers
    }
}

pub struct PermManagePermissions;
impl PermissionDef for PermManagePermissions {
    fn permission() -> Permission {
        Permission::ManagePermissions
    }
}

pub struct PermViewCustomers;
impl PermissionDef for PermViewCustomers {
    fn permission() -> Permission {
        Permission::ViewCustomers
    }
}

pub struct PermViewReports;
impl PermissionDef for PermViewReports {
    fn permission() -> Permission {
        Permission::ViewReports
    }
}

pub struct PermExportData;
impl PermissionDef for PermExportData {
    fn permission() -> Permission {
        Permission::ExportData
    }
}
