// src/models/rbac.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::department::Department;

// O conjunto fechado de permissões do sistema. Cada uma corresponde a uma
// ação concreta de um painel; não existe permissão "genérica".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "permission_name", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewOrders,
    CreateOrders,
    EditOrders,
    DeleteOrders,
    ApproveOrders,
    RejectOrders,
    ViewProducts,
    CreateProducts,
    EditProducts,
    DeleteProducts,
    ViewCustomers,
    CreateCustomers,
    EditCustomers,
    DeleteCustomers,
    ViewUsers,
    CreateUsers,
    EditUsers,
    DeleteUsers,
    ViewWarehouses,
    CreateWarehouses,
    EditWarehouses,
    DeleteWarehouses,
    ViewReports,
    ExportData,
    ManagePermissions,
}

// Uma concessão: (usuário, permissão, departamento opcional).
// Departamento nulo = a permissão vale para todos os departamentos.
// O modelo é aditivo: o conjunto efetivo é a união das concessões.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGrant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub permission: Permission,
    pub department: Option<Department>,
    pub created_at: DateTime<Utc>,
}

// O recorte de visibilidade de dados, derivado do papel (não das
// concessões): aplicado em toda listagem de encomendas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Admin: todos os departamentos.
    Todas,
    /// Supervisor: apenas o departamento dele.
    Departamento(Department),
    /// Vendedor: apenas as encomendas criadas por ele.
    Proprias(Uuid),
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGrantPayload {
    pub user_id: Uuid,
    pub permission: Permission,
    pub department: Option<Department>,
}
